use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// position of a guest footprint relative to a host route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// guest lies entirely upstream of the host
    Up,
    /// guest covers the host's upstream end
    UpOverlapped,
    /// guest lies within the host
    Inside,
    /// downstream-most part of the host lies inside the guest
    DownOverlapped,
    /// guest lies entirely downstream of the host
    Down,
    /// guest contains the host
    Wrap,
    Undetermined,
}

impl LocationType {
    /// numeric code used in persisted categorization rows
    pub fn code(&self) -> i32 {
        match self {
            LocationType::Up => 1,
            LocationType::UpOverlapped => 2,
            LocationType::Inside => 3,
            LocationType::Down => 4,
            LocationType::DownOverlapped => 5,
            LocationType::Wrap => 6,
            LocationType::Undetermined => 0,
        }
    }

    pub fn is_overlapped(&self) -> bool {
        matches!(
            self,
            LocationType::UpOverlapped
                | LocationType::Inside
                | LocationType::DownOverlapped
                | LocationType::Wrap
        )
    }
}

impl Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LocationType::Up => "up",
            LocationType::UpOverlapped => "up_overlapped",
            LocationType::Inside => "inside",
            LocationType::DownOverlapped => "down_overlapped",
            LocationType::Down => "down",
            LocationType::Wrap => "wrap",
            LocationType::Undetermined => "undetermined",
        };
        write!(f, "{s}")
    }
}
