use super::LocationType;
use serde::{Deserialize, Serialize};

/// where a guest footprint sits relative to a host route.
///
/// `distance` is the host's upstream mile point minus the guest's upstream
/// mile point. `off_distance` is zero when the two overlap, otherwise the gap
/// between the nearer edges, negative when the guest lies upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationClassification {
    pub kind: LocationType,
    pub distance: f64,
    pub off_distance: f64,
}

impl LocationClassification {
    pub fn undetermined() -> LocationClassification {
        LocationClassification {
            kind: LocationType::Undetermined,
            distance: 0.0,
            off_distance: 0.0,
        }
    }

    pub fn is_determined(&self) -> bool {
        self.kind != LocationType::Undetermined
    }
}

/// classifies a guest span `[s2, e2]` against a host span `[s1, e1]` given as
/// mile points on a shared map. a point guest uses `s2 == e2`.
pub fn classify_mile_points(s1: f64, e1: f64, s2: f64, e2: f64) -> LocationClassification {
    if ![s1, e1, s2, e2].iter().all(|v| v.is_finite()) {
        return LocationClassification::undetermined();
    }
    let distance = s1 - s2;
    let of = |kind: LocationType, off_distance: f64| LocationClassification {
        kind,
        distance,
        off_distance,
    };
    if s1 >= e2 {
        of(LocationType::Up, e2 - s1)
    } else if e1 <= s2 {
        of(LocationType::Down, s2 - e1)
    } else if s1 <= s2 && e1 >= e2 {
        of(LocationType::Inside, 0.0)
    } else if s1 >= s2 && e1 <= e2 {
        of(LocationType::Wrap, 0.0)
    } else if s1 >= s2 && s1 <= e2 && e1 >= e2 {
        of(LocationType::UpOverlapped, 0.0)
    } else if e1 >= s2 && e1 <= e2 && s1 <= s2 {
        of(LocationType::DownOverlapped, 0.0)
    } else {
        LocationClassification::undetermined()
    }
}
