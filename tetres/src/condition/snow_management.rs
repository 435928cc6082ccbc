use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tetres_core::Route;

/// a plow route truck station, covering both directions of a roadway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowRoute {
    pub id: u64,
    pub name: String,
    pub route1: Route,
    pub route2: Route,
}

/// the interval during which a snow route lost lane capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowManagement {
    pub id: u64,
    pub lane_lost_time: NaiveDateTime,
    pub lane_regain_time: NaiveDateTime,
    pub snow_route: SnowRoute,
}

impl SnowManagement {
    /// half open: `[lane_lost_time, lane_regain_time)`
    pub fn is_active_at(&self, time: &NaiveDateTime) -> bool {
        self.lane_lost_time <= *time && *time < self.lane_regain_time
    }
}
