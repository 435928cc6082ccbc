use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tetres_core::Route;

/// lane closure attributes for one direction of a work zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkZoneFeature {
    /// 1 or 2, selecting `route1` or `route2` of the work zone
    pub route_num: u8,
    /// miles
    #[serde(default)]
    pub closed_length: f64,
    #[serde(default)]
    pub has_closed: bool,
    #[serde(default)]
    pub has_shift: bool,
    #[serde(default)]
    pub use_opposing_lane: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkZoneLaneConfig {
    pub route_num: u8,
    pub origin_lanes: u32,
    pub open_lanes: u32,
}

/// a scheduled work zone spanning two directional sub-routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkZone {
    pub id: u64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub route1: Route,
    pub route2: Route,
    #[serde(default)]
    pub features: Vec<WorkZoneFeature>,
    #[serde(default)]
    pub lane_configs: Vec<WorkZoneLaneConfig>,
}

impl WorkZone {
    pub fn is_active_at(&self, time: &NaiveDateTime) -> bool {
        self.start <= *time && *time <= self.end
    }

    pub fn features_for(&self, route_num: u8) -> impl Iterator<Item = &WorkZoneFeature> {
        self.features.iter().filter(move |f| f.route_num == route_num)
    }

    pub fn lane_configs_for(&self, route_num: u8) -> impl Iterator<Item = &WorkZoneLaneConfig> {
        self.lane_configs
            .iter()
            .filter(move |c| c.route_num == route_num)
    }
}
