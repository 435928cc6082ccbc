use serde::{Deserialize, Serialize};

/// thresholds shared by the congestion measures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MoeParameters {
    /// vehicles per mile per lane
    pub critical_density: f64,
    /// vehicles per hour per lane
    pub lane_capacity: f64,
    /// miles per hour; slower cells count as congested
    pub congestion_threshold_speed: f64,
}

impl Default for MoeParameters {
    fn default() -> Self {
        Self {
            critical_density: 40.0,
            lane_capacity: 2200.0,
            congestion_threshold_speed: 45.0,
        }
    }
}
