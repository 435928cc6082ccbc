use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a time-varying detector measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficVariable {
    /// miles per hour
    Speed,
    /// vehicles per hour across all lanes
    TotalFlow,
    /// vehicles per mile per lane
    Density,
}

impl Display for TrafficVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TrafficVariable::Speed => "speed",
            TrafficVariable::TotalFlow => "total_flow",
            TrafficVariable::Density => "density",
        };
        write!(f, "{s}")
    }
}
