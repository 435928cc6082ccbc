use serde::{Deserialize, Serialize};

/// route level congestion measures for one timestamp, summed over the
/// virtual nodes with gaps skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoeSummary {
    pub vmt: f64,
    pub vht: f64,
    pub lvmt: f64,
    pub uvmt: f64,
    pub dvh: f64,
    pub cm: f64,
    pub cmh: f64,
}

impl MoeSummary {
    /// share of the route that is congested, in percent
    pub fn congested_percent(&self, route_length: f64) -> f64 {
        if route_length <= 0.0 {
            return 0.0;
        }
        self.cm / route_length * 100.0
    }
}
