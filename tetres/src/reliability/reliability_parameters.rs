use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityParameters {
    /// a travel time above free-flow time times this factor is congested
    #[serde(default = "default_congested_hour_factor")]
    pub congested_hour_factor: f64,
    /// arrivals within this multiple of the median travel time are on time
    #[serde(default = "default_on_time_rate")]
    pub on_time_rate: f64,
    /// semi-variance is reported only when more samples than this lie above the mean
    #[serde(default = "default_semi_variance_min_count")]
    pub semi_variance_min_count: usize,
}

fn default_congested_hour_factor() -> f64 {
    1.3
}

fn default_on_time_rate() -> f64 {
    1.5
}

fn default_semi_variance_min_count() -> usize {
    10
}

impl Default for ReliabilityParameters {
    fn default() -> Self {
        Self {
            congested_hour_factor: default_congested_hour_factor(),
            on_time_rate: default_on_time_rate(),
            semi_variance_min_count: default_semi_variance_min_count(),
        }
    }
}
