use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// percentiles reported for buffer and planning time indices
pub const RELIABILITY_PERCENTILES: [u32; 4] = [80, 85, 90, 95];

/// travel time reliability measures over a set of samples. travel times are
/// in minutes, rates in minutes per mile. maps are keyed by percentile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilitySummary {
    pub count: usize,
    pub mean_travel_time: f64,
    pub median_travel_time: f64,
    pub travel_time_rate: f64,
    pub free_flow_travel_time: f64,
    pub congested_hour_factor: f64,
    pub congested_count: usize,
    /// mean of the congested travel times, absent when none are congested
    pub congested_mean_travel_time: Option<f64>,
    /// congested mean over free-flow time
    pub travel_time_index: Option<f64>,
    /// 97.5th percentile over free-flow time
    pub misery_index: f64,
    /// 50th percentile plus each of [`RELIABILITY_PERCENTILES`]
    pub percentile_travel_times: BTreeMap<u32, f64>,
    pub percentile_travel_time_rates: BTreeMap<u32, f64>,
    /// excess of the percentile over the mean, relative to the mean, never negative
    pub buffer_index: BTreeMap<u32, f64>,
    /// as `buffer_index` but relative to the median
    pub buffer_index_median: BTreeMap<u32, f64>,
    pub planning_time_index: BTreeMap<u32, f64>,
    /// level of travel time reliability, 80th over 50th percentile
    pub lottr: f64,
    pub on_time_arrival: f64,
    pub on_time_arrival_count: usize,
    pub semi_variance: Option<f64>,
    pub semi_variance_count: usize,
}
