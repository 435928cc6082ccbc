use crate::algorithm::moe::MoeSummary;
use crate::model::RouteId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleId(pub u64);

impl Display for SampleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// route travel time for a departure at `time`. a travel time of
/// [`crate::MISSING_VALUE`] means the walk could not reach the end of the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimeSample {
    pub id: SampleId,
    pub route_id: RouteId,
    pub time: NaiveDateTime,
    /// minutes
    pub travel_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moe: Option<MoeSummary>,
}

impl TravelTimeSample {
    pub fn is_determined(&self) -> bool {
        self.travel_time >= 0.0
    }

    /// sample ids are derived from route and timestamp so that recomputing a
    /// period yields the same ids.
    pub fn derive_id(route_id: RouteId, time: &NaiveDateTime) -> SampleId {
        let secs = time.and_utc().timestamp() as u64;
        SampleId(route_id.0.wrapping_mul(10_000_000_000).wrapping_add(secs))
    }
}
