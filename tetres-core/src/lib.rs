pub mod algorithm;
pub mod geometry;
pub mod model;

pub use algorithm::moe::{compute_moe, MoeKind, MoeParameters, MoeSummary};
pub use algorithm::travel_time::{
    compute_travel_time, compute_travel_time_with_moe, TravelTimeParameters,
};
pub use geometry::{CorridorNetwork, LocationClassification, LocationType};
pub use model::{Period, Route, TrafficMetricGrid, TravelTimeSample, MISSING_VALUE};
