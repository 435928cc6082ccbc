mod period;
pub mod route;
pub mod traffic;
mod travel_time_sample;

pub use period::{Period, PeriodIter};
pub use route::{Corridor, CorridorId, Route, RouteId, RouteNode, RouteNodeType};
pub use traffic::{
    is_missing, InMemoryTrafficReader, TrafficDataError, TrafficDataReader, TrafficMetricGrid,
    TrafficVariable, MISSING_VALUE,
};
pub use travel_time_sample::{SampleId, TravelTimeSample};
