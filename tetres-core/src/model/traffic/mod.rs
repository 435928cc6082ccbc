mod traffic_data_error;
mod traffic_grid;
mod traffic_reader;
mod traffic_variable;

pub use traffic_data_error::TrafficDataError;
pub use traffic_grid::{is_missing, TrafficMetricGrid, MISSING_VALUE};
pub use traffic_reader::{InMemoryTrafficReader, TrafficDataReader};
pub use traffic_variable::TrafficVariable;
