mod reliability_error;
mod reliability_ops;
mod reliability_parameters;
mod reliability_summary;

pub use reliability_error::ReliabilityError;
pub use reliability_ops::{free_flow_travel_time, percentile, reliability_summary, summarize};
pub use reliability_parameters::ReliabilityParameters;
pub use reliability_summary::{ReliabilitySummary, RELIABILITY_PERCENTILES};
