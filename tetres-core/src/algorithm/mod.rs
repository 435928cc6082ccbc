pub mod discretization;
pub mod imputation;
pub mod moe;
pub mod travel_time;

/// distance in miles between consecutive virtual nodes
pub const VIRTUAL_NODE_SPACING: f64 = 0.1;

pub const SECONDS_PER_HOUR: f64 = 3600.0;
