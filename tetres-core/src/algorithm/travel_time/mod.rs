mod travel_time_ops;
mod travel_time_parameters;
mod travel_time_walk;

pub use travel_time_ops::{compute_travel_time, compute_travel_time_with_moe, read_speed_grid};
pub use travel_time_parameters::TravelTimeParameters;
pub use travel_time_walk::{walk, WalkResult};
