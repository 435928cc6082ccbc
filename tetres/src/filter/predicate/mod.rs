//! prebuilt filters for each condition class.
pub mod incident;
pub mod snow_management;
pub mod special_event;
pub mod weather;
pub mod work_zone;

mod baseline;

pub use baseline::explicit_normal_day;
