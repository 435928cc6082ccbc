mod corridor_network;
pub mod geo_ops;
mod geometry_error;
mod location_classification;
pub mod location_ops;
mod location_type;
mod mile_point_map;
pub mod mile_point_ops;

pub use corridor_network::CorridorNetwork;
pub use geometry_error::GeometryError;
pub use location_classification::{classify_mile_points, LocationClassification};
pub use location_type::LocationType;
pub use mile_point_map::MilePointMap;
