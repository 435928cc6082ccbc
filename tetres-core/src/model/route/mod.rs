mod corridor;
mod corridor_id;
mod route;
mod route_id;
mod route_node;

pub use corridor::Corridor;
pub use corridor_id::CorridorId;
pub use route::Route;
pub use route_id::RouteId;
pub use route_node::{RouteNode, RouteNodeType};
