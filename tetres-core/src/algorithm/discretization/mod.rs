mod discretized_route;
mod virtual_node;

pub use discretized_route::DiscretizedRoute;
pub use virtual_node::VirtualNode;
