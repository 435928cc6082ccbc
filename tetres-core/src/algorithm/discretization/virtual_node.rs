use serde::{Deserialize, Serialize};

/// one row of a discretized route. real stations and the synthetic nodes
/// inserted between them share this shape; `source` points at the station
/// whose measurements the row carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualNode {
    /// index into the route's station list
    pub source: usize,
    pub mile_point: f64,
    pub lanes: u32,
    pub speed_limit: f64,
    pub is_virtual: bool,
}
