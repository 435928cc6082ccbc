use super::{CorridorId, RouteNode};
use serde::{Deserialize, Serialize};

/// a full freeway corridor: every node on the corridor, upstream to downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: CorridorId,
    pub nodes: Vec<RouteNode>,
}

impl Corridor {
    pub fn new(id: CorridorId, nodes: Vec<RouteNode>) -> Corridor {
        Corridor { id, nodes }
    }

    pub fn position_of(&self, node_name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == node_name)
    }
}
