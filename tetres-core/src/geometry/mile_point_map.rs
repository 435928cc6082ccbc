use super::mile_point_ops;
use crate::model::{Corridor, RouteNode};
use std::collections::HashMap;

/// node name to mile point over one or more concatenated corridors.
#[derive(Debug, Clone, Default)]
pub struct MilePointMap {
    mile_points: HashMap<String, f64>,
    total: f64,
}

impl MilePointMap {
    pub fn for_nodes(nodes: &[RouteNode]) -> MilePointMap {
        let mut map = MilePointMap::default();
        map.append(nodes);
        map
    }

    /// concatenates the corridors in order. each corridor's mile points are
    /// offset by the last mile point of the corridor before it.
    pub fn for_corridors(corridors: &[&Corridor]) -> MilePointMap {
        let mut map = MilePointMap::default();
        for corridor in corridors.iter() {
            map.append(&corridor.nodes);
        }
        map
    }

    fn append(&mut self, nodes: &[RouteNode]) {
        let offset = self.total;
        let mut last = offset;
        for (node, mp) in mile_point_ops::mile_points(nodes) {
            last = mp + offset;
            self.mile_points.insert(node.name.clone(), last);
        }
        self.total = last;
    }

    pub fn get(&self, node_name: &str) -> Option<f64> {
        self.mile_points.get(node_name).copied()
    }

    pub fn len(&self) -> usize {
        self.mile_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mile_points.is_empty()
    }

    /// mile point of the last node appended
    pub fn total(&self) -> f64 {
        self.total
    }
}
