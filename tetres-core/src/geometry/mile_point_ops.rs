use super::geo_ops;
use crate::model::RouteNode;
use ordered_float::OrderedFloat;
use std::collections::HashSet;

/// cumulative great-circle miles from the first node to each node. a node
/// whose mile point collides with an earlier node (zero-length hop) is nudged
/// downstream by a relative epsilon until its key is unique.
pub fn mile_points(nodes: &[RouteNode]) -> Vec<(&RouteNode, f64)> {
    let mut seen: HashSet<OrderedFloat<f64>> = HashSet::new();
    let mut miles = 0.0;
    let mut result = Vec::with_capacity(nodes.len());
    for (idx, node) in nodes.iter().enumerate() {
        if idx > 0 {
            miles += geo_ops::distance_in_miles(&nodes[idx - 1], node);
        }
        while seen.contains(&OrderedFloat(miles)) {
            miles += epsilon(miles);
        }
        seen.insert(OrderedFloat(miles));
        result.push((node, miles));
    }
    result
}

fn epsilon(v: f64) -> f64 {
    if v != 0.0 {
        v * 1e-7
    } else {
        1e-7
    }
}
