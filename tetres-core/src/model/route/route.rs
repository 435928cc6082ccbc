use super::{CorridorId, RouteId, RouteNode};
use crate::geometry::{geo_ops, mile_point_ops};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// an ordered sequence of roadway nodes, upstream to downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub nodes: Vec<RouteNode>,
}

impl Route {
    pub fn new(id: RouteId, name: &str, nodes: Vec<RouteNode>) -> Route {
        Route {
            id,
            name: String::from(name),
            nodes,
        }
    }

    /// route length in miles as the sum of great-circle distances between
    /// consecutive nodes.
    pub fn length(&self) -> f64 {
        self.nodes
            .iter()
            .tuple_windows()
            .map(|(a, b)| geo_ops::distance_in_miles(a, b))
            .sum()
    }

    pub fn upstream_node(&self) -> Option<&RouteNode> {
        self.nodes.first()
    }

    pub fn downstream_node(&self) -> Option<&RouteNode> {
        self.nodes.last()
    }

    pub fn stations(&self) -> Vec<&RouteNode> {
        self.nodes.iter().filter(|n| n.is_station()).collect_vec()
    }

    /// distinct corridors traversed by this route, in traversal order.
    pub fn corridors(&self) -> Vec<&CorridorId> {
        self.nodes.iter().map(|n| &n.corridor).unique().collect_vec()
    }

    /// (lat, lon) of the point half way along the route, interpolated as the
    /// midpoint of the two nodes that straddle half of the route length.
    pub fn center_coordinates(&self) -> Option<(f64, f64)> {
        let mile_points = mile_point_ops::mile_points(&self.nodes);
        let (_, last_mp) = mile_points.last()?;
        let center = last_mp / 2.0;
        let mut prev: Option<&RouteNode> = None;
        for (node, mp) in mile_points.iter() {
            if *mp > center {
                return match prev {
                    Some(p) => Some(((p.lat + node.lat) / 2.0, (p.lon + node.lon) / 2.0)),
                    None => Some((node.lat, node.lon)),
                };
            }
            prev = Some(node);
        }
        prev.map(|n| (n.lat, n.lon))
    }
}
