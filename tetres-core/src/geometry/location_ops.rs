use super::{
    classify_mile_points, geo_ops, CorridorNetwork, GeometryError, LocationClassification,
    MilePointMap,
};
use crate::model::{Route, RouteNode};

/// search radius in miles when snapping a coordinate to a corridor node
pub const NEARBY_NODE_LIMIT: f64 = 1.0;

/// classifies `guest` relative to `host` on their shared mile point map.
/// unresolvable endpoints (disjoint corridors, missing nodes) give an
/// undetermined classification; callers skip such guests.
pub fn classify(host: &Route, guest: &Route, network: &CorridorNetwork) -> LocationClassification {
    match try_classify(host, guest, network) {
        Ok(loc) => loc,
        Err(e) => {
            log::debug!(
                "unable to locate route '{}' relative to route '{}': {}",
                guest.name,
                host.name,
                e
            );
            LocationClassification::undetermined()
        }
    }
}

fn try_classify(
    host: &Route,
    guest: &Route,
    network: &CorridorNetwork,
) -> Result<LocationClassification, GeometryError> {
    let map = network.mile_point_map(host, guest)?;
    let (s1, e1) = endpoints(host, &map)?;
    let (s2, e2) = endpoints(guest, &map)?;
    Ok(classify_mile_points(s1, e1, s2, e2))
}

fn endpoints(route: &Route, map: &MilePointMap) -> Result<(f64, f64), GeometryError> {
    let first = route.upstream_node().ok_or(GeometryError::EmptyRoute)?;
    let last = route.downstream_node().ok_or(GeometryError::EmptyRoute)?;
    let lookup = |n: &RouteNode| {
        map.get(&n.name)
            .ok_or_else(|| GeometryError::UnresolvedNode(n.name.clone()))
    };
    Ok((lookup(first)?, lookup(last)?))
}

/// signed along-corridor distance in miles from the route's upstream node to
/// a coordinate, negative when the coordinate lies upstream of the route.
/// only the corridor of the route's upstream node is searched.
pub fn location_by_coordinate(
    route: &Route,
    lat: f64,
    lon: f64,
    network: &CorridorNetwork,
) -> Option<f64> {
    let upstream = route.upstream_node()?;
    let corridor = network.corridor(&upstream.corridor).ok()?;
    let map = MilePointMap::for_nodes(&corridor.nodes);
    let origin = map.get(&upstream.name)?;
    let (up, down) = find_updown_nodes(lat, lon, &corridor.nodes, NEARBY_NODE_LIMIT);

    let from_up = up.and_then(|n| {
        map.get(&n.name)
            .map(|mp| mp + geo_ops::distance_to_coordinate(n, lat, lon))
    });
    let from_down = down.and_then(|n| {
        map.get(&n.name)
            .map(|mp| mp - geo_ops::distance_to_coordinate(n, lat, lon))
    });
    let position = match (from_up, from_down) {
        (Some(u), _) if u >= origin => Some(u),
        (_, Some(d)) => Some(d),
        (Some(u), None) => Some(u),
        (None, None) => None,
    }?;
    Some(position - origin)
}

/// minimum great-circle distance in miles from any route node to a coordinate
pub fn minimum_distance(route: &Route, lat: f64, lon: f64) -> f64 {
    route
        .nodes
        .iter()
        .map(|n| geo_ops::distance_to_coordinate(n, lat, lon))
        .fold(f64::INFINITY, f64::min)
}

/// nearest node to the coordinate within `limit` miles
pub fn nearby_node(lat: f64, lon: f64, nodes: &[RouteNode], limit: f64) -> Option<(usize, f64)> {
    nodes
        .iter()
        .enumerate()
        .map(|(idx, n)| (idx, geo_ops::distance_to_coordinate(n, lat, lon)))
        .filter(|(_, d)| *d <= limit)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// the pair of consecutive nodes bracketing a coordinate. the nearest node is
/// paired with its upstream neighbour when the angle at the nearest node
/// between the coordinate and that neighbour is at most 90 degrees, and with
/// its downstream neighbour otherwise.
pub fn find_updown_nodes<'a>(
    lat: f64,
    lon: f64,
    nodes: &'a [RouteNode],
    limit: f64,
) -> (Option<&'a RouteNode>, Option<&'a RouteNode>) {
    if nodes.len() < 2 {
        return (None, None);
    }
    let Some((nb_idx, _)) = nearby_node(lat, lon, nodes, limit) else {
        return (None, None);
    };
    let nb = &nodes[nb_idx];
    let ref_idx = if nb_idx > 0 { nb_idx - 1 } else { nb_idx + 1 };
    let reference = &nodes[ref_idx];

    let a = (nb.lat - lat).powi(2) + (nb.lon - lon).powi(2);
    let b = (nb.lat - reference.lat).powi(2) + (nb.lon - reference.lon).powi(2);
    let c = (reference.lat - lat).powi(2) + (reference.lon - lon).powi(2);
    let angle = if a * b > 0.0 {
        ((a + b - c) / (4.0 * a * b).sqrt()).clamp(-1.0, 1.0).acos().to_degrees()
    } else {
        0.0
    };

    if nb_idx > 0 {
        if angle <= 90.0 {
            (Some(reference), Some(nb))
        } else {
            (Some(nb), nodes.get(nb_idx + 1))
        }
    } else if angle <= 90.0 {
        (Some(nb), Some(reference))
    } else {
        (None, Some(nb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Corridor, CorridorId, RouteId, RouteNodeType};

    fn node(name: &str, corridor: &str, lat: f64) -> RouteNode {
        RouteNode {
            name: String::from(name),
            corridor: CorridorId::from(corridor),
            node_type: RouteNodeType::Station,
            station_id: Some(format!("S_{name}")),
            lat,
            lon: -93.0,
            lanes: 2,
            speed_limit: 55.0,
        }
    }

    fn network() -> CorridorNetwork {
        let nodes = (0..10)
            .map(|i| node(&format!("n{i}"), "c1", 45.0 + 0.01 * i as f64))
            .collect();
        let other = vec![node("x0", "c2", 46.0), node("x1", "c2", 46.01)];
        CorridorNetwork::new(vec![
            Corridor::new(CorridorId::from("c1"), nodes),
            Corridor::new(CorridorId::from("c2"), other),
        ])
        .expect("test invariant failed")
    }

    fn sub_route(network: &CorridorNetwork, from: usize, to: usize) -> Route {
        let corridor = network
            .corridor(&CorridorId::from("c1"))
            .expect("test invariant failed");
        Route::new(RouteId(from as u64), "r", corridor.nodes[from..=to].to_vec())
    }

    #[test]
    fn test_classify_routes_on_shared_corridor() {
        let network = network();
        let host = sub_route(&network, 2, 7);
        let guest = sub_route(&network, 3, 4);
        let loc = classify(&host, &guest, &network);
        assert_eq!(loc.kind, crate::geometry::LocationType::Inside);
        assert!(loc.distance < 0.0);

        let downstream = sub_route(&network, 8, 9);
        let loc = classify(&host, &downstream, &network);
        assert_eq!(loc.kind, crate::geometry::LocationType::Down);
        assert!(loc.off_distance > 0.0);
    }

    #[test]
    fn test_unknown_corridor_is_undetermined() {
        let network = network();
        let host = sub_route(&network, 0, 3);
        let guest = Route::new(
            RouteId(99),
            "g",
            vec![node("zz", "c3", 47.0), node("zy", "c3", 47.01)],
        );
        let loc = classify(&host, &guest, &network);
        assert!(!loc.is_determined());
    }

    #[test]
    fn test_location_by_coordinate() {
        let network = network();
        let route = sub_route(&network, 2, 7);
        // a point half way between n4 and n5
        let d = location_by_coordinate(&route, 45.045, -93.0, &network)
            .expect("point is near the corridor");
        let expected = 0.025 * 69.09;
        assert!((d - expected).abs() < 0.01, "{d} vs {expected}");

        // a point upstream of the route start
        let d = location_by_coordinate(&route, 45.005, -93.0, &network)
            .expect("point is near the corridor");
        assert!(d < 0.0);

        assert!(location_by_coordinate(&route, 50.0, -93.0, &network).is_none());
    }

    #[test]
    fn test_minimum_distance() {
        let network = network();
        let route = sub_route(&network, 2, 7);
        let d = minimum_distance(&route, 45.02, -93.0);
        assert!(d < 1e-9);
    }
}
