use crate::model::RouteNode;
use geo::{Distance, Haversine, Point};

pub const METERS_PER_MILE: f64 = 1609.344;

/// great-circle distance between two nodes in miles
pub fn distance_in_miles(a: &RouteNode, b: &RouteNode) -> f64 {
    Haversine.distance(a.get_point(), b.get_point()) / METERS_PER_MILE
}

/// great-circle distance in miles between a node and an arbitrary coordinate
pub fn distance_to_coordinate(node: &RouteNode, lat: f64, lon: f64) -> f64 {
    Haversine.distance(node.get_point(), Point::new(lon, lat)) / METERS_PER_MILE
}

pub fn distance_between_coordinates(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Haversine.distance(Point::new(lon1, lat1), Point::new(lon2, lat2)) / METERS_PER_MILE
}
