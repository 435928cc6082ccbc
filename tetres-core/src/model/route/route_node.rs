use super::CorridorId;
use geo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteNodeType {
    Station,
    Entrance,
    Exit,
}

/// a roadway node along a corridor. the node name is unique across the
/// corridor network and is used as the key for mile point lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    pub name: String,
    pub corridor: CorridorId,
    pub node_type: RouteNodeType,
    /// detector station id, only present for stations
    #[serde(default)]
    pub station_id: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub lanes: u32,
    /// posted speed limit in miles per hour
    pub speed_limit: f64,
}

impl RouteNode {
    pub fn is_station(&self) -> bool {
        self.node_type == RouteNodeType::Station
    }

    /// node location as an (x=lon, y=lat) point
    pub fn get_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}
