use super::VirtualNode;
use crate::algorithm::VIRTUAL_NODE_SPACING;
use crate::geometry::MilePointMap;
use crate::model::{
    Period, Route, RouteNode, TrafficDataError, TrafficDataReader, TrafficMetricGrid,
    TrafficVariable, MISSING_VALUE,
};
use rayon::prelude::*;

/// a route's detector stations resampled onto rows spaced
/// [`VIRTUAL_NODE_SPACING`] miles apart. between two stations, each inserted
/// node copies the nearer station, with ties going to the upstream station.
/// rows before the first station and after the last one extend the grid to
/// the ends of the route and copy the outermost station.
#[derive(Debug, Clone)]
pub struct DiscretizedRoute {
    stations: Vec<RouteNode>,
    nodes: Vec<VirtualNode>,
}

impl DiscretizedRoute {
    pub fn new(route: &Route) -> Result<DiscretizedRoute, TrafficDataError> {
        let stations: Vec<RouteNode> = route.stations().into_iter().cloned().collect();
        if stations.is_empty() {
            return Err(TrafficDataError::NoStations);
        }
        let mile_points = MilePointMap::for_nodes(&route.nodes);
        let station_mp = stations
            .iter()
            .map(|s| {
                mile_points.get(&s.name).ok_or_else(|| {
                    TrafficDataError::ReadError(format!("station '{}' has no mile point", s.name))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut nodes = vec![];
        let first = &stations[0];
        for k in (1..=extension_count(0.0, station_mp[0])).rev() {
            nodes.push(VirtualNode {
                source: 0,
                mile_point: station_mp[0] - k as f64 * VIRTUAL_NODE_SPACING,
                lanes: first.lanes,
                speed_limit: first.speed_limit,
                is_virtual: true,
            });
        }
        for (idx, station) in stations.iter().enumerate() {
            nodes.push(VirtualNode {
                source: idx,
                mile_point: station_mp[idx],
                lanes: station.lanes,
                speed_limit: station.speed_limit,
                is_virtual: false,
            });
            let Some(next) = stations.get(idx + 1) else {
                break;
            };
            let n_virtual = virtual_node_count(station_mp[idx], station_mp[idx + 1]);
            for k in 1..=n_virtual {
                // nearest station, upstream on ties
                let (source, src_node) = if 2 * k <= n_virtual + 1 {
                    (idx, station)
                } else {
                    (idx + 1, next)
                };
                nodes.push(VirtualNode {
                    source,
                    mile_point: station_mp[idx] + k as f64 * VIRTUAL_NODE_SPACING,
                    lanes: src_node.lanes,
                    speed_limit: src_node.speed_limit,
                    is_virtual: true,
                });
            }
        }
        let last_idx = stations.len() - 1;
        let last = &stations[last_idx];
        let last_mp = station_mp[last_idx];
        for k in 1..=extension_count(last_mp, route.length()) {
            nodes.push(VirtualNode {
                source: last_idx,
                mile_point: last_mp + k as f64 * VIRTUAL_NODE_SPACING,
                lanes: last.lanes,
                speed_limit: last.speed_limit,
                is_virtual: true,
            });
        }
        Ok(DiscretizedRoute { stations, nodes })
    }

    pub fn stations(&self) -> &[RouteNode] {
        &self.stations
    }

    pub fn nodes(&self) -> &[VirtualNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// distance in miles covered by the rows
    pub fn length(&self) -> f64 {
        VIRTUAL_NODE_SPACING * self.nodes.len().saturating_sub(1) as f64
    }

    /// expands per-station series into one row per node.
    pub fn expand(&self, station_series: &[Vec<f64>]) -> Result<TrafficMetricGrid, TrafficDataError> {
        if station_series.len() != self.stations.len() {
            return Err(TrafficDataError::GridCardinalityMismatch(format!(
                "{} station series for {} stations",
                station_series.len(),
                self.stations.len()
            )));
        }
        let rows = self
            .nodes
            .iter()
            .map(|n| station_series[n.source].clone())
            .collect();
        TrafficMetricGrid::new(rows)
    }

    /// reads `variable` for every station over `period` and expands it onto
    /// the node rows. zero speeds are detector gaps and become
    /// [`MISSING_VALUE`].
    pub fn read<R: TrafficDataReader + ?Sized>(
        &self,
        reader: &R,
        period: &Period,
        variable: TrafficVariable,
    ) -> Result<TrafficMetricGrid, TrafficDataError> {
        let expected = period.len();
        let series = self
            .stations
            .par_iter()
            .map(|station| {
                let mut values = reader.read(station, period, variable)?;
                if values.len() != expected {
                    return Err(TrafficDataError::ReadError(format!(
                        "station '{}' returned {} {} values for a period of {}",
                        station.name,
                        values.len(),
                        variable,
                        expected
                    )));
                }
                if variable == TrafficVariable::Speed {
                    for v in values.iter_mut().filter(|v| **v == 0.0) {
                        *v = MISSING_VALUE;
                    }
                }
                Ok(values)
            })
            .collect::<Result<Vec<_>, TrafficDataError>>()?;
        self.expand(&series)
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// number of virtual nodes between two stations at mile points `a` < `b`
pub fn virtual_node_count(a: f64, b: f64) -> usize {
    let steps = ((round1(b) - round1(a)) * 10.0).round() as i64 - 1;
    steps.max(0) as usize
}

/// number of rows needed to reach from a station at `a` to a route end at
/// `b`, or from a route start at `a` to a station at `b`
pub fn extension_count(a: f64, b: f64) -> usize {
    let steps = ((round1(b) - round1(a)) * 10.0).round() as i64;
    steps.max(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CorridorId, RouteId, RouteNodeType};

    fn station(name: &str, lat: f64, lanes: u32) -> RouteNode {
        RouteNode {
            name: String::from(name),
            corridor: CorridorId::from("c"),
            node_type: RouteNodeType::Station,
            station_id: Some(format!("S_{name}")),
            lat,
            lon: -93.0,
            lanes,
            speed_limit: 55.0,
        }
    }

    #[test]
    fn test_virtual_node_count() {
        assert_eq!(virtual_node_count(0.0, 0.5), 4);
        assert_eq!(virtual_node_count(0.0, 0.04), 0);
        assert_eq!(virtual_node_count(1.23, 1.31), 0);
        assert_eq!(virtual_node_count(0.0, 0.1), 0);
    }

    #[test]
    fn test_nearest_station_assignment() {
        // ~0.69 miles apart -> 6 virtual nodes, three from each side
        let route = Route::new(
            RouteId(1),
            "r",
            vec![station("a", 45.0, 2), station("b", 45.01, 3)],
        );
        let discretized = DiscretizedRoute::new(&route).expect("test invariant failed");
        let sources: Vec<usize> = discretized.nodes().iter().map(|n| n.source).collect();
        assert_eq!(sources, vec![0, 0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(discretized.nodes()[3].lanes, 2);
        assert_eq!(discretized.nodes()[4].lanes, 3);

        let grid = discretized
            .expand(&[vec![10.0, 11.0], vec![20.0, 21.0]])
            .expect("test invariant failed");
        assert_eq!(grid.n_rows(), 8);
        assert_eq!(grid.value(2, 1), 11.0);
        assert_eq!(grid.value(5, 0), 20.0);
    }

    #[test]
    fn test_odd_count_tie_goes_upstream() {
        // ~0.76 miles -> round1 0.8 -> 7 virtual nodes, middle one upstream
        let route = Route::new(
            RouteId(1),
            "r",
            vec![station("a", 45.0, 2), station("b", 45.011, 2)],
        );
        let discretized = DiscretizedRoute::new(&route).expect("test invariant failed");
        let sources: Vec<usize> = discretized.nodes().iter().map(|n| n.source).collect();
        assert_eq!(sources, vec![0, 0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_grid_reaches_route_ends() {
        // entrance ~0.69 miles upstream and exit ~0.35 miles downstream
        let mut entrance = station("ent", 44.99, 2);
        entrance.node_type = RouteNodeType::Entrance;
        entrance.station_id = None;
        let mut exit = station("ext", 45.015, 2);
        exit.node_type = RouteNodeType::Exit;
        exit.station_id = None;
        let route = Route::new(
            RouteId(1),
            "r",
            vec![entrance, station("a", 45.0, 2), station("b", 45.01, 3), exit],
        );
        let discretized = DiscretizedRoute::new(&route).expect("test invariant failed");
        let sources: Vec<usize> = discretized.nodes().iter().map(|n| n.source).collect();
        assert_eq!(
            sources,
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1]
        );
        assert!(discretized.nodes()[0].mile_point.abs() < 0.1);
        assert!((discretized.length() - route.length()).abs() <= 0.05 + 1e-9);
    }

    #[test]
    fn test_route_without_stations() {
        let mut node = station("a", 45.0, 2);
        node.node_type = RouteNodeType::Entrance;
        let route = Route::new(RouteId(1), "r", vec![node]);
        assert!(matches!(
            DiscretizedRoute::new(&route),
            Err(TrafficDataError::NoStations)
        ));
    }
}
