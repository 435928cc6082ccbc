use thiserror::Error;

use super::TrafficVariable;

#[derive(Error, Debug)]
pub enum TrafficDataError {
    #[error("no {1} data for station '{0}'")]
    MissingStationData(String, TrafficVariable),
    #[error("route has no detector stations")]
    NoStations,
    #[error("grid row {row} has {found} values, expected {expected}")]
    GridShapeMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("grids have mismatched dimensions: {0}")]
    GridCardinalityMismatch(String),
    #[error("failure reading traffic data: {0}")]
    ReadError(String),
}
