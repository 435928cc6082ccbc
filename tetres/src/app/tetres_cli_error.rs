use crate::categorization::PersistenceError;
use crate::condition::ConditionSourceError;
use crate::filter::FilterError;
use crate::reliability::ReliabilityError;
use crate::worker::WorkerError;
use tetres_core::geometry::GeometryError;
use tetres_core::model::TrafficDataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TetresCliError {
    #[error("{0}")]
    ConfigurationError(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("failure reading {0}: {1}")]
    ReadError(String, String),
    #[error("failure writing {0}: {1}")]
    WriteError(String, String),
    #[error("failure reading traffic data: {source}")]
    TrafficDataError {
        #[from]
        source: TrafficDataError,
    },
    #[error("invalid corridor network: {source}")]
    GeometryError {
        #[from]
        source: GeometryError,
    },
    #[error("failure reading conditions: {source}")]
    ConditionSourceError {
        #[from]
        source: ConditionSourceError,
    },
    #[error("invalid filter: {source}")]
    FilterError {
        #[from]
        source: FilterError,
    },
    #[error("failure reading categorization rows: {source}")]
    PersistenceError {
        #[from]
        source: PersistenceError,
    },
    #[error("failure computing reliability: {source}")]
    ReliabilityError {
        #[from]
        source: ReliabilityError,
    },
    #[error("worker pool failure: {source}")]
    WorkerError {
        #[from]
        source: WorkerError,
    },
}
