use tetres_core::model::TrafficDataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReliabilityError {
    #[error("route cannot be discretized: {source}")]
    RouteError {
        #[from]
        source: TrafficDataError,
    },
    #[error("station '{0}' has no positive speed limit")]
    InvalidSpeedLimit(String),
}
