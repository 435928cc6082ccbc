use super::PersistenceError;
use crate::condition::ConditionSourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CategorizationError {
    #[error("failure reading conditions: {source}")]
    ConditionSourceError {
        #[from]
        source: ConditionSourceError,
    },
    #[error("failure persisting categorization: {source}")]
    PersistenceError {
        #[from]
        source: PersistenceError,
    },
    #[error("no weather station near route '{0}' has enough readings")]
    NoWeatherStation(String),
    #[error("route '{0}' has no nodes")]
    EmptyRoute(String),
}
