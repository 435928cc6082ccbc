use super::BatchId;
use crate::categorization::CategorizationError;
use tetres_core::model::TrafficDataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("failure spawning worker thread: {0}")]
    SpawnError(std::io::Error),
    #[error("task queue is closed")]
    QueueClosed,
    #[error("batch {0} has no work units")]
    EmptyBatch(BatchId),
    #[error("work units of batch {expected} submitted with batch {found}")]
    MixedBatch { expected: BatchId, found: BatchId },
    #[error("failure computing travel time: {source}")]
    TrafficDataError {
        #[from]
        source: TrafficDataError,
    },
    #[error("failure categorizing: {source}")]
    CategorizationError {
        #[from]
        source: CategorizationError,
    },
    #[error("{0}")]
    HandlerError(String),
}
