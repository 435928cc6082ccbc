use super::{BatchId, WorkUnit, WorkerError};

/// the work performed by the pool. both methods are called from worker
/// threads.
pub trait WorkHandler: Send + Sync {
    fn handle(&self, unit: &WorkUnit) -> Result<(), WorkerError>;

    /// called once, after the last unit of `batch` finished
    fn on_batch_complete(&self, _batch: BatchId) {}
}
