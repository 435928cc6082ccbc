//! a fixed pool of OS threads consuming (route, period) units of work.
mod batch_id;
mod shared_counters;
mod task_queue;
mod work_handler;
mod work_unit;
mod worker_error;

pub use batch_id::BatchId;
pub use shared_counters::SharedCounters;
pub use task_queue::TaskQueue;
pub use work_handler::WorkHandler;
pub use work_unit::{TaskKind, WorkUnit};
pub use worker_error::WorkerError;
