use super::{BatchId, SharedCounters, WorkHandler, WorkUnit, WorkerError};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// a FIFO of work units consumed by `n_workers` threads. a unit that fails
/// or panics is logged and still counts towards its batch; the worker moves
/// on to the next unit.
pub struct TaskQueue {
    sender: Option<Sender<WorkUnit>>,
    workers: Vec<JoinHandle<()>>,
    counters: Arc<SharedCounters>,
}

impl TaskQueue {
    pub fn new<H: WorkHandler + 'static>(
        n_workers: usize,
        handler: Arc<H>,
    ) -> Result<TaskQueue, WorkerError> {
        let (sender, receiver) = channel::<WorkUnit>();
        let receiver = Arc::new(Mutex::new(receiver));
        let counters = Arc::new(SharedCounters::new());
        let mut workers = Vec::with_capacity(n_workers);
        for idx in 0..n_workers.max(1) {
            let receiver = receiver.clone();
            let counters = counters.clone();
            let handler = handler.clone();
            let worker = std::thread::Builder::new()
                .name(format!("tetres-worker-{idx}"))
                .spawn(move || worker_loop(receiver, handler, counters))
                .map_err(WorkerError::SpawnError)?;
            workers.push(worker);
        }
        log::info!("started {} workers", workers.len());
        Ok(TaskQueue {
            sender: Some(sender),
            workers,
            counters,
        })
    }

    pub fn n_workers(&self) -> usize {
        self.workers.len()
    }

    pub fn counters(&self) -> Arc<SharedCounters> {
        self.counters.clone()
    }

    /// enqueues the units of one batch. the batch counter is registered
    /// before any unit becomes visible to the workers.
    pub fn submit_batch(&self, units: Vec<WorkUnit>) -> Result<BatchId, WorkerError> {
        let sender = self.sender.as_ref().ok_or(WorkerError::QueueClosed)?;
        let batch = match units.first() {
            Some(u) => u.batch,
            None => return Err(WorkerError::EmptyBatch(BatchId(0))),
        };
        if let Some(u) = units.iter().find(|u| u.batch != batch) {
            return Err(WorkerError::MixedBatch {
                expected: batch,
                found: u.batch,
            });
        }
        send_batch(sender, &self.counters, batch, units)?;
        Ok(batch)
    }

    /// stops accepting work, lets the workers drain the queue and waits for
    /// them to exit
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        // workers exit once the channel is empty and disconnected
        self.sender.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                log::error!("worker thread exited abnormally");
            }
        }
    }
}

/// registers the units with the counters and sends them in order. if the
/// channel is closed part way, the unsent units are withdrawn again.
fn send_batch(
    sender: &Sender<WorkUnit>,
    counters: &SharedCounters,
    batch: BatchId,
    units: Vec<WorkUnit>,
) -> Result<(), WorkerError> {
    let n_units = units.len();
    counters.register(batch, n_units);
    for (idx, unit) in units.into_iter().enumerate() {
        if sender.send(unit).is_err() {
            // workers are gone, nothing will complete the rest
            log::error!("task queue closed after {idx} units of batch {batch}");
            counters.withdraw(batch, n_units - idx);
            return Err(WorkerError::QueueClosed);
        }
    }
    Ok(())
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        self.close();
    }
}

fn worker_loop<H: WorkHandler>(
    receiver: Arc<Mutex<Receiver<WorkUnit>>>,
    handler: Arc<H>,
    counters: Arc<SharedCounters>,
) {
    loop {
        let next = {
            let receiver = receiver
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            receiver.recv()
        };
        let Ok(unit) = next else {
            break;
        };
        let outcome = catch_unwind(AssertUnwindSafe(|| handler.handle(&unit)));
        match outcome {
            Ok(Ok(())) => log::debug!(
                "finished {} for route '{}' from {}",
                unit.task,
                unit.route.name,
                unit.period.start
            ),
            Ok(Err(e)) => log::error!(
                "{} for route '{}' from {} failed: {}",
                unit.task,
                unit.route.name,
                unit.period.start,
                e
            ),
            Err(_) => log::error!(
                "{} for route '{}' from {} panicked",
                unit.task,
                unit.route.name,
                unit.period.start
            ),
        }
        if counters.complete_one(unit.batch) {
            let batch = unit.batch;
            if catch_unwind(AssertUnwindSafe(|| handler.on_batch_complete(batch))).is_err() {
                log::error!("completion callback of batch {batch} panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::TaskKind;
    use chrono::NaiveDateTime;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tetres_core::model::{Period, Route, RouteId};

    #[derive(Default)]
    struct CountingHandler {
        handled: AtomicUsize,
        completed: Mutex<Vec<BatchId>>,
    }

    impl WorkHandler for CountingHandler {
        fn handle(&self, unit: &WorkUnit) -> Result<(), WorkerError> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            match unit.period.interval {
                1 => Err(WorkerError::HandlerError(String::from("bad unit"))),
                2 => panic!("unit panicked"),
                _ => Ok(()),
            }
        }

        fn on_batch_complete(&self, batch: BatchId) {
            self.completed
                .lock()
                .expect("test invariant failed")
                .push(batch);
        }
    }

    fn units(batch: BatchId, intervals: &[u32]) -> Vec<WorkUnit> {
        let start = NaiveDateTime::parse_from_str("2024-02-06 07:00", "%Y-%m-%d %H:%M")
            .expect("test invariant failed");
        let route = Arc::new(Route::new(RouteId(1), "r", vec![]));
        intervals
            .iter()
            .map(|interval| WorkUnit {
                route: route.clone(),
                period: Period::new(start, start, *interval),
                task: TaskKind::TravelTime,
                batch,
            })
            .collect()
    }

    #[test]
    fn test_failed_units_complete_their_batch() {
        let handler = Arc::new(CountingHandler::default());
        let queue = TaskQueue::new(3, handler.clone()).expect("test invariant failed");
        let a = BatchId::next();
        let b = BatchId::next();
        queue
            .submit_batch(units(a, &[300, 1, 2, 300]))
            .expect("test invariant failed");
        queue
            .submit_batch(units(b, &[300; 6]))
            .expect("test invariant failed");
        let counters = queue.counters();
        queue.shutdown();

        assert_eq!(handler.handled.load(Ordering::SeqCst), 10);
        let mut completed = handler
            .completed
            .lock()
            .expect("test invariant failed")
            .clone();
        completed.sort();
        assert_eq!(completed, vec![a, b]);
        assert!(counters.is_idle());
    }

    #[test]
    fn test_closed_channel_withdraws_unsent_units() {
        let (sender, receiver) = channel();
        drop(receiver);
        let counters = SharedCounters::new();
        let batch = BatchId(200);
        assert!(matches!(
            send_batch(&sender, &counters, batch, units(batch, &[300; 4])),
            Err(WorkerError::QueueClosed)
        ));
        assert_eq!(counters.remaining(batch), 0);
        assert!(counters.is_idle());
    }

    #[test]
    fn test_mixed_batch_rejected() {
        let handler = Arc::new(CountingHandler::default());
        let queue = TaskQueue::new(1, handler).expect("test invariant failed");
        let mut mixed = units(BatchId(100), &[300]);
        mixed.extend(units(BatchId(101), &[300]));
        assert!(matches!(
            queue.submit_batch(mixed),
            Err(WorkerError::MixedBatch { .. })
        ));
        assert!(matches!(
            queue.submit_batch(vec![]),
            Err(WorkerError::EmptyBatch(_))
        ));
    }
}
