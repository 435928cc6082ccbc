use crate::categorization::{
    categorize, CategorizationContext, CategorizationResult, CategorizationStore, SharedLock,
    SuppliedConditions,
};
use crate::condition::ConditionSource;
use crate::config::TetresConfiguration;
use crate::worker::{BatchId, TaskKind, WorkHandler, WorkUnit, WorkerError};
use chrono::NaiveDateTime;
use kdam::{tqdm, Bar, BarExt};
use std::sync::{Arc, Mutex, MutexGuard};
use tetres_core::model::{TrafficDataReader, TravelTimeSample};
use tetres_core::{compute_travel_time_with_moe, CorridorNetwork};

/// computes travel times for each unit and, for categorization tasks,
/// categorizes them into the shared store.
pub struct TetresWorkHandler {
    network: Arc<CorridorNetwork>,
    traffic: Arc<dyn TrafficDataReader>,
    conditions: Arc<dyn ConditionSource>,
    store: Arc<dyn CategorizationStore>,
    lock: SharedLock,
    config: TetresConfiguration,
    samples: Mutex<Vec<TravelTimeSample>>,
    results: Mutex<Vec<(NaiveDateTime, CategorizationResult)>>,
    completed: Mutex<Vec<BatchId>>,
    progress: Mutex<Bar>,
}

fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TetresWorkHandler {
    pub fn new(
        network: Arc<CorridorNetwork>,
        traffic: Arc<dyn TrafficDataReader>,
        conditions: Arc<dyn ConditionSource>,
        store: Arc<dyn CategorizationStore>,
        config: TetresConfiguration,
        n_units: usize,
    ) -> TetresWorkHandler {
        TetresWorkHandler {
            network,
            traffic,
            conditions,
            store,
            lock: SharedLock::new(),
            config,
            samples: Mutex::new(vec![]),
            results: Mutex::new(vec![]),
            completed: Mutex::new(vec![]),
            progress: Mutex::new(tqdm!(total = n_units, desc = "tetres")),
        }
    }

    /// samples computed so far, ordered by route and time
    pub fn take_samples(&self) -> Vec<TravelTimeSample> {
        let mut samples = std::mem::take(&mut *lock_recover(&self.samples));
        samples.sort_by(|a, b| a.route_id.cmp(&b.route_id).then(a.time.cmp(&b.time)));
        samples
    }

    /// categorization outcome per period start
    pub fn take_results(&self) -> Vec<(NaiveDateTime, CategorizationResult)> {
        let mut results = std::mem::take(&mut *lock_recover(&self.results));
        results.sort_by_key(|(start, _)| *start);
        results
    }

    pub fn is_batch_complete(&self, batch: BatchId) -> bool {
        lock_recover(&self.completed).contains(&batch)
    }

    fn tick(&self) {
        if let Err(e) = lock_recover(&self.progress).update(1) {
            log::debug!("progress bar: {e}");
        }
    }
}

impl WorkHandler for TetresWorkHandler {
    fn handle(&self, unit: &WorkUnit) -> Result<(), WorkerError> {
        let outcome = self.run_unit(unit);
        self.tick();
        outcome
    }

    fn on_batch_complete(&self, batch: BatchId) {
        eprintln!();
        log::info!("batch {batch} complete");
        lock_recover(&self.completed).push(batch);
    }
}

impl TetresWorkHandler {
    fn run_unit(&self, unit: &WorkUnit) -> Result<(), WorkerError> {
        let samples = compute_travel_time_with_moe(
            &unit.route,
            &unit.period,
            self.traffic.as_ref(),
            &self.config.travel_time,
            &self.config.moe,
        )?;
        if unit.task == TaskKind::Categorization {
            let supplied = SuppliedConditions::default();
            let ctx = CategorizationContext {
                route: &unit.route,
                period: &unit.period,
                samples: &samples,
                network: &self.network,
                source: self.conditions.as_ref(),
                supplied: &supplied,
                params: &self.config.categorization,
            };
            let result = categorize(&ctx, self.store.as_ref(), &self.lock);
            if result.has_error {
                log::warn!(
                    "route '{}' on {}: categorization incomplete {:?}",
                    unit.route.name,
                    unit.period.start.date(),
                    result.counts
                );
            }
            lock_recover(&self.results).push((unit.period.start, result));
        }
        lock_recover(&self.samples).extend(samples);
        Ok(())
    }
}
