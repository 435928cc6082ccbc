use super::BatchId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tetres_core::model::{Period, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// travel times and congestion measures only
    TravelTime,
    /// travel times followed by categorization of the new samples
    Categorization,
}

impl Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::TravelTime => write!(f, "travel_time"),
            TaskKind::Categorization => write!(f, "categorization"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkUnit {
    pub route: Arc<Route>,
    pub period: Period,
    pub task: TaskKind,
    pub batch: BatchId,
}

impl WorkUnit {
    /// one unit per period, all in the same batch
    pub fn for_periods(
        route: Arc<Route>,
        periods: &[Period],
        task: TaskKind,
        batch: BatchId,
    ) -> Vec<WorkUnit> {
        periods
            .iter()
            .map(|period| WorkUnit {
                route: route.clone(),
                period: *period,
                task,
                batch,
            })
            .collect()
    }
}
