use super::{TrafficDataError, TrafficVariable, MISSING_VALUE};
use crate::model::{Period, RouteNode};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// source of detector measurements. implementations return one value per
/// timestamp of `period.timeline()`, with [`MISSING_VALUE`] for gaps.
pub trait TrafficDataReader: Send + Sync {
    fn read(
        &self,
        node: &RouteNode,
        period: &Period,
        variable: TrafficVariable,
    ) -> Result<Vec<f64>, TrafficDataError>;
}

/// traffic observations held in memory, keyed by station id and variable.
/// timestamps not present are reported as gaps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrafficReader {
    observations: HashMap<(String, TrafficVariable), HashMap<NaiveDateTime, f64>>,
}

impl InMemoryTrafficReader {
    pub fn new() -> InMemoryTrafficReader {
        InMemoryTrafficReader::default()
    }

    pub fn insert(
        &mut self,
        station_id: &str,
        variable: TrafficVariable,
        time: NaiveDateTime,
        value: f64,
    ) {
        self.observations
            .entry((String::from(station_id), variable))
            .or_default()
            .insert(time, value);
    }

    pub fn station_count(&self) -> usize {
        self.observations.len()
    }
}

impl TrafficDataReader for InMemoryTrafficReader {
    fn read(
        &self,
        node: &RouteNode,
        period: &Period,
        variable: TrafficVariable,
    ) -> Result<Vec<f64>, TrafficDataError> {
        let station_id = node
            .station_id
            .as_ref()
            .ok_or_else(|| TrafficDataError::MissingStationData(node.name.clone(), variable))?;
        let series = self.observations.get(&(station_id.clone(), variable));
        let values = period
            .timeline()
            .map(|t| {
                series
                    .and_then(|s| s.get(&t))
                    .copied()
                    .unwrap_or(MISSING_VALUE)
            })
            .collect();
        Ok(values)
    }
}
