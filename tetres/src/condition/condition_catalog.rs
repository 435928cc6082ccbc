use super::{
    ConditionClass, ConditionRecord, ConditionSource, ConditionSourceError, Incident,
    SnowManagement, SpecialEvent, WeatherReading, WeatherStation, WorkZone,
};
use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// condition records held in memory, typically decoded from a JSON file
/// written by the data loaders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionCatalog {
    pub weather_stations: Vec<WeatherStation>,
    pub weather_readings: Vec<WeatherReading>,
    pub incidents: Vec<Incident>,
    pub work_zones: Vec<WorkZone>,
    pub special_events: Vec<SpecialEvent>,
    pub snow_managements: Vec<SnowManagement>,
}

fn overlaps(
    a: &NaiveDateTime,
    b: &NaiveDateTime,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> bool {
    a <= end && b >= start
}

impl ConditionCatalog {
    pub fn from_json_file(path: &str) -> Result<ConditionCatalog, ConditionSourceError> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| ConditionSourceError::ReadError(path.to_string(), e))?;
        serde_json::from_str(&s).map_err(|e| ConditionSourceError::DecodeError(path.to_string(), e))
    }
}

impl ConditionSource for ConditionCatalog {
    fn weather_stations(&self) -> Result<Vec<WeatherStation>, ConditionSourceError> {
        Ok(self.weather_stations.clone())
    }

    fn weather_readings(
        &self,
        station_id: &str,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<WeatherReading>, ConditionSourceError> {
        let readings = self
            .weather_readings
            .iter()
            .filter(|r| r.station_id == station_id && &r.time >= start && &r.time <= end)
            .sorted_by_key(|r| (r.time, r.id))
            .cloned()
            .collect_vec();
        Ok(readings)
    }

    fn incidents(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<Incident>, ConditionSourceError> {
        let incidents = self
            .incidents
            .iter()
            .filter(|i| overlaps(&i.cdts, &i.close_time().unwrap_or(i.cdts), start, end))
            .cloned()
            .collect_vec();
        Ok(incidents)
    }

    fn work_zones(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<WorkZone>, ConditionSourceError> {
        let work_zones = self
            .work_zones
            .iter()
            .filter(|w| overlaps(&w.start, &w.end, start, end))
            .cloned()
            .collect_vec();
        Ok(work_zones)
    }

    fn special_events(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<SpecialEvent>, ConditionSourceError> {
        let events = self
            .special_events
            .iter()
            .filter(|e| overlaps(&e.start, &e.end, start, end))
            .cloned()
            .collect_vec();
        Ok(events)
    }

    fn snow_managements(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<SnowManagement>, ConditionSourceError> {
        let snow = self
            .snow_managements
            .iter()
            .filter(|s| overlaps(&s.lane_lost_time, &s.lane_regain_time, start, end))
            .cloned()
            .collect_vec();
        Ok(snow)
    }

    fn record(&self, class: ConditionClass, id: u64) -> Option<ConditionRecord> {
        match class {
            ConditionClass::Weather => self
                .weather_readings
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(ConditionRecord::Weather),
            ConditionClass::Incident => self
                .incidents
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(ConditionRecord::Incident),
            ConditionClass::WorkZone => self
                .work_zones
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(ConditionRecord::WorkZone),
            ConditionClass::SpecialEvent => self
                .special_events
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(ConditionRecord::SpecialEvent),
            ConditionClass::SnowManagement => self
                .snow_managements
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(ConditionRecord::SnowManagement),
        }
    }
}
