use super::{
    ConditionClass, ConditionRecord, ConditionSourceError, Incident, SnowManagement,
    SpecialEvent, WeatherReading, WeatherStation, WorkZone,
};
use chrono::NaiveDateTime;

/// read-only access to the condition records maintained by the data loaders.
/// range queries return every record whose active span overlaps
/// `[start, end]`.
pub trait ConditionSource: Send + Sync {
    fn weather_stations(&self) -> Result<Vec<WeatherStation>, ConditionSourceError>;

    /// readings of one station within `[start, end]`, ordered by time
    fn weather_readings(
        &self,
        station_id: &str,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<WeatherReading>, ConditionSourceError>;

    fn incidents(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<Incident>, ConditionSourceError>;

    fn work_zones(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<WorkZone>, ConditionSourceError>;

    fn special_events(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<SpecialEvent>, ConditionSourceError>;

    fn snow_managements(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<SnowManagement>, ConditionSourceError>;

    /// a single record by class and id
    fn record(&self, class: ConditionClass, id: u64) -> Option<ConditionRecord>;
}
