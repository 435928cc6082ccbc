use super::CategorizationParameters;
use crate::condition::{
    ConditionSource, Incident, SnowManagement, SpecialEvent, WeatherReading, WorkZone,
};
use tetres_core::model::{Period, Route, TravelTimeSample};
use tetres_core::CorridorNetwork;

/// condition records handed in by the caller. a present list replaces the
/// source query for its class; weather readings supplied here are used as
/// is, without a station search.
#[derive(Debug, Clone, Default)]
pub struct SuppliedConditions {
    pub weather: Option<Vec<WeatherReading>>,
    pub incidents: Option<Vec<Incident>>,
    pub work_zones: Option<Vec<WorkZone>>,
    pub special_events: Option<Vec<SpecialEvent>>,
    pub snow_managements: Option<Vec<SnowManagement>>,
}

/// everything needed to categorize the samples of one (route, period).
pub struct CategorizationContext<'a> {
    pub route: &'a Route,
    pub period: &'a Period,
    pub samples: &'a [TravelTimeSample],
    pub network: &'a CorridorNetwork,
    pub source: &'a dyn ConditionSource,
    pub supplied: &'a SuppliedConditions,
    pub params: &'a CategorizationParameters,
}
