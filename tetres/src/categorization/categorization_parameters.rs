use serde::{Deserialize, Serialize};

/// distance and time windows applied when matching conditions to samples.
/// distances are in miles and windows in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizationParameters {
    pub incident_upstream_distance_limit: f64,
    pub incident_downstream_distance_limit: f64,
    pub work_zone_upstream_distance_limit: f64,
    pub work_zone_downstream_distance_limit: f64,
    /// minutes before an event start that count as arrival traffic
    pub special_event_arrival_window: i64,
    /// minutes after an event start at which departure traffic begins
    pub special_event_departure_offset: i64,
    /// length of the departure window in minutes
    pub special_event_departure_window: i64,
    /// default radius for special event filters
    pub special_event_distance_limit: f64,
    pub weather_station_distance_limit: f64,
    /// minimum share of hourly readings a weather station must provide
    pub weather_min_coverage: f64,
    /// hours added on both sides of the period when checking coverage
    pub weather_coverage_margin_hours: i64,
    pub weather_match_tolerance_minutes: i64,
}

impl Default for CategorizationParameters {
    fn default() -> Self {
        Self {
            incident_upstream_distance_limit: 10.0,
            incident_downstream_distance_limit: 10.0,
            work_zone_upstream_distance_limit: 10.0,
            work_zone_downstream_distance_limit: 10.0,
            special_event_arrival_window: 150,
            special_event_departure_offset: 120,
            special_event_departure_window: 150,
            special_event_distance_limit: 5.0,
            weather_station_distance_limit: 15.0,
            weather_min_coverage: 0.6,
            weather_coverage_margin_hours: 1,
            weather_match_tolerance_minutes: 60,
        }
    }
}
