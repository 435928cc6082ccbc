use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// a reported traffic incident at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: u64,
    pub incident_type: String,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub severity: Option<i32>,
    pub lat: f64,
    pub lon: f64,
    /// time the incident was opened
    pub cdts: NaiveDateTime,
    /// time of the last update
    #[serde(default)]
    pub udts: Option<NaiveDateTime>,
    /// time the incident was cleared
    #[serde(default)]
    pub xdts: Option<NaiveDateTime>,
}

impl Incident {
    /// end of the active window: the clear time, else the last update
    pub fn close_time(&self) -> Option<NaiveDateTime> {
        self.xdts.or(self.udts)
    }

    pub fn is_active_at(&self, time: &NaiveDateTime) -> bool {
        match self.close_time() {
            Some(end) => self.cdts <= *time && *time <= end,
            None => false,
        }
    }
}
