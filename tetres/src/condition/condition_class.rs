use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// an independent family of operating conditions a travel time sample is
/// categorized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionClass {
    Weather,
    Incident,
    WorkZone,
    SpecialEvent,
    SnowManagement,
}

impl ConditionClass {
    pub const ALL: [ConditionClass; 5] = [
        ConditionClass::Weather,
        ConditionClass::Incident,
        ConditionClass::WorkZone,
        ConditionClass::SpecialEvent,
        ConditionClass::SnowManagement,
    ];
}

impl Display for ConditionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConditionClass::Weather => "weather",
            ConditionClass::Incident => "incident",
            ConditionClass::WorkZone => "work_zone",
            ConditionClass::SpecialEvent => "special_event",
            ConditionClass::SnowManagement => "snow_management",
        };
        write!(f, "{s}")
    }
}
