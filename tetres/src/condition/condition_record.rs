use super::{ConditionClass, Incident, SnowManagement, SpecialEvent, WeatherReading, WorkZone};
use serde::{Deserialize, Serialize};

/// one condition record of any class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum ConditionRecord {
    Weather(WeatherReading),
    Incident(Incident),
    WorkZone(WorkZone),
    SpecialEvent(SpecialEvent),
    SnowManagement(SnowManagement),
}

impl ConditionRecord {
    pub fn class(&self) -> ConditionClass {
        match self {
            ConditionRecord::Weather(_) => ConditionClass::Weather,
            ConditionRecord::Incident(_) => ConditionClass::Incident,
            ConditionRecord::WorkZone(_) => ConditionClass::WorkZone,
            ConditionRecord::SpecialEvent(_) => ConditionClass::SpecialEvent,
            ConditionRecord::SnowManagement(_) => ConditionClass::SnowManagement,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            ConditionRecord::Weather(r) => r.id,
            ConditionRecord::Incident(r) => r.id,
            ConditionRecord::WorkZone(r) => r.id,
            ConditionRecord::SpecialEvent(r) => r.id,
            ConditionRecord::SnowManagement(r) => r.id,
        }
    }

    pub fn as_weather(&self) -> Option<&WeatherReading> {
        match self {
            ConditionRecord::Weather(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_incident(&self) -> Option<&Incident> {
        match self {
            ConditionRecord::Incident(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_work_zone(&self) -> Option<&WorkZone> {
        match self {
            ConditionRecord::WorkZone(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_special_event(&self) -> Option<&SpecialEvent> {
        match self {
            ConditionRecord::SpecialEvent(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_snow_management(&self) -> Option<&SnowManagement> {
        match self {
            ConditionRecord::SnowManagement(r) => Some(r),
            _ => None,
        }
    }
}
