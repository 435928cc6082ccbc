use crate::condition::ConditionClass;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tetres_core::geometry::LocationType;
use tetres_core::model::{RouteId, SampleId};

/// whether a sample falls in the traffic arriving before an event or
/// leaving after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTrafficType {
    Arrival,
    Departure,
}

/// class specific fields of a categorization row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionDetail {
    Weather,
    Incident {
        distance: f64,
        off_distance: f64,
    },
    WorkZone {
        location: LocationType,
        distance: f64,
        off_distance: f64,
        /// which directional sub-route of the work zone matched
        route_num: u8,
    },
    SpecialEvent {
        distance: f64,
        event_type: EventTrafficType,
    },
    SnowManagement {
        location: LocationType,
        distance: f64,
        off_distance: f64,
        route_num: u8,
    },
}

impl ConditionDetail {
    pub fn distance(&self) -> Option<f64> {
        match self {
            ConditionDetail::Weather => None,
            ConditionDetail::Incident { distance, .. }
            | ConditionDetail::WorkZone { distance, .. }
            | ConditionDetail::SpecialEvent { distance, .. }
            | ConditionDetail::SnowManagement { distance, .. } => Some(*distance),
        }
    }

    pub fn off_distance(&self) -> Option<f64> {
        match self {
            ConditionDetail::Incident { off_distance, .. }
            | ConditionDetail::WorkZone { off_distance, .. }
            | ConditionDetail::SnowManagement { off_distance, .. } => Some(*off_distance),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<LocationType> {
        match self {
            ConditionDetail::WorkZone { location, .. }
            | ConditionDetail::SnowManagement { location, .. } => Some(*location),
            _ => None,
        }
    }
}

/// joins one travel time sample to one condition record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizationRow {
    pub route_id: RouteId,
    pub sample_id: SampleId,
    pub sample_time: NaiveDateTime,
    pub class: ConditionClass,
    pub condition_id: u64,
    pub detail: ConditionDetail,
}
