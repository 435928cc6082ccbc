use super::WorkerConfiguration;
use crate::app::TetresCliError;
use crate::categorization::CategorizationParameters;
use crate::reliability::ReliabilityParameters;
use serde::{Deserialize, Serialize};
use tetres_core::{MoeParameters, TravelTimeParameters};

/// parameters for travel time, congestion measure, categorization and
/// reliability runs
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct TetresConfiguration {
    pub moe: MoeParameters,
    pub travel_time: TravelTimeParameters,
    pub categorization: CategorizationParameters,
    pub reliability: ReliabilityParameters,
    pub worker: WorkerConfiguration,
}

impl TryFrom<&String> for TetresConfiguration {
    type Error = TetresCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                TetresCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                TetresCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                TetresCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                TetresCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(TetresCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
