use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// name of a freeway corridor, such as "I-494 (WB)".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorridorId(pub String);

impl Display for CorridorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CorridorId {
    fn from(value: &str) -> Self {
        CorridorId(String::from(value))
    }
}
