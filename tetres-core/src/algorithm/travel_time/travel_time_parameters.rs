use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelTimeParameters {
    /// hours of speed data read past the end of the period so that late
    /// departures can still reach the end of the route
    #[serde(default = "default_extension_hours")]
    pub extension_hours: u32,
}

fn default_extension_hours() -> u32 {
    2
}

impl Default for TravelTimeParameters {
    fn default() -> Self {
        Self {
            extension_hours: default_extension_hours(),
        }
    }
}
