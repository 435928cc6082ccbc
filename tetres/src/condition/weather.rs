use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// a surface weather observation station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherStation {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// first day the station reported, if known
    #[serde(default)]
    pub begin: Option<NaiveDate>,
    /// last day the station reported, if known
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl WeatherStation {
    pub fn is_active(&self, date: &NaiveDate) -> bool {
        self.begin.is_none_or(|b| b <= *date) && self.end.is_none_or(|e| *date <= e)
    }
}

/// an hourly weather observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub id: u64,
    pub station_id: String,
    pub time: NaiveDateTime,
    /// precipitation type code, see [`PrecipitationType`]
    pub precip_type: i32,
    /// precipitation intensity code, see [`PrecipitationIntensity`]
    pub intensity: i32,
    /// precipitation amount in inches
    #[serde(default)]
    pub precip: Option<f64>,
}

impl WeatherReading {
    pub fn precipitation_type(&self) -> PrecipitationType {
        PrecipitationType::from_code(self.precip_type)
    }

    pub fn precipitation_intensity(&self) -> PrecipitationIntensity {
        PrecipitationIntensity::from_code(self.intensity)
    }

    pub fn has_precip_amount(&self) -> bool {
        self.precip.is_some_and(|p| p > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrecipitationType {
    Clear,
    Drizzle,
    Rain,
    Snow,
    SnowGrains,
    IceCrystals,
    IcePellets,
    Hail,
    SmallHail,
    Unknown,
    Missing,
}

impl PrecipitationType {
    pub fn from_code(code: i32) -> PrecipitationType {
        match code {
            0 => PrecipitationType::Clear,
            1 => PrecipitationType::Drizzle,
            2 => PrecipitationType::Rain,
            3 => PrecipitationType::Snow,
            4 => PrecipitationType::SnowGrains,
            5 => PrecipitationType::IceCrystals,
            6 => PrecipitationType::IcePellets,
            7 => PrecipitationType::Hail,
            8 => PrecipitationType::SmallHail,
            99 => PrecipitationType::Missing,
            _ => PrecipitationType::Unknown,
        }
    }

    pub fn is_precipitation(&self) -> bool {
        !matches!(
            self,
            PrecipitationType::Clear | PrecipitationType::Unknown | PrecipitationType::Missing
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrecipitationIntensity {
    NotReported,
    Light,
    Moderate,
    Heavy,
    Vicinity,
    Missing,
}

impl PrecipitationIntensity {
    pub fn from_code(code: i32) -> PrecipitationIntensity {
        match code {
            0 => PrecipitationIntensity::NotReported,
            1 => PrecipitationIntensity::Light,
            2 => PrecipitationIntensity::Moderate,
            3 => PrecipitationIntensity::Heavy,
            4 => PrecipitationIntensity::Vicinity,
            _ => PrecipitationIntensity::Missing,
        }
    }
}
