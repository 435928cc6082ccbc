use crate::condition::{ConditionClass, PrecipitationIntensity, PrecipitationType};
use crate::filter::{ConditionMatch, Filter};

fn precipitation_type(m: &ConditionMatch) -> Option<PrecipitationType> {
    m.record.as_weather().map(|r| r.precipitation_type())
}

/// any matched reading has one of the given precipitation types
pub fn weather_types(types: &[PrecipitationType]) -> Filter {
    let types = types.to_vec();
    Filter::new("weather_type", ConditionClass::Weather)
        .with_predicate(move |m| precipitation_type(m).is_some_and(|t| types.contains(&t)))
}

pub fn weather_intensities(intensities: &[PrecipitationIntensity]) -> Filter {
    let intensities = intensities.to_vec();
    Filter::new("weather_intensity", ConditionClass::Weather).with_predicate(move |m| {
        m.record
            .as_weather()
            .is_some_and(|r| intensities.contains(&r.precipitation_intensity()))
    })
}

pub fn normal_weather() -> Filter {
    weather_types(&[PrecipitationType::Clear])
}

/// any form of falling precipitation
pub fn has_weather() -> Filter {
    Filter::new("has_weather", ConditionClass::Weather)
        .with_predicate(|m| precipitation_type(m).is_some_and(|t| t.is_precipitation()))
}

pub fn rain() -> Filter {
    weather_types(&[PrecipitationType::Drizzle, PrecipitationType::Rain])
}

pub fn snow() -> Filter {
    weather_types(&[PrecipitationType::Snow, PrecipitationType::SnowGrains])
}

pub fn ice() -> Filter {
    weather_types(&[
        PrecipitationType::IceCrystals,
        PrecipitationType::IcePellets,
        PrecipitationType::Hail,
        PrecipitationType::SmallHail,
    ])
}

pub fn has_precipitation_amount() -> Filter {
    Filter::new("has_precipitation_amount", ConditionClass::Weather)
        .with_predicate(|m| m.record.as_weather().is_some_and(|r| r.has_precip_amount()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorization::ConditionDetail;
    use crate::condition::{ConditionRecord, WeatherReading};
    use crate::filter::{CategorizedSample, SampleFilter};
    use chrono::NaiveDateTime;
    use tetres_core::model::{RouteId, SampleId, TravelTimeSample};

    fn sample_with(precip_type: i32, intensity: i32) -> CategorizedSample {
        let time = NaiveDateTime::parse_from_str("2024-02-06 07:15", "%Y-%m-%d %H:%M")
            .expect("test invariant failed");
        let mut s = CategorizedSample::new(TravelTimeSample {
            id: SampleId(1),
            route_id: RouteId(1),
            time,
            travel_time: 5.0,
            moe: None,
        });
        s.push(
            ConditionClass::Weather,
            ConditionMatch {
                condition_id: 3,
                detail: ConditionDetail::Weather,
                record: ConditionRecord::Weather(WeatherReading {
                    id: 3,
                    station_id: String::from("KMSP"),
                    time,
                    precip_type,
                    intensity,
                    precip: None,
                }),
            },
        );
        s
    }

    #[test]
    fn test_weather_type_codes() {
        let clear = sample_with(0, 0);
        let snowing = sample_with(4, 2);
        let hail = sample_with(8, 3);
        assert!(normal_weather().matches(&clear));
        assert!(!has_weather().matches(&clear));
        assert!(snow().matches(&snowing));
        assert!(has_weather().matches(&snowing));
        assert!(ice().matches(&hail));
        assert!(!has_weather().matches(&sample_with(99, 9)));
        assert!(!normal_weather().matches(&sample_with(9, 0)));
    }

    #[test]
    fn test_intensity() {
        let heavy = weather_intensities(&[PrecipitationIntensity::Heavy]);
        assert!(heavy.matches(&sample_with(2, 3)));
        assert!(!heavy.matches(&sample_with(2, 1)));
    }
}
