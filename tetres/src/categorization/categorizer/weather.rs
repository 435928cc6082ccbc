use super::new_row;
use crate::categorization::{
    CategorizationContext, CategorizationError, CategorizationRow, ConditionDetail,
};
use crate::condition::{ConditionClass, WeatherReading, WeatherStation};
use chrono::{Duration, NaiveDateTime, Timelike};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use tetres_core::geometry::geo_ops;

pub fn categorize_weather(
    ctx: &CategorizationContext,
) -> Result<Vec<CategorizationRow>, CategorizationError> {
    let readings = match &ctx.supplied.weather {
        Some(readings) => readings.iter().sorted_by_key(|r| r.time).cloned().collect_vec(),
        None => select_weather_readings(ctx)?,
    };
    let tolerance = Duration::minutes(ctx.params.weather_match_tolerance_minutes);
    let rows = ctx
        .samples
        .iter()
        .filter_map(|sample| {
            let reading = nearest_reading(&readings, &sample.time, tolerance)?;
            Some(new_row(
                sample,
                ConditionClass::Weather,
                reading.id,
                ConditionDetail::Weather,
            ))
        })
        .collect_vec();
    Ok(rows)
}

/// readings of the nearest active station around the route center that
/// reports for enough of the period. stations are tried in order of distance
/// until one qualifies or the distance limit is reached.
pub fn select_weather_readings(
    ctx: &CategorizationContext,
) -> Result<Vec<WeatherReading>, CategorizationError> {
    let (lat, lon) = ctx
        .route
        .center_coordinates()
        .ok_or_else(|| CategorizationError::EmptyRoute(ctx.route.name.clone()))?;
    let date = ctx.period.start.date();
    let stations: Vec<(f64, WeatherStation)> = ctx
        .source
        .weather_stations()?
        .into_iter()
        .filter(|s| s.is_active(&date))
        .map(|s| {
            let d = geo_ops::distance_between_coordinates(lat, lon, s.lat, s.lon);
            (d, s)
        })
        .sorted_by_key(|(d, _)| OrderedFloat(*d))
        .collect_vec();

    let margin = Duration::hours(ctx.params.weather_coverage_margin_hours);
    let start = ctx.period.start - margin;
    let end = ctx.period.end + margin;
    let hours = (end - start).num_minutes() as f64 / 60.0;
    let required = hours * ctx.params.weather_min_coverage;

    for (distance, station) in stations {
        if distance > ctx.params.weather_station_distance_limit {
            break;
        }
        let readings = ctx.source.weather_readings(&station.id, &start, &end)?;
        let covered = readings
            .iter()
            .map(|r| (r.time.date(), r.time.hour()))
            .unique()
            .count();
        if (covered as f64) < required {
            log::debug!(
                "weather station '{}' ({:.2} mi) reports {} of {:.1} hours, trying next station",
                station.id,
                distance,
                covered,
                hours
            );
            continue;
        }
        log::debug!(
            "route '{}' uses weather station '{}' ({:.2} mi)",
            ctx.route.name,
            station.id,
            distance
        );
        return Ok(readings);
    }
    Err(CategorizationError::NoWeatherStation(ctx.route.name.clone()))
}

/// the reading closest in time to `time`, no further than `tolerance` away.
/// ties go to the earlier reading.
pub fn nearest_reading<'a>(
    readings: &'a [WeatherReading],
    time: &NaiveDateTime,
    tolerance: Duration,
) -> Option<&'a WeatherReading> {
    readings
        .iter()
        .map(|r| ((r.time - *time).abs(), r))
        .filter(|(gap, _)| *gap <= tolerance)
        .min_by(|(ga, a), (gb, b)| ga.cmp(gb).then(a.time.cmp(&b.time)))
        .map(|(_, r)| r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorization::categorizer::test_fixtures::{dt, Fixture};
    use crate::condition::ConditionCatalog;

    fn station(id: &str, lon: f64) -> WeatherStation {
        WeatherStation {
            id: String::from(id),
            name: String::from(id),
            lat: 44.945,
            lon,
            begin: None,
            end: None,
        }
    }

    fn reading(id: u64, station_id: &str, time: &str) -> WeatherReading {
        WeatherReading {
            id,
            station_id: String::from(station_id),
            time: dt(time),
            precip_type: 2,
            intensity: 1,
            precip: Some(0.02),
        }
    }

    fn catalog() -> ConditionCatalog {
        ConditionCatalog {
            weather_stations: vec![
                station("far", -93.70),
                station("near", -93.22),
                station("next", -93.37),
            ],
            weather_readings: vec![
                reading(1, "near", "2024-02-06 07:00"),
                reading(10, "next", "2024-02-06 06:00"),
                reading(11, "next", "2024-02-06 07:00"),
                reading(12, "next", "2024-02-06 08:00"),
                reading(13, "next", "2024-02-06 09:00"),
                reading(20, "far", "2024-02-06 07:00"),
                reading(21, "far", "2024-02-06 08:00"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_sparse_station_falls_back_to_next_nearest() {
        let fixture = Fixture::new();
        let catalog = catalog();
        let ctx = fixture.context(&catalog);
        let readings = select_weather_readings(&ctx).expect("test invariant failed");
        assert!(readings.iter().all(|r| r.station_id == "next"));

        let rows = categorize_weather(&ctx).expect("test invariant failed");
        let ids = rows.iter().map(|r| r.condition_id).collect_vec();
        // 07:15 and 07:30 match 07:00 (ties go earlier), 07:45 and 08:00 match 08:00
        assert_eq!(ids, vec![11, 11, 12, 12]);
    }

    #[test]
    fn test_no_station_within_limit() {
        let fixture = Fixture::new();
        let catalog = ConditionCatalog {
            weather_stations: vec![station("far", -93.70)],
            ..catalog()
        };
        let ctx = fixture.context(&catalog);
        let result = categorize_weather(&ctx);
        assert!(matches!(
            result,
            Err(CategorizationError::NoWeatherStation(_))
        ));
    }

    #[test]
    fn test_supplied_readings_skip_station_search() {
        let mut fixture = Fixture::new();
        fixture.supplied.weather = Some(vec![reading(99, "any", "2024-02-06 08:30")]);
        let catalog = ConditionCatalog::default();
        let ctx = fixture.context(&catalog);
        let rows = categorize_weather(&ctx).expect("test invariant failed");
        // 07:15 is 75 minutes away and beyond the tolerance
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.condition_id == 99));
    }
}
