use super::new_row;
use crate::categorization::{
    CategorizationContext, CategorizationError, CategorizationRow, ConditionDetail,
};
use crate::condition::{ConditionClass, Incident};
use tetres_core::geometry::location_ops;

pub fn categorize_incidents(
    ctx: &CategorizationContext,
) -> Result<Vec<CategorizationRow>, CategorizationError> {
    let incidents = match &ctx.supplied.incidents {
        Some(incidents) => incidents.clone(),
        None => ctx.source.incidents(&ctx.period.start, &ctx.period.end)?,
    };
    let length = ctx.route.length();
    let upstream_limit = ctx.params.incident_upstream_distance_limit;
    let downstream_limit = ctx.params.incident_downstream_distance_limit;

    let mut rows = vec![];
    for incident in incidents.iter() {
        let Some(distance) =
            location_ops::location_by_coordinate(ctx.route, incident.lat, incident.lon, ctx.network)
        else {
            log::debug!("incident {} is not on route '{}'", incident.id, ctx.route.name);
            continue;
        };
        if distance < -upstream_limit || distance > length + downstream_limit {
            continue;
        }
        let off_distance = if distance < 0.0 {
            distance
        } else {
            (distance - length).max(0.0)
        };
        rows.extend(active_rows(ctx, incident, distance, off_distance));
    }
    Ok(rows)
}

fn active_rows(
    ctx: &CategorizationContext,
    incident: &Incident,
    distance: f64,
    off_distance: f64,
) -> Vec<CategorizationRow> {
    ctx.samples
        .iter()
        .filter(|s| incident.is_active_at(&s.time))
        .map(|s| {
            new_row(
                s,
                ConditionClass::Incident,
                incident.id,
                ConditionDetail::Incident {
                    distance,
                    off_distance,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorization::categorizer::test_fixtures::{dt, Fixture};
    use crate::condition::ConditionCatalog;

    fn incident(id: u64, lat: f64, cleared: Option<&str>) -> Incident {
        Incident {
            id,
            incident_type: String::from("crash"),
            classification: None,
            severity: Some(2),
            lat,
            lon: -93.27,
            cdts: dt("2024-02-06 07:10"),
            udts: None,
            xdts: cleared.map(dt),
        }
    }

    #[test]
    fn test_incident_on_route_is_active_until_cleared() {
        let fixture = Fixture::new();
        let catalog = ConditionCatalog {
            incidents: vec![incident(5, 44.945, Some("2024-02-06 07:40"))],
            ..Default::default()
        };
        let rows = categorize_incidents(&fixture.context(&catalog)).expect("test invariant failed");
        let times = rows.iter().map(|r| r.sample_time).collect::<Vec<_>>();
        assert_eq!(times, vec![dt("2024-02-06 07:15"), dt("2024-02-06 07:30")]);
        match rows[0].detail {
            ConditionDetail::Incident {
                distance,
                off_distance,
            } => {
                assert!(distance > 0.0 && distance < fixture.route.length());
                assert_eq!(off_distance, 0.0);
            }
            _ => panic!("expected incident detail"),
        }
    }

    #[test]
    fn test_upstream_incident_has_negative_off_distance() {
        let fixture = Fixture::new();
        let catalog = ConditionCatalog {
            incidents: vec![incident(6, 44.91, Some("2024-02-06 09:00"))],
            ..Default::default()
        };
        let rows = categorize_incidents(&fixture.context(&catalog)).expect("test invariant failed");
        assert_eq!(rows.len(), 4);
        let off = rows[0].detail.off_distance().expect("test invariant failed");
        assert!(off < -1.0);
        assert_eq!(rows[0].detail.distance(), Some(off));
    }

    #[test]
    fn test_incident_without_close_time_is_skipped() {
        let fixture = Fixture::new();
        let catalog = ConditionCatalog {
            incidents: vec![incident(7, 44.945, None)],
            ..Default::default()
        };
        let rows = categorize_incidents(&fixture.context(&catalog)).expect("test invariant failed");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_distance_limit() {
        let mut fixture = Fixture::new();
        fixture.params.incident_upstream_distance_limit = 1.0;
        let catalog = ConditionCatalog {
            incidents: vec![incident(8, 44.91, Some("2024-02-06 09:00"))],
            ..Default::default()
        };
        let rows = categorize_incidents(&fixture.context(&catalog)).expect("test invariant failed");
        assert!(rows.is_empty());
    }
}
