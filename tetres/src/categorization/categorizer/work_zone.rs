use super::new_row;
use crate::categorization::{
    CategorizationContext, CategorizationError, CategorizationParameters, CategorizationRow,
    ConditionDetail,
};
use crate::condition::{ConditionClass, WorkZone};
use itertools::Itertools;
use tetres_core::geometry::{location_ops, LocationClassification, LocationType};

pub fn categorize_work_zones(
    ctx: &CategorizationContext,
) -> Result<Vec<CategorizationRow>, CategorizationError> {
    let work_zones = match &ctx.supplied.work_zones {
        Some(work_zones) => work_zones.clone(),
        None => ctx.source.work_zones(&ctx.period.start, &ctx.period.end)?,
    };
    let mut rows = vec![];
    for wz in work_zones.iter() {
        let Some((route_num, loc)) = locate(ctx, wz) else {
            continue;
        };
        let detail = ConditionDetail::WorkZone {
            location: loc.kind,
            distance: loc.distance,
            off_distance: loc.off_distance,
            route_num,
        };
        let matched = ctx
            .samples
            .iter()
            .filter(|s| wz.is_active_at(&s.time))
            .map(|s| new_row(s, ConditionClass::WorkZone, wz.id, detail.clone()))
            .collect_vec();
        rows.extend(matched);
    }
    Ok(rows)
}

/// the first of the two directional sub-routes that lies within the
/// distance window of the route
fn locate(ctx: &CategorizationContext, wz: &WorkZone) -> Option<(u8, LocationClassification)> {
    [(1u8, &wz.route1), (2u8, &wz.route2)]
        .into_iter()
        .map(|(n, r)| (n, location_ops::classify(ctx.route, r, ctx.network)))
        .find(|(_, loc)| within_window(loc, ctx.params))
}

fn within_window(loc: &LocationClassification, params: &CategorizationParameters) -> bool {
    match loc.kind {
        LocationType::Undetermined => false,
        LocationType::Down => loc.off_distance <= params.work_zone_downstream_distance_limit,
        LocationType::Up => loc.off_distance.abs() <= params.work_zone_upstream_distance_limit,
        _ => true,
    }
}
