use super::new_row;
use crate::categorization::{
    CategorizationContext, CategorizationError, CategorizationRow, ConditionDetail,
};
use crate::condition::{ConditionClass, SnowManagement};
use itertools::Itertools;
use tetres_core::geometry::{location_ops, LocationClassification};

pub fn categorize_snow_managements(
    ctx: &CategorizationContext,
) -> Result<Vec<CategorizationRow>, CategorizationError> {
    let managements = match &ctx.supplied.snow_managements {
        Some(managements) => managements.clone(),
        None => ctx.source.snow_managements(&ctx.period.start, &ctx.period.end)?,
    };
    let mut rows = vec![];
    for sm in managements.iter() {
        let Some((route_num, loc)) = locate(ctx, sm) else {
            continue;
        };
        let detail = ConditionDetail::SnowManagement {
            location: loc.kind,
            distance: loc.distance,
            off_distance: loc.off_distance,
            route_num,
        };
        let matched = ctx
            .samples
            .iter()
            .filter(|s| sm.is_active_at(&s.time))
            .map(|s| new_row(s, ConditionClass::SnowManagement, sm.id, detail.clone()))
            .collect_vec();
        rows.extend(matched);
    }
    Ok(rows)
}

/// only truck routes overlapping the route count
fn locate(ctx: &CategorizationContext, sm: &SnowManagement) -> Option<(u8, LocationClassification)> {
    let snow_route = &sm.snow_route;
    [(1u8, &snow_route.route1), (2u8, &snow_route.route2)]
        .into_iter()
        .map(|(n, r)| (n, location_ops::classify(ctx.route, r, ctx.network)))
        .find(|(_, loc)| loc.kind.is_overlapped())
}
