use super::new_row;
use crate::categorization::{
    CategorizationContext, CategorizationError, CategorizationRow, ConditionDetail,
    EventTrafficType,
};
use crate::condition::{ConditionClass, SpecialEvent};
use chrono::{Duration, NaiveDateTime};
use tetres_core::geometry::location_ops;

pub fn categorize_special_events(
    ctx: &CategorizationContext,
) -> Result<Vec<CategorizationRow>, CategorizationError> {
    let params = ctx.params;
    let events = match &ctx.supplied.special_events {
        Some(events) => events.clone(),
        None => {
            // events starting after the period can still draw arrival traffic
            // into it, and events that started before it departure traffic
            let before =
                params.special_event_departure_offset + params.special_event_departure_window;
            let start = ctx.period.start - Duration::minutes(before);
            let end = ctx.period.end + Duration::minutes(params.special_event_arrival_window);
            ctx.source.special_events(&start, &end)?
        }
    };

    let mut rows = vec![];
    for event in events.iter() {
        let distance = location_ops::minimum_distance(ctx.route, event.lat, event.lon);
        if !distance.is_finite() {
            continue;
        }
        for sample in ctx.samples.iter() {
            let Some(event_type) = traffic_type(ctx, event, &sample.time) else {
                continue;
            };
            rows.push(new_row(
                sample,
                ConditionClass::SpecialEvent,
                event.id,
                ConditionDetail::SpecialEvent {
                    distance,
                    event_type,
                },
            ));
        }
    }
    Ok(rows)
}

/// arrival takes precedence when the two windows overlap
fn traffic_type(
    ctx: &CategorizationContext,
    event: &SpecialEvent,
    time: &NaiveDateTime,
) -> Option<EventTrafficType> {
    let (a1, a2) = event.arrival_window(ctx.params.special_event_arrival_window);
    if a1 <= *time && *time <= a2 {
        return Some(EventTrafficType::Arrival);
    }
    let (d1, d2) = event.departure_window(
        ctx.params.special_event_departure_offset,
        ctx.params.special_event_departure_window,
    );
    if d1 <= *time && *time <= d2 {
        return Some(EventTrafficType::Departure);
    }
    None
}
