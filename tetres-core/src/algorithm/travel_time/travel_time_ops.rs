use super::{walk, TravelTimeParameters};
use crate::algorithm::discretization::DiscretizedRoute;
use crate::algorithm::imputation::spatial_imputation;
use crate::algorithm::moe::{compute_moe_summaries, MoeParameters};
use crate::algorithm::VIRTUAL_NODE_SPACING;
use crate::model::{
    Period, Route, TrafficDataError, TrafficDataReader, TrafficMetricGrid, TrafficVariable,
    TravelTimeSample,
};
use itertools::Itertools;
use rayon::prelude::*;

/// discretized and spatially imputed speed grid for a route
pub fn read_speed_grid<R: TrafficDataReader + ?Sized>(
    discretized: &DiscretizedRoute,
    period: &Period,
    reader: &R,
) -> Result<TrafficMetricGrid, TrafficDataError> {
    let speed = discretized.read(reader, period, TrafficVariable::Speed)?;
    Ok(spatial_imputation(&speed))
}

/// travel time in minutes for a departure at each timestamp of `period`.
/// departures are walked independently over speed data read through
/// `period` extended by [`TravelTimeParameters::extension_hours`].
pub fn compute_travel_time<R: TrafficDataReader + ?Sized>(
    route: &Route,
    period: &Period,
    reader: &R,
    params: &TravelTimeParameters,
) -> Result<Vec<TravelTimeSample>, TrafficDataError> {
    let discretized = DiscretizedRoute::new(route)?;
    let extended = period.extend_end_hours(params.extension_hours);
    let speed = read_speed_grid(&discretized, &extended, reader)?;
    let times = period.timeline().collect_vec();
    log::debug!(
        "route '{}': walking {} departures over {} virtual nodes",
        route.name,
        times.len(),
        speed.n_rows()
    );

    let travel_times: Vec<f64> = (0..times.len())
        .into_par_iter()
        .map(|tidx| walk(&speed, tidx, period.interval, VIRTUAL_NODE_SPACING).travel_time)
        .collect();

    let samples = times
        .into_iter()
        .zip(travel_times)
        .map(|(time, travel_time)| TravelTimeSample {
            id: TravelTimeSample::derive_id(route.id, &time),
            route_id: route.id,
            time,
            travel_time,
            moe: None,
        })
        .collect_vec();
    let n_missing = samples.iter().filter(|s| !s.is_determined()).count();
    if n_missing > 0 {
        log::warn!(
            "route '{}': {} of {} departures have no travel time",
            route.name,
            n_missing,
            samples.len()
        );
    }
    Ok(samples)
}

/// [`compute_travel_time`] with route level congestion measures attached to
/// each sample.
pub fn compute_travel_time_with_moe<R: TrafficDataReader + ?Sized>(
    route: &Route,
    period: &Period,
    reader: &R,
    params: &TravelTimeParameters,
    moe_params: &MoeParameters,
) -> Result<Vec<TravelTimeSample>, TrafficDataError> {
    let mut samples = compute_travel_time(route, period, reader, params)?;
    let summaries = compute_moe_summaries(route, period, reader, moe_params)?;
    for (sample, summary) in samples.iter_mut().zip(summaries) {
        sample.moe = Some(summary);
    }
    Ok(samples)
}
