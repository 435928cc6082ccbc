use super::{ReliabilityError, ReliabilityParameters, ReliabilitySummary, RELIABILITY_PERCENTILES};
use crate::filter::CategorizedSample;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use tetres_core::algorithm::discretization::DiscretizedRoute;
use tetres_core::algorithm::VIRTUAL_NODE_SPACING;
use tetres_core::model::Route;

/// reliability measures of the determined samples in `samples`. returns
/// `None` when no sample has a positive travel time.
pub fn reliability_summary(
    route: &Route,
    samples: &[&CategorizedSample],
    params: &ReliabilityParameters,
) -> Result<Option<ReliabilitySummary>, ReliabilityError> {
    let discretized = DiscretizedRoute::new(route)?;
    let free_flow = free_flow_travel_time(&discretized)?;
    let travel_times = samples
        .iter()
        .map(|s| s.sample.travel_time)
        .filter(|tt| *tt > 0.0)
        .collect_vec();
    log::debug!(
        "reliability of route {} over {} of {} samples",
        route.id,
        travel_times.len(),
        samples.len()
    );
    Ok(summarize(
        &travel_times,
        free_flow,
        discretized.length(),
        params,
    ))
}

/// minutes to drive the discretized route at the posted speed limits. each
/// row after the first adds one spacing at the limit of the last station
/// passed.
pub fn free_flow_travel_time(route: &DiscretizedRoute) -> Result<f64, ReliabilityError> {
    let stations = route.stations();
    let mut speed_limit = stations.first().map(|s| s.speed_limit).unwrap_or_default();
    let mut travel_time = 0.0;
    for (idx, node) in route.nodes().iter().enumerate() {
        if !node.is_virtual {
            speed_limit = node.speed_limit;
        }
        if speed_limit <= 0.0 {
            let name = stations
                .get(node.source)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            return Err(ReliabilityError::InvalidSpeedLimit(name));
        }
        if idx > 0 {
            travel_time += VIRTUAL_NODE_SPACING / speed_limit;
        }
    }
    Ok(travel_time * 60.0)
}

/// reliability measures of positive travel times against a free-flow travel
/// time, both in minutes, over a route of `length` miles.
pub fn summarize(
    travel_times: &[f64],
    free_flow: f64,
    length: f64,
    params: &ReliabilityParameters,
) -> Option<ReliabilitySummary> {
    if travel_times.is_empty() {
        return None;
    }
    let sorted = travel_times
        .iter()
        .sorted_by_key(|tt| OrderedFloat(**tt))
        .copied()
        .collect_vec();
    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let median = percentile(&sorted, 0.5);
    let rate = |tt: f64| if length > 0.0 { tt / length } else { 0.0 };

    let congested = sorted
        .iter()
        .filter(|tt| **tt > free_flow * params.congested_hour_factor)
        .collect_vec();
    let congested_mean = (!congested.is_empty())
        .then(|| congested.iter().copied().sum::<f64>() / congested.len() as f64);

    let mut percentile_travel_times = BTreeMap::from([(50, median)]);
    let mut percentile_travel_time_rates = BTreeMap::new();
    let mut buffer_index = BTreeMap::new();
    let mut buffer_index_median = BTreeMap::new();
    let mut planning_time_index = BTreeMap::new();
    for pct in RELIABILITY_PERCENTILES {
        let pct_tt = percentile(&sorted, pct as f64 / 100.0);
        percentile_travel_times.insert(pct, pct_tt);
        percentile_travel_time_rates.insert(pct, rate(pct_tt));
        buffer_index.insert(pct, ((pct_tt - mean) / mean).max(0.0));
        buffer_index_median.insert(pct, ((pct_tt - median) / median).max(0.0));
        planning_time_index.insert(pct, pct_tt / free_flow);
    }
    let lottr = percentile_travel_times
        .get(&80)
        .map(|p80| p80 / median)
        .unwrap_or_default();

    let on_time_limit = params.on_time_rate * median;
    let on_time_arrival_count = sorted.iter().filter(|tt| **tt < on_time_limit).count();

    let above_mean = sorted.iter().copied().filter(|tt| *tt > mean).collect_vec();
    let semi_variance =
        (above_mean.len() > params.semi_variance_min_count).then(|| sample_variance(&above_mean));

    Some(ReliabilitySummary {
        count,
        mean_travel_time: mean,
        median_travel_time: median,
        travel_time_rate: rate(mean),
        free_flow_travel_time: free_flow,
        congested_hour_factor: params.congested_hour_factor,
        congested_count: congested.len(),
        congested_mean_travel_time: congested_mean,
        travel_time_index: congested_mean.map(|m| m / free_flow),
        misery_index: percentile(&sorted, 0.975) / free_flow,
        percentile_travel_times,
        percentile_travel_time_rates,
        buffer_index,
        buffer_index_median,
        planning_time_index,
        lottr,
        on_time_arrival: on_time_arrival_count as f64 / count as f64,
        on_time_arrival_count,
        semi_variance,
        semi_variance_count: above_mean.len(),
    })
}

/// linear interpolation between the closest ranks of an ascending slice,
/// `p` in [0, 1]. an empty slice yields 0.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let k = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = k.floor() as usize;
    let hi = k.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] * (hi as f64 - k) + sorted[hi] * (k - lo as f64)
}

fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}
