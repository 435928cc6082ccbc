//! per-cell congestion measure formulas. each function documents what it
//! returns when an input is a gap ([`MISSING_VALUE`]).
//!
//! `hours` is the sampling interval in hours and `spacing` the node spacing
//! in miles.
use crate::model::{is_missing, MISSING_VALUE};

/// flow · hours · spacing. 0 when flow is missing.
pub fn vmt(flow: f64, hours: f64, spacing: f64) -> f64 {
    if is_missing(flow) {
        return 0.0;
    }
    flow * hours * spacing
}

/// vmt / speed. missing when flow or speed is missing or speed is not positive.
pub fn vht(flow: f64, speed: f64, hours: f64, spacing: f64) -> f64 {
    if is_missing(flow) || is_missing(speed) || speed <= 0.0 {
        return MISSING_VALUE;
    }
    vmt(flow, hours, spacing) / speed
}

fn capacity_balance(flow: f64, lanes: u32, lane_capacity: f64, hours: f64, spacing: f64) -> f64 {
    (lane_capacity * lanes as f64 - flow).max(0.0) * hours * spacing
}

/// unused capacity in vehicle miles when density exceeds the critical
/// density, otherwise 0. 0 when flow or density is missing.
pub fn lvmt(
    flow: f64,
    density: f64,
    lanes: u32,
    critical_density: f64,
    lane_capacity: f64,
    hours: f64,
    spacing: f64,
) -> f64 {
    if is_missing(flow) || is_missing(density) || density <= critical_density {
        return 0.0;
    }
    capacity_balance(flow, lanes, lane_capacity, hours, spacing)
}

/// the same capacity balance as [`lvmt`], gated on density at or below the
/// critical density. 0 when flow or density is missing.
pub fn uvmt(
    flow: f64,
    density: f64,
    lanes: u32,
    critical_density: f64,
    lane_capacity: f64,
    hours: f64,
    spacing: f64,
) -> f64 {
    if is_missing(flow) || is_missing(density) || density > critical_density {
        return 0.0;
    }
    capacity_balance(flow, lanes, lane_capacity, hours, spacing)
}

/// vmt/speed − vmt/speed_limit, clamped at 0. 0 on any missing input.
pub fn dvh(flow: f64, speed: f64, speed_limit: f64, hours: f64, spacing: f64) -> f64 {
    if is_missing(flow) || is_missing(speed) || speed <= 0.0 || speed_limit <= 0.0 {
        return 0.0;
    }
    let v = vmt(flow, hours, spacing);
    (v / speed - v / speed_limit).max(0.0)
}

/// spacing when speed is below the congestion threshold, else 0. 0 when
/// speed is missing.
pub fn cm(speed: f64, threshold: f64, spacing: f64) -> f64 {
    if is_missing(speed) || speed >= threshold {
        return 0.0;
    }
    spacing
}

/// spacing · hours under the same condition as [`cm`].
pub fn cmh(speed: f64, threshold: f64, hours: f64, spacing: f64) -> f64 {
    cm(speed, threshold, spacing) * hours
}
