use crate::algorithm::SECONDS_PER_HOUR;
use crate::model::{is_missing, TrafficMetricGrid, MISSING_VALUE};

/// boundaries closer than this are treated as already crossed
const BOUNDARY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct WalkResult {
    /// minutes from departure until each row was entered, or
    /// [`MISSING_VALUE`] for rows never reached
    pub arrivals: Vec<f64>,
    /// minutes to reach the last row, or [`MISSING_VALUE`]
    pub travel_time: f64,
}

impl WalkResult {
    fn undetermined(arrivals: Vec<f64>) -> WalkResult {
        WalkResult {
            arrivals,
            travel_time: MISSING_VALUE,
        }
    }
}

/// simulates a vehicle departing the first row at time column `start`.
///
/// at each step the vehicle is inside row `elapsed_distance / spacing` and
/// time bucket `elapsed_time / interval`; it advances by whichever comes
/// first, the end of the bucket or the end of the row at the cell's speed.
/// the walk fails when it runs out of time buckets or rows, or meets a cell
/// without a usable speed.
pub fn walk(speed: &TrafficMetricGrid, start: usize, interval: u32, spacing: f64) -> WalkResult {
    let n_rows = speed.n_rows();
    let n_buckets = speed.n_cols().saturating_sub(start);
    let mut arrivals = vec![MISSING_VALUE; n_rows];
    if n_rows == 0 || interval == 0 {
        return WalkResult::undetermined(arrivals);
    }
    arrivals[0] = 0.0;
    let goal = spacing * (n_rows - 1) as f64;
    if goal <= 0.0 {
        return WalkResult {
            arrivals,
            travel_time: 0.0,
        };
    }

    let interval = interval as f64;
    let mut elapsed_time = 0.0;
    let mut elapsed_distance = 0.0;
    let mut current_row = 0;
    loop {
        let mut row = (elapsed_distance / spacing).floor() as usize;
        let mut bucket = (elapsed_time / interval).floor() as usize;
        if (interval * (bucket + 1) as f64 - elapsed_time).abs() < BOUNDARY_EPSILON {
            bucket += 1;
        }
        if (spacing * (row + 1) as f64 - elapsed_distance).abs() < BOUNDARY_EPSILON {
            row += 1;
        }
        if row >= n_rows || bucket >= n_buckets {
            return WalkResult::undetermined(arrivals);
        }
        if row != current_row {
            arrivals[row] = elapsed_time / 60.0;
            current_row = row;
        }

        let u = speed.value(row, start + bucket);
        if is_missing(u) || u <= 0.0 {
            return WalkResult::undetermined(arrivals);
        }
        let remaining_interval = interval * (bucket + 1) as f64 - elapsed_time;
        let remaining_distance = spacing * (row + 1) as f64 - elapsed_distance;
        let time_to_go = remaining_interval.min(remaining_distance / u * SECONDS_PER_HOUR);
        elapsed_time += time_to_go;
        elapsed_distance += u * time_to_go / SECONDS_PER_HOUR;

        if elapsed_distance >= goal - BOUNDARY_EPSILON {
            let minutes = elapsed_time / 60.0;
            if let Some(last) = arrivals.last_mut() {
                *last = minutes;
            }
            return WalkResult {
                arrivals,
                travel_time: minutes,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_speed() {
        // 11 rows -> 1 mile at 60 mph -> 1 minute
        let speed = TrafficMetricGrid::filled(11, 10, 60.0);
        let result = walk(&speed, 0, 30, 0.1);
        assert!((result.travel_time - 1.0).abs() < 1e-6);
        assert!((result.arrivals[5] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_speed_changes_between_buckets() {
        // 30 mph for the first 60 seconds covers 0.5 miles, then 60 mph
        // covers the last 0.5 miles in 30 seconds
        let rows = (0..11).map(|_| vec![30.0, 60.0, 60.0, 60.0]).collect();
        let speed = TrafficMetricGrid::new(rows).expect("test invariant failed");
        let result = walk(&speed, 0, 60, 0.1);
        assert!((result.travel_time - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_departure_offset() {
        let rows = (0..11).map(|_| vec![30.0, 60.0, 60.0, 60.0]).collect();
        let speed = TrafficMetricGrid::new(rows).expect("test invariant failed");
        let result = walk(&speed, 1, 60, 0.1);
        assert!((result.travel_time - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_runs_out_of_time() {
        // 10 mph over 1 mile takes 6 minutes but only 2 minutes of data
        let speed = TrafficMetricGrid::filled(11, 4, 10.0);
        let result = walk(&speed, 0, 30, 0.1);
        assert_eq!(result.travel_time, MISSING_VALUE);
    }

    #[test]
    fn test_missing_speed_is_undetermined() {
        let mut speed = TrafficMetricGrid::filled(11, 10, 60.0);
        speed.set(4, 0, MISSING_VALUE);
        let result = walk(&speed, 0, 30, 0.1);
        assert_eq!(result.travel_time, MISSING_VALUE);
    }

    #[test]
    fn test_single_row_route() {
        let speed = TrafficMetricGrid::filled(1, 3, 60.0);
        assert_eq!(walk(&speed, 0, 30, 0.1).travel_time, 0.0);
    }
}
