use crate::model::{is_missing, TrafficMetricGrid};

/// fills each gap with the average of the nearest valid cells above and
/// below it at the same time index, or with the single valid neighbour when
/// only one side has data. a column with no valid data stays missing.
pub fn spatial_imputation(grid: &TrafficMetricGrid) -> TrafficMetricGrid {
    let mut result = grid.clone();
    let n_rows = grid.n_rows();
    for col in 0..grid.n_cols() {
        let column = grid.column(col);
        for row in 0..n_rows {
            if !is_missing(column[row]) {
                continue;
            }
            let above = column[..row].iter().rev().find(|v| !is_missing(**v));
            let below = column[row + 1..].iter().find(|v| !is_missing(**v));
            let filled = match (above, below) {
                (Some(a), Some(b)) => Some((a + b) / 2.0),
                (Some(a), None) => Some(*a),
                (None, Some(b)) => Some(*b),
                (None, None) => None,
            };
            if let Some(value) = filled {
                result.set(row, col, value);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MISSING_VALUE;

    #[test]
    fn test_gap_between_two_values_is_averaged() {
        let grid = TrafficMetricGrid::new(vec![
            vec![50.0],
            vec![MISSING_VALUE],
            vec![MISSING_VALUE],
            vec![30.0],
        ])
        .expect("test invariant failed");
        let imputed = spatial_imputation(&grid);
        assert_eq!(imputed.value(1, 0), 40.0);
        assert_eq!(imputed.value(2, 0), 40.0);
    }

    #[test]
    fn test_track_ends_take_single_neighbour() {
        let grid = TrafficMetricGrid::new(vec![
            vec![MISSING_VALUE, MISSING_VALUE],
            vec![45.0, MISSING_VALUE],
            vec![MISSING_VALUE, MISSING_VALUE],
        ])
        .expect("test invariant failed");
        let imputed = spatial_imputation(&grid);
        assert_eq!(imputed.value(0, 0), 45.0);
        assert_eq!(imputed.value(2, 0), 45.0);
        // nothing to borrow from in an all-gap column
        assert_eq!(imputed.value(1, 1), MISSING_VALUE);
    }
}
