use super::TrafficDataError;
use serde::{Deserialize, Serialize};

/// sentinel for a data gap. negative values never occur in valid speed,
/// flow or density readings.
pub const MISSING_VALUE: f64 = -1.0;

pub fn is_missing(value: f64) -> bool {
    !value.is_finite() || value < 0.0
}

/// a rectangular `[spatial][time]` grid of traffic values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficMetricGrid {
    rows: Vec<Vec<f64>>,
    n_cols: usize,
}

impl TrafficMetricGrid {
    /// builds a grid, failing if the rows are ragged.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<TrafficMetricGrid, TrafficDataError> {
        let n_cols = rows.first().map(|r| r.len()).unwrap_or_default();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n_cols {
                return Err(TrafficDataError::GridShapeMismatch {
                    row,
                    found: values.len(),
                    expected: n_cols,
                });
            }
        }
        Ok(TrafficMetricGrid { rows, n_cols })
    }

    /// a grid where every cell is [`MISSING_VALUE`]
    pub fn missing(n_rows: usize, n_cols: usize) -> TrafficMetricGrid {
        TrafficMetricGrid {
            rows: vec![vec![MISSING_VALUE; n_cols]; n_rows],
            n_cols,
        }
    }

    pub fn filled(n_rows: usize, n_cols: usize, value: f64) -> TrafficMetricGrid {
        TrafficMetricGrid {
            rows: vec![vec![value; n_cols]; n_rows],
            n_cols,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// cell value, or [`MISSING_VALUE`] when out of range
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.get(row, col).unwrap_or(MISSING_VALUE)
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        self.rows
            .iter()
            .map(|r| r.get(col).copied().unwrap_or(MISSING_VALUE))
            .collect()
    }

    /// copy of the grid keeping only time columns from `start` onward
    pub fn slice_from(&self, start: usize) -> TrafficMetricGrid {
        let rows: Vec<Vec<f64>> = self
            .rows
            .iter()
            .map(|r| r.iter().skip(start).copied().collect())
            .collect();
        let n_cols = self.n_cols.saturating_sub(start);
        TrafficMetricGrid { rows, n_cols }
    }

    /// sum of each time column, skipping gaps
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.n_cols)
            .map(|c| {
                self.rows
                    .iter()
                    .map(|r| r[c])
                    .filter(|v| !is_missing(*v))
                    .sum()
            })
            .collect()
    }

    /// confirms all grids of one computation share row and column counts.
    pub fn ensure_same_shape(grids: &[&TrafficMetricGrid]) -> Result<(), TrafficDataError> {
        let Some(first) = grids.first() else {
            return Ok(());
        };
        for g in grids.iter().skip(1) {
            if g.n_rows() != first.n_rows() || g.n_cols() != first.n_cols() {
                return Err(TrafficDataError::GridCardinalityMismatch(format!(
                    "{}x{} vs {}x{}",
                    first.n_rows(),
                    first.n_cols(),
                    g.n_rows(),
                    g.n_cols()
                )));
            }
        }
        Ok(())
    }
}
