use super::TetresCliError;
use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;
use tetres_core::model::{InMemoryTrafficReader, TrafficVariable};

/// one row of a traffic data file, with timestamps formatted as
/// `2024-02-06T07:05:00`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficRecord {
    pub station_id: String,
    pub variable: TrafficVariable,
    pub time: NaiveDateTime,
    pub value: f64,
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, TetresCliError> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| TetresCliError::ReadError(path.to_string(), e.to_string()))?;
    serde_json::from_str(&s).map_err(|e| TetresCliError::ReadError(path.to_string(), e.to_string()))
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), TetresCliError> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|e| TetresCliError::WriteError(path.to_string(), e.to_string()))?;
    std::fs::write(path, s).map_err(|e| TetresCliError::WriteError(path.to_string(), e.to_string()))
}

/// loads a traffic data file into memory. rows with an empty value are
/// treated as gaps and skipped.
pub fn read_traffic_csv(path: &str) -> Result<InMemoryTrafficReader, TetresCliError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(Path::new(path))
        .map_err(|e| TetresCliError::ReadError(path.to_string(), e.to_string()))?;
    let mut traffic = InMemoryTrafficReader::new();
    let mut n_skipped = 0;
    for (idx, row) in reader.deserialize::<TrafficRecord>().enumerate() {
        match row {
            Ok(r) => traffic.insert(&r.station_id, r.variable, r.time, r.value),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Deserialize { .. }) => {
                log::debug!("{path} row {idx}: {e}");
                n_skipped += 1;
            }
            Err(e) => {
                return Err(TetresCliError::ReadError(
                    path.to_string(),
                    format!("row {idx}: {e}"),
                ))
            }
        }
    }
    if n_skipped > 0 {
        log::warn!("{path}: skipped {n_skipped} rows without a usable value");
    }
    log::info!(
        "read traffic data for {} station variables from {path}",
        traffic.station_count()
    );
    Ok(traffic)
}

pub fn write_csv<T, I>(path: &str, rows: I) -> Result<usize, TetresCliError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(Path::new(path))
        .map_err(|e| TetresCliError::WriteError(path.to_string(), e.to_string()))?;
    let mut n_rows = 0;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| TetresCliError::WriteError(path.to_string(), e.to_string()))?;
        n_rows += 1;
    }
    writer
        .flush()
        .map_err(|e| TetresCliError::WriteError(path.to_string(), e.to_string()))?;
    Ok(n_rows)
}
