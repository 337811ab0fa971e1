// src/data_input/log_parser.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::constants::{LOG_DELIMITER, TIME_COLUMN};
use crate::data_input::log_data::{RawReading, RawSeries};
use crate::error::{Result, SyncError};

/// Parses a tab-separated sensor log from disk.
///
/// The header row must contain a `time` column. Every other column becomes a channel;
/// see [`parse_sensor_log_from_reader`].
pub fn parse_sensor_log<P: AsRef<Path>>(input_file_path: P) -> Result<RawSeries> {
    let path = input_file_path.as_ref();
    let file = File::open(path)?;
    info!("Reading sensor log '{}'", path.display());
    parse_sensor_log_from_reader(BufReader::new(file))
}

/// Parses a tab-separated sensor log from any reader.
///
/// Cells are parsed as `f64`; empty or non-numeric cells become missing values.
/// Rows are kept in file order and timestamps are left unparsed for the aligner.
pub fn parse_sensor_log_from_reader<R: Read>(source: R) -> Result<RawSeries> {
    let mut reader = ReaderBuilder::new()
        .delimiter(LOG_DELIMITER)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    // --- Header Mapping ---
    let header_record = reader.headers()?.clone();
    debug!("Headers found in log: {:?}", header_record);

    let time_idx = header_record
        .iter()
        .position(|h| h == TIME_COLUMN)
        .ok_or_else(|| SyncError::log_format(1, format!("missing '{}' column", TIME_COLUMN)))?;

    // (column index in the file, channel name)
    let channel_columns: Vec<(usize, String)> = header_record
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != time_idx)
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();

    // --- Data Reading ---
    let mut readings: Vec<RawReading> = Vec::new();
    let mut numeric_seen = vec![false; channel_columns.len()];

    for (row_index, result) in reader.records().enumerate() {
        let line = row_index + 2; // +1 for header, +1 for 1-based lines
        let record = result.map_err(|e| SyncError::log_format(line, e.to_string()))?;

        let time = record
            .get(time_idx)
            .ok_or_else(|| SyncError::log_format(line, "missing time field"))?
            .to_string();

        let values: Vec<Option<f64>> = channel_columns
            .iter()
            .map(|(csv_idx, _)| record.get(*csv_idx).and_then(|s| s.parse::<f64>().ok()))
            .collect();

        for (seen, value) in numeric_seen.iter_mut().zip(&values) {
            *seen |= value.is_some();
        }

        readings.push(RawReading::new(time, values));
    }

    if !readings.is_empty() {
        for ((_, name), seen) in channel_columns.iter().zip(&numeric_seen) {
            if !seen {
                warn!("Column '{}' has no numeric values; all of its cells are treated as missing", name);
            }
        }
    }

    info!(
        "Finished reading {} rows with {} channels.",
        readings.len(),
        channel_columns.len()
    );

    let columns = channel_columns.into_iter().map(|(_, name)| name).collect();
    RawSeries::new(columns, readings)
}


// src/data_input/log_parser.rs
