// src/data_input/log_data.rs

use crate::error::{Result, SyncError};

/// One row of the sensor log.
/// Channel values are indexed by the owning series' column list; empty or non-numeric cells are `None`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawReading {
    pub time: String,              // Device timestamp, e.g. "2025-04-09 17:57:09:5".
    pub values: Vec<Option<f64>>,  // One entry per channel column.
}

impl RawReading {
    pub fn new(time: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            time: time.into(),
            values,
        }
    }
}

/// Unprocessed sensor log, one reading per physical sample, in file row order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawSeries {
    columns: Vec<String>,
    readings: Vec<RawReading>,
}

impl RawSeries {
    /// Builds a series, checking that every reading has one value per column.
    pub fn new(columns: Vec<String>, readings: Vec<RawReading>) -> Result<Self> {
        if let Some((row, reading)) = readings
            .iter()
            .enumerate()
            .find(|(_, r)| r.values.len() != columns.len())
        {
            return Err(SyncError::ColumnMismatch {
                row,
                expected: columns.len(),
                found: reading.values.len(),
            });
        }
        Ok(Self { columns, readings })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn readings(&self) -> &[RawReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_rows() {
        let columns = vec!["AccX(g)".to_string(), "AccY(g)".to_string()];
        let readings = vec![
            RawReading::new("2025-04-09 17:57:09:0", vec![Some(0.1), Some(0.2)]),
            RawReading::new("2025-04-09 17:57:09:250", vec![Some(0.1)]),
        ];
        let err = RawSeries::new(columns, readings).unwrap_err();
        assert!(matches!(
            err,
            SyncError::ColumnMismatch { row: 1, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn empty_series_keeps_columns() {
        let series = RawSeries::new(vec!["AccX(g)".to_string(), "AsZ(°/s)".to_string()], vec![]).unwrap();
        assert_eq!(series.columns(), ["AccX(g)", "AsZ(°/s)"]);
        assert!(series.is_empty());
    }
}

// src/data_input/log_data.rs
