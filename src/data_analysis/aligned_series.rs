// src/data_analysis/aligned_series.rs

use crate::constants::MIN_DISTINCT_DELTA_S;
use crate::error::{Result, SyncError};
use crate::types::TimeValuePoints;

/// One row of an aligned series.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    pub seconds_passed: f64,
    pub values: Vec<Option<f64>>, // Indexed like the series' channel list; `None` marks a missing value.
}

impl AlignedRow {
    pub fn new(seconds_passed: f64, values: Vec<Option<f64>>) -> Self {
        Self {
            seconds_passed,
            values,
        }
    }
}

/// A sensor series on a derived time axis (`seconds_passed`).
///
/// Produced by the aligner and the trimmer; never modified in place.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AlignedSeries {
    channels: Vec<String>,
    rows: Vec<AlignedRow>,
}

impl AlignedSeries {
    /// Builds a series, checking that every row has one value per channel.
    pub fn new(channels: Vec<String>, rows: Vec<AlignedRow>) -> Result<Self> {
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.values.len() != channels.len())
        {
            return Err(SyncError::ColumnMismatch {
                row,
                expected: channels.len(),
                found: r.values.len(),
            });
        }
        Ok(Self { channels, rows })
    }

    /// Callers guarantee the row widths.
    pub(crate) fn from_parts(channels: Vec<String>, rows: Vec<AlignedRow>) -> Self {
        debug_assert!(rows.iter().all(|r| r.values.len() == channels.len()));
        Self { channels, rows }
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn channel_index(&self, name: &str) -> Option<usize> {
        self.channels.iter().position(|c| c == name)
    }

    pub fn seconds_passed(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.seconds_passed).collect()
    }

    /// Values of one channel, row by row. `None` if the channel does not exist.
    pub fn channel(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.channel_index(name)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    /// `(seconds_passed, value)` pairs of one channel with missing values skipped.
    pub fn channel_points(&self, idx: usize) -> TimeValuePoints {
        self.rows
            .iter()
            .filter_map(|r| r.values.get(idx).copied().flatten().map(|v| (r.seconds_passed, v)))
            .collect()
    }

    /// Smallest and largest `seconds_passed`.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        if self.rows.is_empty() {
            return None;
        }
        Some(self.rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.seconds_passed), hi.max(r.seconds_passed))
        }))
    }

    /// Average sample rate in Hz over consecutive rows with distinct timestamps.
    pub fn estimated_sample_rate(&self) -> Option<f64> {
        let mut total_delta = 0.0;
        let mut count = 0usize;
        for pair in self.rows.windows(2) {
            let delta = pair[1].seconds_passed - pair[0].seconds_passed;
            if delta > MIN_DISTINCT_DELTA_S {
                total_delta += delta;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        Some(1.0 / (total_delta / count as f64))
    }

    /// Keeps only the channels at `indices`, in that order.
    pub(crate) fn select_channels(&self, indices: &[usize]) -> Self {
        let channels = indices.iter().map(|&i| self.channels[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| AlignedRow::new(r.seconds_passed, indices.iter().map(|&i| r.values[i]).collect()))
            .collect();
        Self::from_parts(channels, rows)
    }
}
