// src/data_analysis/alignment.rs

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::config::{AlignConfig, AlignMode};
use crate::data_analysis::aligned_series::{AlignedRow, AlignedSeries};
use crate::data_analysis::grouping::{block_average, group_by_seconds_passed};
use crate::data_analysis::interpolation::interpolate_series;
use crate::data_input::log_data::RawSeries;
use crate::data_input::timestamp::{parse_timestamp, seconds_between};
use crate::error::{Result, SyncError};

/// Aligns a raw sensor series onto a new time axis.
///
/// Timestamps are normalized and parsed, `seconds_passed` is derived from the first reading,
/// the configured administrative columns are dropped, and the series is then interpolated
/// (`camera_freq` set), block averaged, grouped by timestamp, or passed through.
///
/// # Errors
///
/// - [`SyncError::InvalidConfig`] for a non-positive `camera_freq` or `group_n`
/// - [`SyncError::EmptyInput`] when `raw` has no readings
/// - [`SyncError::InvalidTimestamp`] for the first timestamp that cannot be parsed
pub fn align(raw: &RawSeries, config: &AlignConfig) -> Result<AlignedSeries> {
    let mode = config.resolve()?;
    if raw.is_empty() {
        return Err(SyncError::EmptyInput);
    }

    let kept = kept_channel_indices(raw.columns(), &config.drop_columns);

    let timestamps = raw
        .readings()
        .iter()
        .enumerate()
        .map(|(row, reading)| parse_timestamp(row, &reading.time))
        .collect::<Result<Vec<_>>>()?;
    let origin = *timestamps.first().ok_or(SyncError::EmptyInput)?;

    let mut rows = Vec::with_capacity(raw.len());
    let mut previous = 0.0;
    for (row, (reading, timestamp)) in raw.readings().iter().zip(&timestamps).enumerate() {
        let seconds_passed = seconds_between(origin, *timestamp);
        if seconds_passed < previous {
            warn!(
                "Reading {} at {:.3}s is earlier than the reading before it ({:.3}s)",
                row, seconds_passed, previous
            );
        }
        previous = seconds_passed;

        let values = kept.iter().map(|&idx| reading.values[idx]).collect();
        rows.push(AlignedRow::new(seconds_passed, values));
    }

    let channels = kept.iter().map(|&idx| raw.columns()[idx].clone()).collect();
    let timed = AlignedSeries::from_parts(channels, rows);

    let aligned = apply_mode(timed, mode)?;
    info!(
        "Aligned {} readings into {} rows ({:?})",
        raw.len(),
        aligned.len(),
        mode
    );
    Ok(aligned)
}

impl AlignedSeries {
    /// Applies an alignment strategy to an already aligned series.
    ///
    /// `seconds_passed` is reused as is, so `noGroup` leaves the series unchanged.
    pub fn regroup(&self, config: &AlignConfig) -> Result<AlignedSeries> {
        let mode = config.resolve()?;
        if self.is_empty() {
            return Err(SyncError::EmptyInput);
        }
        let kept = kept_channel_indices(self.channels(), &config.drop_columns);
        apply_mode(self.select_channels(&kept), mode)
    }
}

fn apply_mode(series: AlignedSeries, mode: AlignMode) -> Result<AlignedSeries> {
    match mode {
        AlignMode::Interpolate { camera_freq } => interpolate_series(&series, camera_freq),
        AlignMode::BlockAverage { group_n } => Ok(block_average(&series, group_n)),
        AlignMode::SecondsPassed => Ok(group_by_seconds_passed(&series)),
        AlignMode::NoGroup => Ok(series),
    }
}

/// Indices of the columns that survive `drop_columns`. Unknown names are reported and ignored.
fn kept_channel_indices(columns: &[String], drop_columns: &BTreeSet<String>) -> Vec<usize> {
    for name in drop_columns {
        if !columns.iter().any(|c| c == name) {
            warn!("Column '{}' requested for dropping is not in the log", name);
        }
    }
    let kept: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, name)| !drop_columns.contains(name.as_str()))
        .map(|(idx, _)| idx)
        .collect();
    debug!("Keeping {} of {} columns", kept.len(), columns.len());
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupMethod;
    use crate::data_input::log_data::RawReading;
    use approx::assert_abs_diff_eq;

    fn wit_series() -> RawSeries {
        RawSeries::new(
            vec![
                "DeviceName".to_string(),
                "AccX(g)".to_string(),
                "Battery level(%)".to_string(),
            ],
            vec![
                RawReading::new("2025-04-09 17:57:09:5", vec![None, Some(0.10), Some(90.0)]),
                RawReading::new("2025-04-09 17:57:09:55", vec![None, Some(0.20), Some(90.0)]),
                RawReading::new("2025-04-09 17:57:09:105", vec![None, Some(0.30), Some(89.0)]),
                RawReading::new("2025-04-09 17:57:09:155", vec![None, Some(0.40), Some(89.0)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn seconds_passed_starts_at_zero_with_millisecond_fields() {
        let config = AlignConfig::grouped(GroupMethod::NoGroup);
        let aligned = align(&wit_series(), &config).unwrap();

        let seconds = aligned.seconds_passed();
        assert_eq!(seconds[0], 0.0);
        assert_abs_diff_eq!(seconds[1], 0.050, epsilon = 1e-12);
        assert_abs_diff_eq!(seconds[2], 0.100, epsilon = 1e-12);
        assert_abs_diff_eq!(seconds[3], 0.150, epsilon = 1e-12);
    }

    #[test]
    fn administrative_columns_are_dropped() {
        let config = AlignConfig::grouped(GroupMethod::NoGroup)
            .with_drop_columns(["DeviceName", "Battery level(%)", "Version()"]);
        let aligned = align(&wit_series(), &config).unwrap();
        assert_eq!(aligned.channels(), ["AccX(g)"]);
        assert_eq!(aligned.rows()[2].values, vec![Some(0.30)]);
    }

    #[test]
    fn default_config_block_averages_four_readings() {
        let aligned = align(&wit_series(), &AlignConfig::default()).unwrap();
        assert_eq!(aligned.len(), 1);
        let acc_x = aligned.channel_index("AccX(g)").unwrap();
        assert_abs_diff_eq!(aligned.rows()[0].values[acc_x].unwrap(), 0.25, epsilon = 1e-12);
        assert_eq!(aligned.rows()[0].values[0], None);
        assert_eq!(aligned.rows()[0].seconds_passed, 0.0);
    }

    #[test]
    fn invalid_timestamp_aborts_alignment() {
        let raw = RawSeries::new(
            vec!["AccX(g)".to_string()],
            vec![
                RawReading::new("2025-04-09 17:57:09:5", vec![Some(0.1)]),
                RawReading::new("09/04/2025 17:57", vec![Some(0.2)]),
            ],
        )
        .unwrap();
        let err = align(&raw, &AlignConfig::default()).unwrap_err();
        assert!(matches!(err, SyncError::InvalidTimestamp { row: 1, .. }));
    }

    #[test]
    fn config_is_checked_before_input() {
        let err = align(&RawSeries::default(), &AlignConfig::interpolate(-1.0)).unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));
        let err = align(&RawSeries::default(), &AlignConfig::default()).unwrap_err();
        assert!(matches!(err, SyncError::EmptyInput));
    }

    #[test]
    fn out_of_order_readings_are_kept() {
        let raw = RawSeries::new(
            vec!["AccX(g)".to_string()],
            vec![
                RawReading::new("2025-04-09 17:57:09:500", vec![Some(0.1)]),
                RawReading::new("2025-04-09 17:57:09:400", vec![Some(0.2)]),
            ],
        )
        .unwrap();
        let aligned = align(&raw, &AlignConfig::grouped(GroupMethod::NoGroup)).unwrap();
        assert_abs_diff_eq!(aligned.rows()[1].seconds_passed, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn regroup_applies_a_second_strategy() {
        let once = align(&wit_series(), &AlignConfig::grouped(GroupMethod::NoGroup)).unwrap();
        let grouped = once
            .regroup(&AlignConfig::default().with_group_n(2).with_drop_columns(["DeviceName"]))
            .unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.channels(), ["AccX(g)", "Battery level(%)"]);
        assert_abs_diff_eq!(grouped.rows()[1].values[0].unwrap(), 0.35, epsilon = 1e-12);
    }
}
