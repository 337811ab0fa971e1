// src/data_analysis/trimming.rs

use tracing::debug;

use crate::config::TrimWindow;
use crate::data_analysis::aligned_series::{AlignedRow, AlignedSeries};
use crate::error::{Result, SyncError};

/// Restricts a series to `(start_time, start_time + duration)` and rebases it to start at 0.
///
/// Both bounds are exclusive. Without a start, `duration` is an absolute cutoff measured
/// from time 0. A bound of exactly 0 counts as absent, like an empty field in the cut form.
/// An unbounded window returns the series unchanged.
///
/// # Errors
///
/// - [`SyncError::InvalidConfig`] for negative or non-finite bounds
/// - [`SyncError::EmptyWindow`] when no row falls inside the window
pub fn trim(series: &AlignedSeries, window: &TrimWindow) -> Result<AlignedSeries> {
    window.validate()?;
    if window.is_unbounded() {
        return Ok(series.clone());
    }

    let start = window.start_time.filter(|s| *s > 0.0);
    let duration = window.duration.filter(|d| *d > 0.0);
    let end = match (start, duration) {
        (Some(s), Some(d)) => Some(s + d),
        (None, Some(d)) => Some(d),
        (_, None) => None,
    };

    let mut rows: Vec<AlignedRow> = series
        .rows()
        .iter()
        .filter(|r| start.map_or(true, |s| r.seconds_passed > s))
        .filter(|r| end.map_or(true, |e| r.seconds_passed < e))
        .cloned()
        .collect();

    if rows.is_empty() {
        return Err(SyncError::empty_window(window.start_time, window.duration));
    }

    // Starting at 0 again
    let min = rows.iter().map(|r| r.seconds_passed).fold(f64::INFINITY, f64::min);
    for row in &mut rows {
        row.seconds_passed -= min;
    }

    debug!(
        "Trimmed {} rows to {} (start: {:?}, end: {:?})",
        series.len(),
        rows.len(),
        start,
        end
    );
    Ok(AlignedSeries::from_parts(series.channels().to_vec(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(seconds: &[f64]) -> AlignedSeries {
        AlignedSeries::new(
            vec!["AccX(g)".to_string()],
            seconds.iter().map(|&t| AlignedRow::new(t, vec![Some(t * 10.0)])).collect(),
        )
        .unwrap()
    }

    #[test]
    fn unbounded_window_passes_through() {
        let series = ramp(&[0.5, 1.0, 2.0]);
        assert_eq!(trim(&series, &TrimWindow::default()).unwrap(), series);
    }

    #[test]
    fn start_only_is_a_left_cut() {
        let out = trim(&ramp(&[0.0, 1.0, 2.0, 3.0]), &TrimWindow::new(Some(1.0), None)).unwrap();
        assert_eq!(out.seconds_passed(), vec![0.0, 1.0]);
        assert_eq!(out.channel("AccX(g)").unwrap(), vec![Some(20.0), Some(30.0)]);
    }

    #[test]
    fn zero_start_is_no_cut() {
        let series = ramp(&[0.0, 1.0, 2.0]);
        let out = trim(&series, &TrimWindow::new(Some(0.0), Some(2.0))).unwrap();
        assert_eq!(out.seconds_passed(), vec![0.0, 1.0]);
    }

    #[test]
    fn empty_window_is_an_error() {
        let err = trim(&ramp(&[0.0, 1.0, 2.0]), &TrimWindow::new(Some(5.0), Some(1.0))).unwrap_err();
        assert!(matches!(
            err,
            SyncError::EmptyWindow { start: Some(_), duration: Some(_) }
        ));
    }

    #[test]
    fn negative_bounds_are_rejected() {
        let err = trim(&ramp(&[0.0]), &TrimWindow::new(None, Some(-3.0))).unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));
    }
}
