// src/data_analysis/interpolation.rs

use tracing::debug;

use crate::constants::MAX_TIMEBASE_FRAMES;
use crate::data_analysis::aligned_series::{AlignedRow, AlignedSeries};
use crate::data_analysis::grouping::mean_of_present;
use crate::error::{Result, SyncError};
use crate::types::TimeValuePoints;

// Position of `x` between `a` and `b`; callers guarantee `a < b`.
fn lerp_factor(a: f64, b: f64, x: f64) -> f64 {
    (x - a) / (b - a)
}

/// Performs linear interpolation between two values.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    t.mul_add(b - a, a)
}

/// Evenly spaced timestamps from `t0` to `t1` inclusive at roughly `camera_freq` Hz.
///
/// The point count is `floor((t1 - t0) * camera_freq) + 1`; the last point is exactly `t1`.
/// Grids longer than [`MAX_TIMEBASE_FRAMES`] are rejected.
pub fn synthetic_timebase(t0: f64, t1: f64, camera_freq: f64) -> Result<Vec<f64>> {
    let span = t1 - t0;
    let frames = (span * camera_freq).floor();
    if !frames.is_finite() || frames < 0.0 {
        return Err(SyncError::invalid_config(format!(
            "cannot build a {} Hz timebase over [{}, {}]",
            camera_freq, t0, t1
        )));
    }
    if frames >= MAX_TIMEBASE_FRAMES as f64 {
        return Err(SyncError::invalid_config(format!(
            "a {} Hz timebase over {} s needs more than {} frames",
            camera_freq, span, MAX_TIMEBASE_FRAMES
        )));
    }

    let num_frames = frames as usize + 1;
    if num_frames == 1 {
        return Ok(vec![t0]);
    }

    let step = span / (num_frames - 1) as f64;
    let mut grid: Vec<f64> = (0..num_frames).map(|i| t0 + i as f64 * step).collect();
    if let Some(last) = grid.last_mut() {
        *last = t1;
    }
    Ok(grid)
}

/// Control points of one channel: present values sorted by time, duplicate timestamps averaged.
pub(crate) fn control_points(series: &AlignedSeries, channel_idx: usize) -> TimeValuePoints {
    let mut points = series.channel_points(channel_idx);
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    points
        .chunk_by(|a, b| a.0 == b.0)
        .filter_map(|group| {
            mean_of_present(group.iter().map(|p| Some(p.1))).map(|mean| (group[0].0, mean))
        })
        .collect()
}

/// Value at `t` from time-sorted control points.
///
/// Exact matches are returned directly, otherwise the two bracketing points are
/// interpolated. Outside the covered range the value is missing.
pub fn interpolate_at(points: &[(f64, f64)], t: f64) -> Option<f64> {
    let idx = points.partition_point(|p| p.0 < t);
    if let Some(&(pt, value)) = points.get(idx) {
        if pt == t {
            return Some(value);
        }
    }
    if idx == 0 || idx >= points.len() {
        return None;
    }
    let (t_before, v_before) = points[idx - 1];
    let (t_after, v_after) = points[idx];
    Some(lerp(v_before, v_after, lerp_factor(t_before, t_after, t)))
}

/// Resamples every channel onto a `camera_freq` Hz grid from the first row's time to the last's.
///
/// Out-of-order readings still serve as control points. A last row earlier than the first
/// collapses the grid to the first row's time.
pub(crate) fn interpolate_series(series: &AlignedSeries, camera_freq: f64) -> Result<AlignedSeries> {
    let (first, last) = match (series.rows().first(), series.rows().last()) {
        (Some(first), Some(last)) => (first.seconds_passed, last.seconds_passed),
        _ => return Err(SyncError::EmptyInput),
    };
    let (t0, t1) = (first, last.max(first));
    let grid = synthetic_timebase(t0, t1, camera_freq)?;
    debug!(
        "Interpolating {} rows onto {} frames at {:.3} Hz",
        series.len(),
        grid.len(),
        camera_freq
    );

    let per_channel: Vec<TimeValuePoints> = (0..series.channels().len())
        .map(|idx| control_points(series, idx))
        .collect();

    let rows = grid
        .iter()
        .map(|&t| {
            let values = per_channel.iter().map(|points| interpolate_at(points, t)).collect();
            AlignedRow::new(t, values)
        })
        .collect();

    Ok(AlignedSeries::from_parts(series.channels().to_vec(), rows))
}
