// src/plot_framework.rs
//
// Data side of the metrics plot. Rendering belongs to the plotting surface; this module
// only decides what it draws: series, ranges, labels and the playback cursor.

use std::ops::Range;

use crate::constants::{
    PLOT_FLAT_RANGE_PADDING, PLOT_RANGE_PADDING_RATIO, PLOT_TITLE, PLOT_X_LABEL, PLOT_Y_LABEL,
};
use crate::data_analysis::aligned_series::AlignedSeries;
use crate::error::{Result, SyncError};
use crate::types::{ChannelSelection, TimeValuePoints};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 {
        PLOT_FLAT_RANGE_PADDING
    } else {
        range * PLOT_RANGE_PADDING_RATIO
    };
    (min - padding, max + padding)
}

/// Tick label for the value axis.
/// Large values use "k"/"M" notation, small fractional values keep two decimals.
pub fn format_value_tick(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1000.0 {
        format!("{:.0}k", y / 1000.0)
    } else if y.abs() < 10.0 && y.fract() != 0.0 {
        // Accelerations are fractions of g
        format!("{:.2}", y)
    } else {
        format!("{:.0}", y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub data: TimeValuePoints,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    /// Current playback time, drawn as a vertical marker.
    pub cursor_s: Option<f64>,
}

impl PlotConfig {
    /// Moves the playback marker without rebuilding the series.
    pub fn with_cursor(mut self, cursor_s: Option<f64>) -> Self {
        self.cursor_s = cursor_s;
        self
    }
}

/// Resolves channel names against the series. Empty or unknown selections are rejected.
pub fn select_channels(series: &AlignedSeries, selected: &[String]) -> Result<ChannelSelection> {
    if selected.is_empty() {
        return Err(SyncError::invalid_config("select at least one channel to plot"));
    }
    selected
        .iter()
        .map(|name| {
            series
                .channel_index(name)
                .map(|idx| (name.clone(), idx))
                .ok_or_else(|| SyncError::invalid_config(format!("unknown channel '{}'", name)))
        })
        .collect()
}

/// Builds what the plotting surface needs to draw the selected channels of `series`.
pub fn build_plot_config(
    series: &AlignedSeries,
    selected: &[String],
    cursor_s: Option<f64>,
) -> Result<PlotConfig> {
    let selection = select_channels(series, selected)?;
    let (time_min, time_max) = series.time_span().ok_or(SyncError::EmptyInput)?;

    let plot_series: Vec<PlotSeries> = selection
        .into_iter()
        .map(|(label, idx)| PlotSeries {
            data: series.channel_points(idx),
            label,
        })
        .collect();

    let (value_min, value_max) = plot_series
        .iter()
        .flat_map(|s| s.data.iter().map(|&(_, v)| v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    // Every selected value missing: keep an arbitrary unit range so the axes still draw.
    let (y_min, y_max) = if value_min.is_finite() {
        calculate_range(value_min, value_max)
    } else {
        (0.0, 1.0)
    };

    let x_range = if time_max > time_min {
        time_min..time_max
    } else {
        let (lo, hi) = calculate_range(time_min, time_max);
        lo..hi
    };

    Ok(PlotConfig {
        title: PLOT_TITLE.to_string(),
        x_range,
        y_range: y_min..y_max,
        series: plot_series,
        x_label: PLOT_X_LABEL.to_string(),
        y_label: PLOT_Y_LABEL.to_string(),
        cursor_s,
    })
}
