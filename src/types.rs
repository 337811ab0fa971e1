// src/types.rs
// Type aliases shared by the analysis and plot modules

/// `(seconds_passed, value)` pairs for one channel, ordered by time.
pub type TimeValuePoints = Vec<(f64, f64)>;

/// Channel name and its index in an aligned series.
pub type ChannelSelection = Vec<(String, usize)>;
