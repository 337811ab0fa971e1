// src/constants.rs

// Sensor log layout.
pub const TIME_COLUMN: &str = "time";
pub const SECONDS_PASSED_COLUMN: &str = "seconds_passed";
pub const LOG_DELIMITER: u8 = b'\t';
pub const EXPORT_DELIMITER: u8 = b',';

// Administrative columns written by the WIT wearable logger. Dropped by default.
pub const DEFAULT_ADMIN_COLUMNS: [&str; 3] = ["DeviceName", "Version()", "Battery level(%)"];

// Timestamp handling. The logger writes "YYYY-MM-DD HH:MM:SS:m" with an unpadded millisecond field.
pub const MILLISECOND_DIGITS: usize = 3;
pub const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

// Grouping defaults.
pub const DEFAULT_GROUP_N: usize = 4;

// Upper bound on interpolated frames (about 46 h at 60 fps).
pub const MAX_TIMEBASE_FRAMES: usize = 10_000_000;

// Two timestamps closer than this are treated as the same instant for rate estimation.
pub const MIN_DISTINCT_DELTA_S: f64 = 1e-9;

// Playback.
pub const FALLBACK_FPS: f64 = 25.0;

// Plot data preparation.
pub const PLOT_RANGE_PADDING_RATIO: f64 = 0.15;
pub const PLOT_FLAT_RANGE_PADDING: f64 = 0.5;
pub const PLOT_TITLE: &str = "Metrics over time";
pub const PLOT_X_LABEL: &str = "Time (s)";
pub const PLOT_Y_LABEL: &str = "Value";

// src/constants.rs
