// src/error.rs

use thiserror::Error;

/// Errors raised while loading, aligning, trimming or playing back sensor data.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The aligner received a series without readings.
    #[error("sensor series is empty")]
    EmptyInput,

    /// A timestamp could not be parsed after millisecond normalization.
    #[error("invalid timestamp '{value}' at row {row}: {reason}")]
    InvalidTimestamp {
        /// Zero-based reading index.
        row: usize,
        /// The timestamp text as logged.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// An option value is out of range or not recognized.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A trim or frame window selected nothing.
    #[error("window (start: {start:?}, duration: {duration:?}) contains no samples")]
    EmptyWindow {
        start: Option<f64>,
        duration: Option<f64>,
    },

    /// A reading does not carry one value per column.
    #[error("row {row} has {found} values, expected {expected}")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("sensor log format error at line {line}: {message}")]
    LogFormat { line: usize, message: String },

    #[error("frame source error: {0}")]
    FrameSource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SyncError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates an empty window error.
    pub fn empty_window(start: Option<f64>, duration: Option<f64>) -> Self {
        Self::EmptyWindow { start, duration }
    }

    pub fn log_format(line: usize, message: impl Into<String>) -> Self {
        Self::LogFormat {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_timestamp_names_row_and_value() {
        let err = SyncError::InvalidTimestamp {
            row: 3,
            value: "2025-04-09 xx".to_string(),
            reason: "input contains invalid characters".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("row 3"));
        assert!(message.contains("2025-04-09 xx"));
    }

    #[test]
    fn empty_window_reports_bounds() {
        let err = SyncError::empty_window(Some(8.0), Some(11.0));
        let message = err.to_string();
        assert!(message.contains("contains no samples"));
        assert!(message.contains("8.0"));
        assert!(message.contains("11.0"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: SyncError = io.into();
        assert!(matches!(err, SyncError::Io(_)));
        assert!(err.to_string().contains("missing.txt"));
    }
}

// src/error.rs
