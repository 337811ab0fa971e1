// src/lib.rs - Library interface for internal module access

pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod export;
pub mod playback;
pub mod plot_framework;
pub mod types;

pub use config::{AlignConfig, GroupMethod, SyncConfig, TrimWindow};
pub use data_analysis::aligned_series::{AlignedRow, AlignedSeries};
pub use data_analysis::alignment::align;
pub use data_analysis::trimming::trim;
pub use data_input::log_data::{RawReading, RawSeries};
pub use error::{Result, SyncError};

// Expose crate version derived from vergen-generated env vars at compile time.
pub fn crate_version() -> &'static str {
    option_env!("VERGEN_GIT_SEMVER").unwrap_or(env!("CARGO_PKG_VERSION"))
}
