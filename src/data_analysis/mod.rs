// src/data_analysis/mod.rs

pub mod aligned_series;
pub mod alignment;
pub mod grouping;
pub mod interpolation;
pub mod trimming;

// src/data_analysis/mod.rs
