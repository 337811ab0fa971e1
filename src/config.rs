// src/config.rs

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GROUP_N;
use crate::error::{Result, SyncError};

/// How readings are grouped when no camera frequency is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GroupMethod {
    /// Mean of every `group_n` consecutive readings.
    #[default]
    NbyN,
    /// Mean of the readings sharing one recorded timestamp.
    SecondsPassed,
    /// Readings pass through unchanged.
    NoGroup,
}

impl GroupMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GroupMethod::NbyN => "NbyN",
            GroupMethod::SecondsPassed => "seconds_passed",
            GroupMethod::NoGroup => "noGroup",
        }
    }
}

impl fmt::Display for GroupMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupMethod {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NbyN" => Ok(GroupMethod::NbyN),
            "seconds_passed" => Ok(GroupMethod::SecondsPassed),
            "noGroup" => Ok(GroupMethod::NoGroup),
            other => Err(SyncError::invalid_config(format!(
                "group method '{}' is invalid, expected one of NbyN, seconds_passed, noGroup",
                other
            ))),
        }
    }
}

impl TryFrom<String> for GroupMethod {
    type Error = SyncError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<GroupMethod> for String {
    fn from(method: GroupMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Options for the sensor series aligner.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignConfig {
    /// Target rate in Hz. When set, interpolation is used and the grouping options are ignored.
    pub camera_freq: Option<f64>,
    pub group_method: GroupMethod,
    /// Block size for [`GroupMethod::NbyN`].
    pub group_n: usize,
    /// Administrative columns removed before processing.
    pub drop_columns: BTreeSet<String>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            camera_freq: None,
            group_method: GroupMethod::default(),
            group_n: DEFAULT_GROUP_N,
            drop_columns: BTreeSet::new(),
        }
    }
}

/// The alignment strategy selected by an [`AlignConfig`] once validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignMode {
    Interpolate { camera_freq: f64 },
    BlockAverage { group_n: usize },
    SecondsPassed,
    NoGroup,
}

impl AlignConfig {
    /// Interpolation onto a `camera_freq` Hz timebase.
    pub fn interpolate(camera_freq: f64) -> Self {
        Self {
            camera_freq: Some(camera_freq),
            ..Self::default()
        }
    }

    pub fn grouped(group_method: GroupMethod) -> Self {
        Self {
            group_method,
            ..Self::default()
        }
    }

    pub fn with_group_n(mut self, group_n: usize) -> Self {
        self.group_n = group_n;
        self
    }

    pub fn with_drop_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the options and resolves the strategy they select.
    pub fn resolve(&self) -> Result<AlignMode> {
        if let Some(camera_freq) = self.camera_freq {
            if !camera_freq.is_finite() || camera_freq <= 0.0 {
                return Err(SyncError::invalid_config(format!(
                    "camera_freq must be a positive number, got {}",
                    camera_freq
                )));
            }
            return Ok(AlignMode::Interpolate { camera_freq });
        }

        match self.group_method {
            GroupMethod::NbyN => {
                if self.group_n == 0 {
                    return Err(SyncError::invalid_config("groupN must be a positive integer"));
                }
                Ok(AlignMode::BlockAverage {
                    group_n: self.group_n,
                })
            }
            GroupMethod::SecondsPassed => Ok(AlignMode::SecondsPassed),
            GroupMethod::NoGroup => Ok(AlignMode::NoGroup),
        }
    }
}

/// A `(start_time, duration)` cut in seconds. Both bounds are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrimWindow {
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
}

impl TrimWindow {
    pub fn new(start_time: Option<f64>, duration: Option<f64>) -> Self {
        Self {
            start_time,
            duration,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start_time.is_none() && self.duration.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("start_time", self.start_time), ("duration", self.duration)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(SyncError::invalid_config(format!(
                        "{} must be a non-negative number, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }
}

fn default_group_n() -> usize {
    DEFAULT_GROUP_N
}

/// The JSON configuration surface. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    #[serde(default)]
    pub camera_freq: Option<f64>,
    #[serde(rename = "groupMethod", default)]
    pub group_method: GroupMethod,
    #[serde(rename = "groupN", default = "default_group_n")]
    pub group_n: usize,
    #[serde(rename = "dropColumns", default)]
    pub drop_columns: BTreeSet<String>,
    #[serde(default)]
    pub start_time: Option<f64>,
    /// Trim duration in seconds.
    #[serde(default)]
    pub video_length: Option<f64>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            camera_freq: None,
            group_method: GroupMethod::default(),
            group_n: DEFAULT_GROUP_N,
            drop_columns: BTreeSet::new(),
            start_time: None,
            video_length: None,
        }
    }
}

impl SyncConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SyncError::invalid_config(e.to_string()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn align_config(&self) -> AlignConfig {
        AlignConfig {
            camera_freq: self.camera_freq,
            group_method: self.group_method,
            group_n: self.group_n,
            drop_columns: self.drop_columns.clone(),
        }
    }

    pub fn trim_window(&self) -> TrimWindow {
        TrimWindow::new(self.start_time, self.video_length)
    }
}
