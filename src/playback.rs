// src/playback.rs
//
// Cooperative playback of a video window. The caller owns the session value and the
// frame source and drives `tick` from its own timer.

use std::time::Duration;

use tracing::{debug, warn};

use crate::constants::FALLBACK_FPS;
use crate::error::{Result, SyncError};

/// A seekable source of decoded frames.
pub trait FrameSource {
    type Frame;

    fn frame_count(&self) -> usize;

    /// Reported frame rate. May be zero or non-finite for broken containers.
    fn fps(&self) -> f64;

    /// Reads frame `index`. `Ok(None)` signals end of stream.
    fn read_frame(&mut self, index: usize) -> Result<Option<Self::Frame>>;
}

/// Half-open range of frames `[start_frame, end_frame)` selected by a time cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameWindow {
    pub start_frame: usize,
    pub end_frame: usize,
}

impl FrameWindow {
    /// Whole video.
    pub fn full(total_frames: usize) -> Self {
        Self {
            start_frame: 0,
            end_frame: total_frames,
        }
    }

    /// Converts a `(start, duration)` cut in seconds into frame indices.
    pub fn from_cut(
        start_s: f64,
        duration_s: Option<f64>,
        fps: f64,
        total_frames: usize,
    ) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(SyncError::invalid_config(format!(
                "fps must be a positive number, got {}",
                fps
            )));
        }
        if !start_s.is_finite() || start_s < 0.0 {
            return Err(SyncError::invalid_config(format!(
                "start time must be a non-negative number, got {}",
                start_s
            )));
        }
        if let Some(d) = duration_s {
            if !d.is_finite() || d < 0.0 {
                return Err(SyncError::invalid_config(format!(
                    "duration must be a non-negative number, got {}",
                    d
                )));
            }
        }

        let start_frame = (start_s * fps).floor() as usize;
        let end_frame = match duration_s {
            Some(d) => (((start_s + d) * fps).floor() as usize).min(total_frames),
            None => total_frames,
        };

        if start_frame >= end_frame {
            return Err(SyncError::empty_window(Some(start_s), duration_s));
        }

        Ok(Self {
            start_frame,
            end_frame,
        })
    }

    pub fn len(&self) -> usize {
        self.end_frame - self.start_frame
    }

    pub fn is_empty(&self) -> bool {
        self.start_frame >= self.end_frame
    }
}

/// Outcome of one playback tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick<F> {
    Frame {
        index: usize,
        time_s: f64,
        progress_percent: u32,
        frame: F,
    },
    Paused,
    Finished,
}

/// Playback position and state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSession {
    pub frame_index: usize,
    pub paused: bool,
    pub finished: bool,
    pub window: FrameWindow,
    pub fps: f64,
    pub total_frames: usize,
}

impl PlaybackSession {
    pub fn start<S: FrameSource>(source: &S, window: FrameWindow) -> Self {
        let reported = source.fps();
        let fps = if reported.is_finite() && reported > 0.0 {
            reported
        } else {
            warn!(
                "Frame source reports {} fps, falling back to {}",
                reported, FALLBACK_FPS
            );
            FALLBACK_FPS
        };

        Self {
            frame_index: window.start_frame,
            paused: false,
            finished: false,
            window,
            fps,
            total_frames: source.frame_count(),
        }
    }

    /// Delay between two ticks, truncated to whole milliseconds.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis((1000.0 / self.fps).floor() as u64)
    }

    pub fn current_time_s(&self) -> f64 {
        self.frame_index as f64 / self.fps
    }

    pub fn toggle_pause(mut self) -> Self {
        self.paused = !self.paused;
        self
    }

    /// Jumps to a position given as a percentage of the whole video.
    pub fn seek_percent(mut self, percent: f64) -> Self {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        self.frame_index = (percent / 100.0 * self.total_frames as f64).floor() as usize;
        self.finished = false;
        debug!("Seek to {:.1}% (frame {})", percent, self.frame_index);
        self
    }

    fn progress_percent(&self, index: usize) -> u32 {
        if self.total_frames == 0 {
            return 100;
        }
        ((index + 1) * 100 / self.total_frames) as u32
    }

    /// Reads the frame at the current position and advances by one.
    pub fn tick<S: FrameSource>(mut self, source: &mut S) -> Result<(Self, Tick<S::Frame>)> {
        if self.finished {
            return Ok((self, Tick::Finished));
        }
        if self.paused {
            return Ok((self, Tick::Paused));
        }
        if self.frame_index >= self.window.end_frame {
            self.finished = true;
            return Ok((self, Tick::Finished));
        }

        let index = self.frame_index;
        match source.read_frame(index)? {
            Some(frame) => {
                let tick = Tick::Frame {
                    index,
                    time_s: index as f64 / self.fps,
                    progress_percent: self.progress_percent(index),
                    frame,
                };
                self.frame_index += 1;
                Ok((self, tick))
            }
            None => {
                debug!("Frame source ended at frame {}", index);
                self.finished = true;
                Ok((self, Tick::Finished))
            }
        }
    }
}
