//! Local-capture pacing and sizing.
//!
//! The capture loop runs on every animation tick but only samples when a
//! full frame interval has passed. Samples are encoded to JPEG and offered to
//! the session, which drops them while the socket is not open.

#[cfg(test)]
#[path = "capture_test.rs"]
mod capture_test;

use std::fmt;
use std::str::FromStr;

use crate::RelayError;

/// Frames per second when none is configured.
pub const DEFAULT_FPS: u32 = 10;
/// Frame rates offered by the stream console.
pub const FPS_CHOICES: [u32; 4] = [5, 10, 15, 30];
/// JPEG quality passed to the encoder.
pub const JPEG_QUALITY: f64 = 0.7;
/// Capture size when the source does not report one.
pub const FALLBACK_SIZE: (u32, u32) = (640, 480);
/// Capture size on slow networks with auto-reduce on.
pub const REDUCED_SIZE: (u32, u32) = (320, 240);

/// Requested capture resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resolution {
    /// Use the source's own size.
    #[default]
    Auto,
    Fixed { width: u32, height: u32 },
}

impl Resolution {
    /// Console presets in display order.
    pub const PRESETS: [Resolution; 4] = [
        Resolution::Auto,
        Resolution::Fixed { width: 320, height: 240 },
        Resolution::Fixed { width: 640, height: 360 },
        Resolution::Fixed { width: 1280, height: 720 },
    ];
}

impl FromStr for Resolution {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        let invalid = || RelayError::InvalidResolution(s.to_owned());
        let (w, h) = trimmed.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self::Fixed { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed { width, height } => write!(f, "{width}x{height}"),
        }
    }
}

/// Capture configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureSettings {
    pub fps: u32,
    pub resolution: Resolution,
    pub auto_reduce: bool,
    pub quality: f64,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            resolution: Resolution::Auto,
            auto_reduce: true,
            quality: JPEG_QUALITY,
        }
    }
}

impl CaptureSettings {
    /// Milliseconds between samples. A zero rate falls back to [`DEFAULT_FPS`].
    #[must_use]
    pub fn frame_interval_ms(&self) -> f64 {
        frame_interval_ms(self.fps)
    }

    /// Size to encode at, given the source size (if known) and the browser's
    /// reported effective connection type (if any).
    #[must_use]
    pub fn target_size(&self, source: Option<(u32, u32)>, effective_type: Option<&str>) -> (u32, u32) {
        if self.auto_reduce && is_slow_network(effective_type) {
            return REDUCED_SIZE;
        }
        match self.resolution {
            Resolution::Fixed { width, height } => (width, height),
            Resolution::Auto => source.filter(|(w, h)| *w > 0 && *h > 0).unwrap_or(FALLBACK_SIZE),
        }
    }
}

#[must_use]
pub fn frame_interval_ms(fps: u32) -> f64 {
    let fps = if fps == 0 { DEFAULT_FPS } else { fps };
    1000.0 / f64::from(fps)
}

/// `2g`-class and `3g` connections count as slow.
#[must_use]
pub fn is_slow_network(effective_type: Option<&str>) -> bool {
    matches!(effective_type, Some("slow-2g" | "2g" | "3g"))
}

/// Decides on each tick whether to take a sample.
#[derive(Clone, Debug)]
pub struct CapturePacer {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl CapturePacer {
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            interval_ms: frame_interval_ms(fps),
            last_ms: None,
        }
    }

    /// Change the rate without resetting the last sample time.
    pub fn set_fps(&mut self, fps: u32) {
        self.interval_ms = frame_interval_ms(fps);
    }

    /// True (and records `now_ms`) when a full interval has passed since the
    /// previous sample. The first tick always samples.
    pub fn should_capture(&mut self, now_ms: f64) -> bool {
        let due = self.last_ms.is_none_or(|last| now_ms - last >= self.interval_ms);
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }
}
