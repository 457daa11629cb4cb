//! Per-pixel HSV shifting of the display buffer.
//!
//! Colors are handled in integer HSV: hue in degrees `0..360`, saturation
//! and value in `0..=255`. A shift adds an [`HsvDelta`] to every pixel; hue
//! wraps around the color wheel while saturation and value saturate at their
//! bounds. The [`HsvShifter`] holds the active delta and a dirty flag so the
//! O(width x height) pass only runs when the buffer actually needs it.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use web_time::Instant;

use crate::error::CanvasError;
use crate::status::StatusSink;

/// Degrees in a full turn of the color wheel.
pub const HUE_PERIOD: i32 = 360;

/// Upper bound of the saturation and value channels.
pub const CHANNEL_MAX: i32 = 255;

/// A color in integer HSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub hue: i32,
    pub saturation: i32,
    pub value: i32,
}

impl Hsv {
    pub fn new(hue: i32, saturation: i32, value: i32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert from 8-bit RGB. Achromatic colors get hue 0.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let value = max.round() as i32;
        if delta == 0.0 {
            return Self::new(0, 0, value);
        }
        let saturation = (CHANNEL_MAX as f32 * delta / max).round() as i32;

        let hue = if max == r {
            60.0 * ((g - b) / delta)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Self::new((hue.round() as i32).rem_euclid(HUE_PERIOD), saturation, value)
    }

    /// Convert back to 8-bit RGB.
    pub fn to_rgb(self) -> [u8; 3] {
        let v = self.value.clamp(0, CHANNEL_MAX) as f32;
        let s = self.saturation.clamp(0, CHANNEL_MAX) as f32 / CHANNEL_MAX as f32;
        if s == 0.0 {
            let v = v as u8;
            return [v, v, v];
        }

        let h = self.hue.rem_euclid(HUE_PERIOD) as f32 / 60.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as i32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        let q8 = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        [q8(r), q8(g), q8(b)]
    }

    /// Apply a delta: hue wraps modulo 360, saturation and value clamp.
    pub fn shifted(self, delta: HsvDelta) -> Self {
        let hue = (self.hue.rem_euclid(HUE_PERIOD) + delta.hue.rem_euclid(HUE_PERIOD))
            .rem_euclid(HUE_PERIOD);
        Self {
            hue,
            saturation: self
                .saturation
                .saturating_add(delta.saturation)
                .clamp(0, CHANNEL_MAX),
            value: self.value.saturating_add(delta.value).clamp(0, CHANNEL_MAX),
        }
    }
}

/// A requested (hue, saturation, value) shift.
///
/// Components are unbounded; they are range-normalized when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HsvDelta {
    pub hue: i32,
    pub saturation: i32,
    pub value: i32,
}

impl HsvDelta {
    pub const IDENTITY: HsvDelta = HsvDelta {
        hue: 0,
        saturation: 0,
        value: 0,
    };

    pub fn new(hue: i32, saturation: i32, value: i32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// True when applying this delta cannot change any pixel.
    pub fn is_identity(&self) -> bool {
        self.hue.rem_euclid(HUE_PERIOD) == 0 && self.saturation == 0 && self.value == 0
    }

    pub fn as_tuple(&self) -> (i32, i32, i32) {
        (self.hue, self.saturation, self.value)
    }
}

impl From<(i32, i32, i32)> for HsvDelta {
    fn from((hue, saturation, value): (i32, i32, i32)) -> Self {
        Self::new(hue, saturation, value)
    }
}

impl TryFrom<&[i32]> for HsvDelta {
    type Error = CanvasError;

    fn try_from(components: &[i32]) -> Result<Self, Self::Error> {
        match components {
            [hue, saturation, value] => Ok(Self::new(*hue, *saturation, *value)),
            _ => Err(CanvasError::InvalidHsvDelta {
                found: components.len(),
            }),
        }
    }
}

/// Parses `"dh,ds,dv"`.
impl FromStr for HsvDelta {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(components.as_slice())
    }
}

impl fmt::Display for HsvDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.hue, self.saturation, self.value)
    }
}

/// Holds the active delta and recolors buffers lazily.
#[derive(Debug, Clone)]
pub struct HsvShifter {
    delta: HsvDelta,
    need_recalc: bool,
    progress_step: u8,
}

impl HsvShifter {
    /// `progress_step` is the minimum percentage between two progress
    /// reports during a pass (clamped to 1..=100).
    pub fn new(progress_step: u8) -> Self {
        Self {
            delta: HsvDelta::IDENTITY,
            need_recalc: false,
            progress_step: progress_step.clamp(1, 100),
        }
    }

    pub fn delta(&self) -> HsvDelta {
        self.delta
    }

    pub fn is_dirty(&self) -> bool {
        self.need_recalc
    }

    /// Replace the active delta. The next [`apply`](Self::apply) recolors.
    pub fn set_delta(&mut self, delta: HsvDelta) {
        self.delta = delta;
        self.need_recalc = true;
    }

    /// A freshly generated, unshifted buffer is about to be handed in.
    ///
    /// It needs a pass exactly when the active delta changes pixels.
    pub fn rebase(&mut self) {
        self.need_recalc = !self.delta.is_identity();
    }

    /// Recolor `buffer` with the active delta if dirty.
    ///
    /// Returns whether a pass ran. Progress is reported as "Recoloring N%"
    /// with N non-decreasing and within 0..=100.
    pub fn apply(&mut self, buffer: &mut RgbaImage, status: &dyn StatusSink) -> bool {
        if !self.need_recalc {
            return false;
        }

        let start = Instant::now();
        let delta = self.delta;
        let height = buffer.height().max(1) as u64;
        let step = self.progress_step as u64;
        let mut last_reported = 0u64;
        status.report_progress("Recoloring 0%");

        for (y, row) in buffer.rows_mut().enumerate() {
            for pixel in row {
                let [r, g, b, a] = pixel.0;
                let [r, g, b] = Hsv::from_rgb(r, g, b).shifted(delta).to_rgb();
                pixel.0 = [r, g, b, a];
            }

            let percent = (y as u64 + 1) * 100 / height;
            if percent >= last_reported + step || (percent == 100 && last_reported < 100) {
                last_reported = percent;
                status.report_progress(&format!("Recoloring {}%", percent));
            }
        }

        self.need_recalc = false;
        log::debug!(
            "Recolored {}x{} buffer by ({}) in {:?}",
            buffer.width(),
            buffer.height(),
            delta,
            start.elapsed()
        );
        true
    }
}

impl Default for HsvShifter {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_PROGRESS_STEP_PERCENT)
    }
}
