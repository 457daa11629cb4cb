//! Drawing surface abstraction.
//!
//! Widgets never talk to a graphics API directly. They paint through the
//! [`Surface`] trait, which only knows three primitives: blit a pixel buffer,
//! fill a bordered rectangle and draw a centered label. Hosts implement it on
//! top of whatever backend they use; [`RecordingSurface`] keeps the calls for
//! inspection and [`crate::PixmapSurface`] rasterizes them in software.

use image::RgbaImage;

use crate::{Bounds, Point};

/// RGBA color with components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build a color from 8-bit channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Convert to 8-bit channels, clamping out-of-range components.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// The painting backend a widget renders into.
pub trait Surface {
    /// Draw a pixel buffer with its top-left corner at `origin`.
    fn draw_pixel_buffer(&mut self, buffer: &RgbaImage, origin: Point);

    /// Fill `rect` with `fill` and outline it with `border`.
    fn draw_filled_rect(&mut self, rect: Bounds, border: Color, fill: Color);

    /// Draw a label centered inside `area`.
    fn draw_centered_text(&mut self, text: &str, area: Bounds);
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    PixelBuffer {
        width: u32,
        height: u32,
        origin: Point,
    },
    FilledRect {
        rect: Bounds,
        border: Color,
        fill: Color,
    },
    CenteredText {
        text: String,
        area: Bounds,
    },
}

/// A surface that records draw calls instead of painting them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn draw_pixel_buffer(&mut self, buffer: &RgbaImage, origin: Point) {
        self.commands.push(DrawCommand::PixelBuffer {
            width: buffer.width(),
            height: buffer.height(),
            origin,
        });
    }

    fn draw_filled_rect(&mut self, rect: Bounds, border: Color, fill: Color) {
        self.commands
            .push(DrawCommand::FilledRect { rect, border, fill });
    }

    fn draw_centered_text(&mut self, text: &str, area: Bounds) {
        self.commands.push(DrawCommand::CenteredText {
            text: text.to_string(),
            area,
        });
    }
}
