//! Software surface backed by a tiny-skia pixmap.

use image::{Rgba, RgbaImage};
use tiny_skia::{
    ColorU8, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

use crate::{Bounds, Color, Point, Surface};

/// Rasterizes draw calls into an in-memory RGBA pixmap.
///
/// Text is not rasterized (tiny-skia has no font support); labels are logged
/// at debug level instead.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Create a surface cleared to `background`. Returns `None` for a zero
    /// width or height.
    pub fn new(width: u32, height: u32, background: Color) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        let [r, g, b, a] = background.to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        Some(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Copy the surface out as a straight-alpha image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            match self.pixmap.pixel(x, y) {
                Some(px) => {
                    let c = px.demultiply();
                    Rgba([c.red(), c.green(), c.blue(), c.alpha()])
                }
                None => Rgba([0, 0, 0, 0]),
            }
        })
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = false;
    paint
}

impl Surface for PixmapSurface {
    fn draw_pixel_buffer(&mut self, buffer: &RgbaImage, origin: Point) {
        let Some(mut src) = Pixmap::new(buffer.width(), buffer.height()) else {
            return;
        };
        for (dst, px) in src.pixels_mut().iter_mut().zip(buffer.pixels()) {
            let [r, g, b, a] = px.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        self.pixmap.draw_pixmap(
            origin.x.round() as i32,
            origin.y.round() as i32,
            src.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn draw_filled_rect(&mut self, rect: Bounds, border: Color, fill: Color) {
        if !(rect.width > 0.0 && rect.height > 0.0) {
            return;
        }
        let Some(area) = Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        self.pixmap
            .fill_rect(area, &paint_for(fill), Transform::identity(), None);

        let path = PathBuilder::from_rect(area);
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(border),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn draw_centered_text(&mut self, text: &str, area: Bounds) {
        log::debug!("Label '{}' centered at {:?} (not rasterized)", text, area.center());
    }
}
