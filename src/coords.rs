//! Display-space / image-space coordinate mapping.
//!
//! The display buffer is the origin image shrunk (or grown) by a single
//! [`Scale`] factor, `origin_dimension / display_dimension`. Multiplying a
//! display coordinate by it gives the matching origin-image coordinate,
//! dividing goes the other way. Everything here is stateless.

use selview_ui::{Bounds, Point};

/// Ratio between origin-image and display pixels.
///
/// Always finite and strictly positive, so mapping back to display space
/// can never divide by zero. "No image loaded" is modelled as
/// `Option<Scale>` by callers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Scale(f64);

impl Scale {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    /// Scale for an origin dimension shown at `display` pixels.
    pub fn from_dimensions(origin: u32, display: u32) -> Option<Self> {
        if display == 0 {
            return None;
        }
        Self::new(origin as f64 / display as f64)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

/// A rectangle given by two corners.
///
/// The corners come straight from a drag gesture, so a `Rect` may be
/// inverted (`left > right` or `top > bottom`) until it is normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanned by a start corner and an end corner.
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    /// Swap corners so that `left <= right` and `top <= bottom`.
    pub fn normalized(&self) -> Rect {
        Rect::new(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    pub fn is_inverted(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    pub fn width(&self) -> f32 {
        (self.right - self.left).abs()
    }

    pub fn height(&self) -> f32 {
        (self.bottom - self.top).abs()
    }

    /// Position/size form of the normalized rectangle.
    pub fn to_bounds(&self) -> Bounds {
        let n = self.normalized();
        Bounds::new(n.left, n.top, n.width(), n.height())
    }
}

/// Map a display-space point into origin-image space.
pub fn to_image_point(p: Point, scale: Scale) -> Point {
    let s = scale.get();
    Point::new((p.x as f64 * s) as f32, (p.y as f64 * s) as f32)
}

/// Map a display-space rectangle into origin-image space.
///
/// The rectangle is normalized first, so a selection dragged right-to-left
/// or bottom-to-top still yields a valid rectangle.
pub fn to_image_rect(r: Rect, scale: Scale) -> Rect {
    let n = r.normalized();
    Rect::from_points(
        to_image_point(n.top_left(), scale),
        to_image_point(n.bottom_right(), scale),
    )
}

/// Map an origin-image point into display space.
pub fn from_image_point(p: Point, scale: Scale) -> Point {
    let s = scale.get();
    debug_assert!(s > 0.0, "scale must be positive, got {}", s);
    Point::new((p.x as f64 / s) as f32, (p.y as f64 / s) as f32)
}

/// Map an origin-image rectangle into display space, corner by corner.
pub fn from_image_rect(r: Rect, scale: Scale) -> Rect {
    Rect::from_points(
        from_image_point(r.top_left(), scale),
        from_image_point(r.bottom_right(), scale),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn rect_approx_eq(a: Rect, b: Rect) -> bool {
        approx_eq(a.left, b.left)
            && approx_eq(a.top, b.top)
            && approx_eq(a.right, b.right)
            && approx_eq(a.bottom, b.bottom)
    }

    fn scale(v: f64) -> Scale {
        Scale::new(v).expect("valid scale")
    }

    #[test]
    fn test_scale_rejects_invalid_values() {
        assert!(Scale::new(0.0).is_none());
        assert!(Scale::new(-2.0).is_none());
        assert!(Scale::new(f64::NAN).is_none());
        assert!(Scale::new(f64::INFINITY).is_none());
        assert!(Scale::from_dimensions(100, 0).is_none());
        assert_eq!(Scale::from_dimensions(1000, 250).map(Scale::get), Some(4.0));
    }

    #[test]
    fn test_point_mapping() {
        let s = scale(2.5);
        assert_eq!(to_image_point(Point::new(10.0, 4.0), s), Point::new(25.0, 10.0));
        assert_eq!(from_image_point(Point::new(25.0, 10.0), s), Point::new(10.0, 4.0));
    }

    #[test]
    fn test_inverted_rect_maps_like_swapped_rect() {
        let s = scale(3.0);
        let inverted = Rect::new(50.0, 40.0, 10.0, 5.0);
        let swapped = Rect::new(10.0, 5.0, 50.0, 40.0);

        let mapped = to_image_rect(inverted, s);
        assert_eq!(mapped, to_image_rect(swapped, s));
        assert!(!mapped.is_inverted());
        assert_eq!(mapped, Rect::new(30.0, 15.0, 150.0, 120.0));
    }

    #[test]
    fn test_only_one_axis_inverted() {
        let r = Rect::new(10.0, 40.0, 50.0, 5.0);
        assert!(r.is_inverted());
        assert_eq!(r.normalized(), Rect::new(10.0, 5.0, 50.0, 40.0));
    }

    #[test]
    fn test_round_trip_reconstructs_normalized_rect() {
        let rects = [
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(12.5, 7.25, 300.0, 199.0),
            Rect::new(640.0, 480.0, 1.0, 3.0),
            Rect::new(33.3, 0.1, 33.4, 900.7),
        ];
        for s in [0.1, 0.75, 1.0, 3.2, 17.0] {
            for r in rects {
                let back = from_image_rect(to_image_rect(r, scale(s)), scale(s));
                assert!(
                    rect_approx_eq(back, r.normalized()),
                    "scale {} rect {:?} came back as {:?}",
                    s,
                    r,
                    back
                );
            }
        }
    }

    #[test]
    fn test_to_bounds() {
        let b = Rect::new(20.0, 30.0, 5.0, 10.0).to_bounds();
        assert_eq!(b, Bounds::new(5.0, 10.0, 15.0, 20.0));
    }
}
