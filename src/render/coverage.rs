//! Anti-aliased coverage of a rounded rectangle, sampled at pixel centres.

use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Point, Rect, RoundedRect};
use crate::foundation::math::unit_to_u8;

/// A rounded rectangle with radii already fitted to its bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundRectCoverage {
    rect: Rect,
    rx: f64,
    ry: f64,
    anti_alias: bool,
}

impl RoundRectCoverage {
    /// Normalize `rect` and fit the radii.
    ///
    /// NaN or non-positive radii give square corners, infinite ones the largest fitting corner.
    /// Radii that do not fit are scaled down uniformly, so `r >= side / 2` on a square yields the inscribed circle.
    pub fn new(rect: Rect, rx: f64, ry: f64, anti_alias: bool) -> Self {
        let rect = rect.abs();
        let (w, h) = (rect.width(), rect.height());
        let unbounded = |r: f64| if r == f64::INFINITY { w.max(h) } else { r };
        let (mut rx, mut ry) = (unbounded(rx), unbounded(ry));
        if !(rx.is_finite() && ry.is_finite()) || rx <= 0.0 || ry <= 0.0 {
            rx = 0.0;
            ry = 0.0;
        }
        // `r + r` overflows above f64::MAX / 2; work with half-extents.
        let (half_w, half_h) = (w * 0.5, h * 0.5);
        if rx > 0.0 && (rx > half_w || ry > half_h) {
            if half_w / rx <= half_h / ry {
                ry = half_w * (ry / rx);
                rx = half_w;
            } else {
                rx = half_h * (rx / ry);
                ry = half_h;
            }
        }
        Self {
            rect,
            rx,
            ry,
            anti_alias,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Fitted corner radii.
    pub fn radii(&self) -> (f64, f64) {
        (self.rx, self.ry)
    }

    /// Approximate signed distance to the outline; negative inside.
    pub fn signed_distance(&self, p: Point) -> f64 {
        let r = self.rect;
        if r.width() <= 0.0 || r.height() <= 0.0 {
            return f64::INFINITY;
        }

        let edge = (r.x0 - p.x)
            .max(p.x - r.x1)
            .max(r.y0 - p.y)
            .max(p.y - r.y1);
        if self.rx <= 0.0 {
            return edge;
        }

        let cx = clamp_to_span(p.x, r.x0 + self.rx, r.x1 - self.rx);
        let cy = clamp_to_span(p.y, r.y0 + self.ry, r.y1 - self.ry);
        let (dx, dy) = (p.x - cx, p.y - cy);
        if dx == 0.0 || dy == 0.0 {
            return edge;
        }

        if self.rx == self.ry {
            return dx.hypot(dy) - self.rx;
        }
        // Elliptical corner: first-order distance g / |grad g|.
        let (rx2, ry2) = (self.rx * self.rx, self.ry * self.ry);
        let g = dx * dx / rx2 + dy * dy / ry2 - 1.0;
        let grad = (2.0 * dx / rx2).hypot(2.0 * dy / ry2);
        if grad <= f64::EPSILON {
            return -self.rx.min(self.ry);
        }
        g / grad
    }

    /// Coverage of pixel `(x, y)` in `0..=255`.
    pub fn coverage(&self, x: i32, y: i32) -> u8 {
        let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        let d = self.signed_distance(center);
        if self.anti_alias {
            unit_to_u8(0.5 - d)
        } else if d <= 0.0 {
            255
        } else {
            0
        }
    }

    /// Vector outline for path-based rasterizers. Elliptical corners are built as circular ones
    /// in a vertically squashed space and scaled back.
    pub fn outline(&self, tolerance: f64) -> BezPath {
        if self.rx <= 0.0 {
            return self.rect.to_path(tolerance);
        }
        let k = self.ry / self.rx;
        let r = self.rect;
        let squashed = Rect::new(r.x0, r.y0 / k, r.x1, r.y1 / k);
        Affine::scale_non_uniform(1.0, k) * RoundedRect::from_rect(squashed, self.rx).to_path(tolerance)
    }

    /// Integer pixel box that may receive non-zero coverage: `(x0, y0, x1, y1)`, exclusive end.
    pub fn pixel_bounds(&self) -> (i32, i32, i32, i32) {
        pixel_box(self.rect)
    }
}

// Fitted radii can overshoot the half-extent by an ulp; collapse the span then.
fn clamp_to_span(v: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return (lo + hi) * 0.5;
    }
    v.clamp(lo, hi)
}

/// Round a rectangle out to whole pixels, saturating at the `i32` range.
pub(crate) fn pixel_box(r: Rect) -> (i32, i32, i32, i32) {
    let to_i = |v: f64| -> i32 {
        if v.is_nan() {
            0
        } else {
            v.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        }
    };
    (
        to_i(r.x0.floor()),
        to_i(r.y0.floor()),
        to_i(r.x1.ceil()),
        to_i(r.y1.ceil()),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/coverage.rs"]
mod tests;
