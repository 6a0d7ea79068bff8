//! Rounded-corner masking of bitmap images.
//!
//! The mask is built inside an offscreen layer: the layer is cleared, an opaque anti-aliased
//! rounded rectangle is filled into it, and the bitmap is then drawn with source-in compositing so
//! only the pixels under the mask's alpha survive. Closing the layer merges the result back.

use crate::foundation::core::{Rect, Rgba8Premul};
use crate::paint::SRC_IN;
use crate::source::{BitmapImage, ImageSource, draw_unrounded};
use crate::surface::{LayerScope, Surface};

/// Which branch a [`CornerMaskRenderer::render`] call took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskPath {
    /// Bitmap drawn through the rounded-rectangle mask.
    Masking,
    /// Plain draw: no bitmap, or a radius that is not positive.
    Passthrough,
}

/// Draws images clipped to a rounded rectangle.
///
/// Stateless: nothing is cached between frames, so the same renderer can serve any number of
/// views and every call re-rasterizes the mask.
#[derive(Clone, Copy, Debug, Default)]
pub struct CornerMaskRenderer;

impl CornerMaskRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw `image` onto `surface`, rounding the corners of `bounds` by `corner_radius`.
    ///
    /// Masking only applies to bitmap sources with a positive radius; everything else (including
    /// a NaN radius) falls back to the plain draw. The image's paint is left exactly as it was
    /// found and the surface's save count is restored.
    #[tracing::instrument(level = "trace", skip_all, fields(radius = corner_radius))]
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        image: &mut ImageSource,
        bounds: Rect,
        corner_radius: f64,
    ) -> MaskPath {
        match image {
            ImageSource::Bitmap(bitmap) if corner_radius > 0.0 => {
                mask_bitmap(surface, bitmap, bounds, corner_radius);
                MaskPath::Masking
            }
            other => {
                tracing::trace!("passthrough");
                other.draw(surface);
                MaskPath::Passthrough
            }
        }
    }
}

fn mask_bitmap(surface: &mut dyn Surface, image: &mut BitmapImage, bounds: Rect, radius: f64) {
    let mask_rect = bounds;
    let mut layer = LayerScope::open(surface, mask_rect);

    let (bitmap, image_bounds, paint) = image.parts_mut();
    let mut paint = paint.scoped();
    paint.anti_alias = true;
    paint.color = Rgba8Premul::OPAQUE_BLACK;

    layer.clear_argb(0, 0, 0, 0);
    layer.fill_round_rect(mask_rect, radius, radius, &paint);

    // The bitmap keeps its own paint alpha; only the mask fill needed opaque black.
    paint.color = paint.saved().color;
    paint.compose = SRC_IN;
    draw_unrounded(&mut *layer, bitmap, image_bounds, &paint);

    // Paint state first, then the layer.
    drop(paint);
    drop(layer);
}

#[cfg(test)]
#[path = "../tests/unit/mask.rs"]
mod tests;
