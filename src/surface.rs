//! Drawing-surface contract consumed by the masking core.

use std::ops::{Deref, DerefMut};

use crate::foundation::core::{Bitmap, Rect};
use crate::paint::Paint;

/// A 2D render target with save/restore compositing layers.
///
/// Coordinates are device pixels. Every draw is clipped to the bounds of the innermost open layer.
pub trait Surface {
    /// Number of open layers, including the implicit base layer (so never `0`).
    fn save_count(&self) -> usize;

    /// Open an offscreen layer clipped to `bounds`.
    ///
    /// Returns the save count *before* the layer was opened, suitable for
    /// [`Surface::restore_to_count`].
    fn save_layer(&mut self, bounds: Rect) -> usize;

    /// Close layers until [`Surface::save_count`] equals `count`, compositing each closed layer
    /// onto the one below. Counts at or above the current one are a no-op, and the base layer is
    /// never closed.
    fn restore_to_count(&mut self, count: usize);

    /// Replace every pixel of the current layer clip with the given straight ARGB colour.
    fn clear_argb(&mut self, a: u8, r: u8, g: u8, b: u8);

    /// Fill a rectangle with elliptical corners of radii `rx` / `ry`.
    fn fill_round_rect(&mut self, rect: Rect, rx: f64, ry: f64, paint: &Paint);

    /// Draw `bitmap` scaled into `dst`. The paint alpha modulates the bitmap.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: Rect, paint: &Paint);
}

/// Open layer that is closed again when the scope drops.
pub struct LayerScope<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    restore_to: usize,
}

impl<'a, S: Surface + ?Sized> LayerScope<'a, S> {
    pub fn open(surface: &'a mut S, bounds: Rect) -> Self {
        let restore_to = surface.save_layer(bounds);
        Self {
            surface,
            restore_to,
        }
    }

    /// Save count that will be restored on drop.
    pub fn restore_to(&self) -> usize {
        self.restore_to
    }
}

impl<S: Surface + ?Sized> Deref for LayerScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for LayerScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for LayerScope<'_, S> {
    fn drop(&mut self) {
        self.surface.restore_to_count(self.restore_to);
    }
}
