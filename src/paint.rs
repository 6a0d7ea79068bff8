//! Paint state shared between an image source and the surface it is drawn on.

use std::ops::{Deref, DerefMut};

use crate::foundation::core::Rgba8Premul;

/// Porter-Duff compositing rule applied when a paint is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compose {
    /// `D' = 0`
    Clear,
    /// `D' = S`
    Src,
    /// `D' = S + D(1 - Sa)`
    #[default]
    SrcOver,
    /// `D' = S * Da`: the source survives only where the destination already has alpha.
    SrcIn,
}

/// Compositing mode used to paint an image through a previously drawn mask.
pub const SRC_IN: Compose = Compose::SrcIn;

/// Mutable draw configuration, owned by the image source it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paint {
    pub anti_alias: bool,
    /// Fill colour. When drawing a bitmap only its alpha is used, as a modulation factor.
    pub color: Rgba8Premul,
    pub compose: Compose,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            anti_alias: false,
            color: Rgba8Premul::OPAQUE_BLACK,
            compose: Compose::SrcOver,
        }
    }
}

impl Paint {
    /// Borrow this paint for temporary mutation; every field is put back when the guard drops.
    pub fn scoped(&mut self) -> PaintGuard<'_> {
        PaintGuard {
            saved: *self,
            paint: self,
        }
    }
}

/// Restores a [`Paint`] to the state it had when [`Paint::scoped`] was called.
#[must_use = "dropping the guard immediately restores the paint"]
pub struct PaintGuard<'a> {
    paint: &'a mut Paint,
    saved: Paint,
}

impl PaintGuard<'_> {
    /// State the paint will be restored to.
    pub fn saved(&self) -> &Paint {
        &self.saved
    }
}

impl Deref for PaintGuard<'_> {
    type Target = Paint;

    fn deref(&self) -> &Paint {
        self.paint
    }
}

impl DerefMut for PaintGuard<'_> {
    fn deref_mut(&mut self) -> &mut Paint {
        self.paint
    }
}

impl Drop for PaintGuard<'_> {
    fn drop(&mut self) {
        *self.paint = self.saved;
    }
}

#[cfg(test)]
#[path = "../tests/unit/paint.rs"]
mod tests;
