//! Image sources a view can display.

use crate::foundation::core::{Bitmap, Rect, Size};
use crate::paint::Paint;
use crate::surface::Surface;

/// Draw callback of a [`ProceduralImage`]: paints into the given bounds.
pub type DrawFn = Box<dyn Fn(&mut dyn Surface, Rect)>;

/// Bitmap-backed image: direct pixel storage plus the paint used to draw it.
#[derive(Clone, Debug)]
pub struct BitmapImage {
    bitmap: Bitmap,
    bounds: Rect,
    paint: Paint,
}

impl BitmapImage {
    /// Wrap `bitmap` with bounds at its intrinsic size and a default paint.
    pub fn new(bitmap: Bitmap) -> Self {
        let bounds = Rect::from_origin_size((0.0, 0.0), bitmap.size());
        Self {
            bitmap,
            bounds,
            paint: Paint::default(),
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn paint_mut(&mut self) -> &mut Paint {
        &mut self.paint
    }

    /// Split borrow: pixels and bounds immutably, paint mutably.
    pub fn parts_mut(&mut self) -> (&Bitmap, Rect, &mut Paint) {
        (&self.bitmap, self.bounds, &mut self.paint)
    }

    /// Plain, unclipped draw into the current bounds.
    pub fn draw(&self, surface: &mut dyn Surface) {
        draw_unrounded(surface, &self.bitmap, self.bounds, &self.paint);
    }
}

/// The unrounded bitmap draw every path ends in.
pub(crate) fn draw_unrounded(surface: &mut dyn Surface, bitmap: &Bitmap, bounds: Rect, paint: &Paint) {
    surface.draw_bitmap(bitmap, bounds, paint);
}

/// Image without pixel storage, rendered by a callback (vectors, gradients, ...).
pub struct ProceduralImage {
    draw: DrawFn,
    intrinsic: Size,
    bounds: Rect,
}

impl std::fmt::Debug for ProceduralImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProceduralImage")
            .field("intrinsic", &self.intrinsic)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl ProceduralImage {
    pub fn new(intrinsic: Size, draw: impl Fn(&mut dyn Surface, Rect) + 'static) -> Self {
        Self {
            draw: Box::new(draw),
            intrinsic,
            bounds: Rect::from_origin_size((0.0, 0.0), intrinsic),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        (self.draw)(surface, self.bounds);
    }
}

/// Anything a view can show.
#[derive(Debug)]
pub enum ImageSource {
    Bitmap(BitmapImage),
    Procedural(ProceduralImage),
}

impl From<Bitmap> for ImageSource {
    fn from(bitmap: Bitmap) -> Self {
        Self::Bitmap(BitmapImage::new(bitmap))
    }
}

impl ImageSource {
    pub fn procedural(intrinsic: Size, draw: impl Fn(&mut dyn Surface, Rect) + 'static) -> Self {
        Self::Procedural(ProceduralImage::new(intrinsic, draw))
    }

    /// Natural size of the content before any scaling.
    pub fn intrinsic_size(&self) -> Size {
        match self {
            Self::Bitmap(b) => b.bitmap.size(),
            Self::Procedural(p) => p.intrinsic,
        }
    }

    /// Rectangle the image currently occupies on the surface.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Bitmap(b) => b.bounds,
            Self::Procedural(p) => p.bounds,
        }
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        match self {
            Self::Bitmap(b) => b.bounds = bounds,
            Self::Procedural(p) => p.bounds = bounds,
        }
    }

    /// Direct pixel storage, when this source has it.
    pub fn as_bitmap(&self) -> Option<&BitmapImage> {
        match self {
            Self::Bitmap(b) => Some(b),
            Self::Procedural(_) => None,
        }
    }

    pub fn as_bitmap_mut(&mut self) -> Option<&mut BitmapImage> {
        match self {
            Self::Bitmap(b) => Some(b),
            Self::Procedural(_) => None,
        }
    }

    /// Plain, unclipped draw.
    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Self::Bitmap(b) => b.draw(surface),
            Self::Procedural(p) => p.draw(surface),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/source.rs"]
mod tests;
