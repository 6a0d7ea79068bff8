//! Host widget around [`CornerMaskRenderer`].

use crate::config::ViewAttrs;
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::MaskResult;
use crate::mask::{CornerMaskRenderer, MaskPath};
use crate::source::ImageSource;
use crate::surface::Surface;

/// How an image's intrinsic size is fitted into the view frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    /// Stretch to fill the frame exactly.
    FitXy,
    /// Uniform scale so the whole image fits, centred.
    #[default]
    FitCenter,
    /// Intrinsic size, centred (may overflow the frame).
    Center,
    /// Uniform scale so the frame is filled, centred (may overflow the frame).
    CenterCrop,
}

impl ScaleType {
    /// Bounds an image of size `intrinsic` occupies inside `frame`.
    pub fn place(self, intrinsic: Size, frame: Rect) -> Rect {
        let (iw, ih) = (intrinsic.width, intrinsic.height);
        let (fw, fh) = (frame.width(), frame.height());
        if iw <= 0.0 || ih <= 0.0 || self == Self::FitXy {
            return frame;
        }
        let scale = match self {
            Self::FitXy => 1.0,
            Self::FitCenter => (fw / iw).min(fh / ih),
            Self::Center => 1.0,
            Self::CenterCrop => (fw / iw).max(fh / ih),
        };
        let (w, h) = (iw * scale, ih * scale);
        let mut x = frame.x0 + (fw - w) * 0.5;
        let mut y = frame.y0 + (fh - h) * 0.5;
        if matches!(self, Self::Center | Self::CenterCrop) {
            x = x.round();
            y = y.round();
        }
        Rect::new(x, y, x + w, y + h)
    }
}

/// Image view that draws its image with rounded corners.
///
/// The radius is a plain property: it is read once per [`RoundedImageView::draw`] and `0`
/// (the default) disables rounding.
#[derive(Debug, Default)]
pub struct RoundedImageView {
    corner_radius: f64,
    scale_type: ScaleType,
    frame: Option<Rect>,
    image: Option<ImageSource>,
    renderer: CornerMaskRenderer,
}

impl RoundedImageView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a view from validated attributes.
    pub fn from_attrs(attrs: &ViewAttrs) -> MaskResult<Self> {
        attrs.validate()?;
        let mut view = Self::new();
        view.set_corner_radius(attrs.corner_radius);
        view.set_scale_type(attrs.scale_type);
        if let (Some(w), Some(h)) = (attrs.width, attrs.height) {
            view.set_size(f64::from(w), f64::from(h));
        }
        Ok(view)
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn set_corner_radius(&mut self, corner_radius: f64) {
        self.corner_radius = corner_radius;
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    pub fn set_scale_type(&mut self, scale_type: ScaleType) {
        self.scale_type = scale_type;
    }

    /// Frame on the surface, if one was assigned.
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = Some(frame);
    }

    /// Frame of `width x height` at the surface origin.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.frame = Some(Rect::new(0.0, 0.0, width, height));
    }

    pub fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }

    pub fn image_mut(&mut self) -> Option<&mut ImageSource> {
        self.image.as_mut()
    }

    /// Replace the image, returning the previous one.
    pub fn set_image(&mut self, image: Option<ImageSource>) -> Option<ImageSource> {
        std::mem::replace(&mut self.image, image)
    }

    /// Assign the image's bounds from its intrinsic size, the frame, and the scale type. Without
    /// a frame the image keeps its intrinsic size at the origin.
    pub fn layout(&mut self) {
        let Some(image) = self.image.as_mut() else {
            return;
        };
        let intrinsic = image.intrinsic_size();
        let bounds = match self.frame {
            Some(frame) => self.scale_type.place(intrinsic, frame),
            None => Rect::from_origin_size((0.0, 0.0), intrinsic),
        };
        image.set_bounds(bounds);
    }

    /// Lay out and draw. Returns `None` when there is no image.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> Option<MaskPath> {
        self.layout();
        let image = self.image.as_mut()?;
        let bounds = image.bounds();
        Some(
            self.renderer
                .render(surface, image, bounds, self.corner_radius),
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/view.rs"]
mod tests;
