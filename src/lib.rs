//! `cornermask` draws images clipped to a rounded rectangle.
//!
//! The core is [`CornerMaskRenderer`]: on every draw it opens a layer over the image bounds, fills
//! an anti-aliased rounded rectangle, and composites the bitmap into it with source-in. Corners
//! outside the shape end up fully transparent and the interior is the image, untouched.
//!
//! Around it the crate provides the pieces the renderer consumes: a [`Surface`] contract with two
//! implementations ([`CpuSurface`] and the `vello_cpu`-backed [`VelloSurface`]), image sources, a
//! [`RoundedImageView`] host widget, and JSON view attributes.
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod mask;
pub mod paint;
pub mod render;
pub mod source;
pub mod surface;
pub mod view;

pub use config::ViewAttrs;
pub use foundation::core::{Affine, Bitmap, Point, Rect, Rgba8Premul, Size};
pub use foundation::error::{MaskError, MaskResult};
pub use mask::{CornerMaskRenderer, MaskPath};
pub use paint::{Compose, Paint, PaintGuard, SRC_IN};
pub use render::{BackendKind, CpuSurface, VelloSurface};
pub use source::{BitmapImage, ImageSource, ProceduralImage};
pub use surface::{LayerScope, Surface};
pub use view::{RoundedImageView, ScaleType};
