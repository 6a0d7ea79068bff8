//! Bridge between `image` crate buffers and [`Bitmap`].
//!
//! Decoding happens here, outside the masking core; the core only ever sees premultiplied pixels.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Bitmap;
use crate::foundation::error::MaskResult;

/// Decode any format `image` understands into a premultiplied bitmap.
#[tracing::instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn decode_bitmap(bytes: &[u8]) -> MaskResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    bitmap_from_rgba_image(dyn_img.to_rgba8())
}

pub fn bitmap_from_rgba_image(img: image::RgbaImage) -> MaskResult<Bitmap> {
    let (width, height) = img.dimensions();
    Bitmap::from_straight_rgba8(width, height, img.into_raw())
}

/// Straight-alpha copy of `bitmap`, ready for encoding.
pub fn bitmap_to_rgba_image(bitmap: &Bitmap) -> MaskResult<image::RgbaImage> {
    image::RgbaImage::from_raw(bitmap.width(), bitmap.height(), bitmap.to_straight_rgba8())
        .context("bitmap buffer does not match its dimensions")
        .map_err(Into::into)
}

/// Write `bitmap` as a PNG, creating parent directories as needed.
pub fn save_png(path: impl AsRef<Path>, bitmap: &Bitmap) -> MaskResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &bitmap.to_straight_rgba8(),
        bitmap.width(),
        bitmap.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/assets.rs"]
mod tests;
