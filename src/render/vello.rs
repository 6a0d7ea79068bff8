use std::sync::Arc;

use vello_cpu::peniko::{self, BlendMode, Mix};

use crate::foundation::core::{BezPath, Bitmap, Point, Rect};
use crate::foundation::error::{MaskError, MaskResult};
use crate::paint::{Compose, Paint};
use crate::render::composite;
use crate::render::coverage::RoundRectCoverage;
use crate::surface::Surface;

const PATH_TOLERANCE: f64 = 0.1;

/// [`Surface`] backed by a `vello_cpu` render context.
///
/// Layers map to isolated opacity layers; compositing rules map to `peniko` blend modes. Layer
/// bounds limit `clear_argb` only, other draws are not clipped to them. Anti-aliasing is always
/// on, the paint flag is not consulted.
pub struct VelloSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    layers: Vec<Rect>,
}

impl std::fmt::Debug for VelloSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VelloSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("layers", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl VelloSurface {
    pub fn new(width: u32, height: u32) -> MaskResult<Self> {
        if width == 0 || height == 0 {
            return Err(MaskError::surface(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| MaskError::surface("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| MaskError::surface("surface height exceeds u16"))?;

        tracing::debug!(width, height, "vello surface");
        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            layers: Vec::new(),
        })
    }

    fn clip_rect(&self) -> Rect {
        self.layers.last().copied().unwrap_or_else(|| {
            Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
        })
    }

    /// Close open layers, rasterize, and read the result back.
    pub fn finish(mut self) -> MaskResult<Bitmap> {
        self.restore_to_count(1);
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        Bitmap::from_premul_rgba8(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

impl Surface for VelloSurface {
    fn save_count(&self) -> usize {
        self.layers.len() + 1
    }

    fn save_layer(&mut self, bounds: Rect) -> usize {
        let before = self.save_count();
        let clip = self.clip_rect().intersect(bounds.abs());
        self.ctx.push_opacity_layer(1.0);
        self.layers.push(clip);
        before
    }

    fn restore_to_count(&mut self, count: usize) {
        let count = count.max(1);
        while self.save_count() > count {
            self.layers.pop();
            self.ctx.pop_layer();
        }
    }

    fn clear_argb(&mut self, a: u8, r: u8, g: u8, b: u8) {
        let clip = self.clip_rect();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_blend_mode(blend_mode(Compose::Src));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&rect_to_cpu(clip));
        self.ctx.set_blend_mode(BlendMode::default());
    }

    fn fill_round_rect(&mut self, rect: Rect, rx: f64, ry: f64, paint: &Paint) {
        if rect.abs().intersect(self.clip_rect()).is_zero_area() {
            return;
        }
        let outline = RoundRectCoverage::new(rect, rx, ry, true).outline(PATH_TOLERANCE);
        let [cr, cg, cb, ca] = paint.color.to_straight_rgba();

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_blend_mode(blend_mode(paint.compose));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(cr, cg, cb, ca));
        self.ctx.fill_path(&bezpath_to_cpu(&outline));
        self.ctx.set_blend_mode(BlendMode::default());
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: Rect, paint: &Paint) {
        if dst.width() <= 0.0 || dst.height() <= 0.0 {
            return;
        }
        let pixmap = match bitmap_to_pixmap(bitmap, paint.color.a) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(%err, "skipping bitmap draw");
                return;
            }
        };
        let (bw, bh) = (f64::from(bitmap.width()), f64::from(bitmap.height()));
        let image = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let placement = vello_cpu::kurbo::Affine::translate((dst.x0, dst.y0))
            * vello_cpu::kurbo::Affine::scale_non_uniform(dst.width() / bw, dst.height() / bh);

        self.ctx.set_transform(placement);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_blend_mode(blend_mode(paint.compose));
        self.ctx.set_paint(image);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, bw, bh));
        self.ctx.set_blend_mode(BlendMode::default());
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

fn blend_mode(op: Compose) -> BlendMode {
    let compose = match op {
        Compose::Clear => peniko::Compose::Clear,
        Compose::Src => peniko::Compose::Copy,
        Compose::SrcOver => peniko::Compose::SrcOver,
        Compose::SrcIn => peniko::Compose::SrcIn,
    };
    BlendMode::new(Mix::Normal, compose)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn bitmap_to_pixmap(bitmap: &Bitmap, alpha: u8) -> MaskResult<vello_cpu::Pixmap> {
    let w: u16 = bitmap
        .width()
        .try_into()
        .map_err(|_| MaskError::surface("bitmap width exceeds u16"))?;
    let h: u16 = bitmap
        .height()
        .try_into()
        .map_err(|_| MaskError::surface("bitmap height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(MaskError::surface("bitmap is empty"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(usize::from(w) * usize::from(h));
    for px in bitmap.data().chunks_exact(4) {
        let [r, g, b, a] = composite::modulate([px[0], px[1], px[2], px[3]], alpha);
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 { r, g, b, a });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/vello.rs"]
mod tests;
