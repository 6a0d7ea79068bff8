use crate::foundation::core::{Bitmap, Rect, Rgba8Premul};
use crate::foundation::error::{MaskError, MaskResult};
use crate::paint::Paint;
use crate::render::composite::{self, PremulRgba8};
use crate::render::coverage::{RoundRectCoverage, pixel_box};
use crate::surface::Surface;

/// Software [`Surface`] over premultiplied RGBA8 buffers.
///
/// Each saved layer is a full-size transparent buffer plus the pixel box it is clipped to. Closing
/// a layer composites it source-over onto the buffer below, inside that box only.
#[derive(Clone)]
pub struct CpuSurface {
    width: u32,
    height: u32,
    base: Vec<u8>,
    layers: Vec<Layer>,
}

#[derive(Clone)]
struct Layer {
    clip: PixelClip,
    pixels: Vec<u8>,
}

/// Half-open pixel box `[x0, x1) x [y0, y1)`, always inside the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PixelClip {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl PixelClip {
    fn intersect(self, (x0, y0, x1, y1): (i32, i32, i32, i32)) -> Self {
        let x0 = x0.clamp(self.x0, self.x1);
        let y0 = y0.clamp(self.y0, self.y1);
        Self {
            x0,
            y0,
            x1: x1.clamp(x0, self.x1),
            y1: y1.clamp(y0, self.y1),
        }
    }

    fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl CpuSurface {
    /// Transparent surface of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> MaskResult<Self> {
        Self::with_background(width, height, Rgba8Premul::transparent())
    }

    /// Surface pre-filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Rgba8Premul) -> MaskResult<Self> {
        if width == 0 || height == 0 {
            return Err(MaskError::surface(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        let _: u16 = width
            .try_into()
            .map_err(|_| MaskError::surface("surface width exceeds u16"))?;
        let _: u16 = height
            .try_into()
            .map_err(|_| MaskError::surface("surface height exceeds u16"))?;

        tracing::debug!(width, height, "cpu surface");
        Ok(Self {
            width,
            height,
            base: background.to_array().repeat(width as usize * height as usize),
            layers: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Base-layer pixel. Content of still-open layers is not visible here.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x as i32, y as i32);
        let px = &self.base[i..i + 4];
        Some(Rgba8Premul::from_array([px[0], px[1], px[2], px[3]]))
    }

    /// Base-layer bytes, premultiplied RGBA8, row-major.
    pub fn data(&self) -> &[u8] {
        &self.base
    }

    /// Copy of the base layer as a [`Bitmap`].
    pub fn to_bitmap(&self) -> MaskResult<Bitmap> {
        Bitmap::from_premul_rgba8(self.width, self.height, self.base.clone())
    }

    fn full_clip(&self) -> PixelClip {
        PixelClip {
            x0: 0,
            y0: 0,
            x1: self.width as i32,
            y1: self.height as i32,
        }
    }

    fn clip(&self) -> PixelClip {
        self.layers
            .last()
            .map(|l| l.clip)
            .unwrap_or_else(|| self.full_clip())
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Run `f` on every pixel of `area` in the innermost layer.
    fn for_each_pixel(
        &mut self,
        area: (i32, i32, i32, i32),
        mut f: impl FnMut(i32, i32, PremulRgba8) -> Option<PremulRgba8>,
    ) {
        let clip = self.clip().intersect(area);
        if clip.is_empty() {
            return;
        }
        let stride = self.width as usize * 4;
        let target = match self.layers.last_mut() {
            Some(layer) => &mut layer.pixels,
            None => &mut self.base,
        };
        for y in clip.y0..clip.y1 {
            let row = &mut target[y as usize * stride..(y as usize + 1) * stride];
            for x in clip.x0..clip.x1 {
                let i = x as usize * 4;
                let px = &mut row[i..i + 4];
                if let Some(out) = f(x, y, [px[0], px[1], px[2], px[3]]) {
                    px.copy_from_slice(&out);
                }
            }
        }
    }
}

impl Surface for CpuSurface {
    fn save_count(&self) -> usize {
        self.layers.len() + 1
    }

    fn save_layer(&mut self, bounds: Rect) -> usize {
        let before = self.save_count();
        let clip = self.clip().intersect(pixel_box(bounds));
        tracing::trace!(?clip, depth = before, "save_layer");
        self.layers.push(Layer {
            clip,
            pixels: vec![0; self.base.len()],
        });
        before
    }

    fn restore_to_count(&mut self, count: usize) {
        let count = count.max(1);
        while self.save_count() > count {
            let Some(layer) = self.layers.pop() else {
                break;
            };
            let stride = self.width as usize * 4;
            let below = match self.layers.last_mut() {
                Some(l) => &mut l.pixels,
                None => &mut self.base,
            };
            let clip = layer.clip;
            if clip.is_empty() {
                continue;
            }
            let (start, end) = (clip.x0 as usize * 4, clip.x1 as usize * 4);
            for y in clip.y0 as usize..clip.y1 as usize {
                let row = y * stride;
                let src = &layer.pixels[row + start..row + end];
                let dst = &mut below[row + start..row + end];
                for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                    let out = composite::over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                    d.copy_from_slice(&out);
                }
            }
        }
    }

    fn clear_argb(&mut self, a: u8, r: u8, g: u8, b: u8) {
        let color = Rgba8Premul::from_straight_rgba(r, g, b, a).to_array();
        let full = (0, 0, self.width as i32, self.height as i32);
        self.for_each_pixel(full, |_, _, _| Some(color));
    }

    fn fill_round_rect(&mut self, rect: Rect, rx: f64, ry: f64, paint: &Paint) {
        let shape = RoundRectCoverage::new(rect, rx, ry, paint.anti_alias);
        let color = paint.color.to_array();
        let op = paint.compose;
        self.for_each_pixel(shape.pixel_bounds(), |x, y, dst| {
            let cover = shape.coverage(x, y);
            (cover != 0).then(|| composite::blend(op, dst, color, cover))
        });
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: Rect, paint: &Paint) {
        if bitmap.width() == 0 || bitmap.height() == 0 || dst.width() <= 0.0 || dst.height() <= 0.0
        {
            return;
        }
        let sx = f64::from(bitmap.width()) / dst.width();
        let sy = f64::from(bitmap.height()) / dst.height();
        let (bw, bh) = (bitmap.width() - 1, bitmap.height() - 1);
        let alpha = paint.color.a;
        let op = paint.compose;
        self.for_each_pixel(pixel_box(dst), |x, y, px| {
            let (cx, cy) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
            if cx < dst.x0 || cx >= dst.x1 || cy < dst.y0 || cy >= dst.y1 {
                return None;
            }
            let u = (((cx - dst.x0) * sx).floor() as u32).min(bw);
            let v = (((cy - dst.y0) * sy).floor() as u32).min(bh);
            let src = bitmap.pixel(u, v)?.to_array();
            Some(composite::blend(op, px, composite::modulate(src, alpha), 255))
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
