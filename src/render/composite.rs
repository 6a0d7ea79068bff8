use crate::foundation::math::mul_div255_u8;
use crate::paint::Compose;

pub type PremulRgba8 = [u8; 4];

/// Composite `src` onto `dst` with `op`, then blend with the untouched `dst` by `cover`.
pub fn blend(op: Compose, dst: PremulRgba8, src: PremulRgba8, cover: u8) -> PremulRgba8 {
    if cover == 0 {
        return dst;
    }
    let full = match op {
        Compose::Clear => [0, 0, 0, 0],
        Compose::Src => src,
        Compose::SrcOver => over(dst, src),
        Compose::SrcIn => src_in(dst, src),
    };
    if cover == 255 {
        return full;
    }
    lerp(dst, full, cover)
}

pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub fn src_in(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let da = u16::from(dst[3]);
    match da {
        0 => [0, 0, 0, 0],
        255 => src,
        _ => src.map(|c| mul_div255_u8(u16::from(c), da)),
    }
}

/// Scale every channel by `alpha`; used for paint-alpha modulation.
pub fn modulate(px: PremulRgba8, alpha: u8) -> PremulRgba8 {
    if alpha == 255 {
        return px;
    }
    px.map(|c| mul_div255_u8(u16::from(c), u16::from(alpha)))
}

fn lerp(dst: PremulRgba8, full: PremulRgba8, cover: u8) -> PremulRgba8 {
    let c = u16::from(cover);
    let inv = 255 - c;
    let mut out = [0u8; 4];
    for i in 0..4 {
        let a = mul_div255_u8(u16::from(full[i]), c);
        let b = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = a.saturating_add(b);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
