use crate::foundation::error::{HeadlinerError, HeadlinerResult};

/// Premultiplied RGBA8 pixel.
pub(crate) type PremulRgba8 = [u8; 4];

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Source-over for one premultiplied pixel.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = src[3].saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        out[c] = src[c].saturating_add(mul_div255_u8(u16::from(dst[c]), inv));
    }
    out
}

/// Blend `src` over `dst` in place; both are tightly packed premultiplied RGBA8.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> HeadlinerResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HeadlinerError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Blend one uniform premultiplied color over every pixel of `dst`.
pub(crate) fn over_uniform_in_place(dst: &mut [u8], src: PremulRgba8) {
    if src[3] == 0 {
        return;
    }
    for d in dst.chunks_exact_mut(4) {
        let out = over([d[0], d[1], d[2], d[3]], src);
        d.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
