use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, imageops::FilterType};

use crate::foundation::core::Canvas;
use crate::foundation::error::HeadlinerResult;

/// Raster image in premultiplied RGBA8 form, sized to a canvas.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Vec<u8>,
}

/// Source-space crop window selected by [`cover_crop_rect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    /// Left edge in source pixels.
    pub x: u32,
    /// Top edge in source pixels.
    pub y: u32,
    /// Width in source pixels.
    pub width: u32,
    /// Height in source pixels.
    pub height: u32,
}

/// Decode encoded image bytes (any format enabled in `image`).
pub fn decode_image(bytes: &[u8]) -> HeadlinerResult<DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img)
}

/// Read encoded image bytes from a local file.
pub fn read_image_bytes(path: &Path) -> HeadlinerResult<Vec<u8>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read background image '{}'", path.display()))?;
    Ok(bytes)
}

/// Largest centered window of the source with the destination aspect ratio.
///
/// The overflowing axis (the longer one relative to the target ratio) is trimmed equally on both
/// sides; the other axis is kept whole. Exact integer cross-multiplication keeps the choice stable
/// for equal ratios.
pub fn cover_crop_rect(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> CropRect {
    let (sw, sh) = (u64::from(src_w.max(1)), u64::from(src_h.max(1)));
    let (dw, dh) = (u64::from(dst_w.max(1)), u64::from(dst_h.max(1)));

    let (crop_w, crop_h) = if sw * dh > sh * dw {
        // Source is wider than the target ratio: trim left and right.
        let w = ((sh * dw + dh / 2) / dh).clamp(1, sw);
        (w, sh)
    } else {
        let h = ((sw * dh + dw / 2) / dw).clamp(1, sh);
        (sw, h)
    };

    CropRect {
        x: ((sw - crop_w) / 2) as u32,
        y: ((sh - crop_h) / 2) as u32,
        width: crop_w as u32,
        height: crop_h as u32,
    }
}

/// Scale and center-crop `img` to exactly cover `canvas` ("cover" semantics, never letterbox).
pub fn cover_fit(img: &DynamicImage, canvas: Canvas) -> PreparedImage {
    let crop = cover_crop_rect(img.width(), img.height(), canvas.width, canvas.height);
    let cropped = img.crop_imm(crop.x, crop.y, crop.width, crop.height);
    let fitted = if cropped.width() == canvas.width && cropped.height() == canvas.height {
        cropped
    } else {
        cropped.resize_exact(canvas.width, canvas.height, FilterType::Lanczos3)
    };

    let rgba = fitted.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage {
        width,
        height,
        rgba8_premul,
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
