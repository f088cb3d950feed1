use image::ImageEncoder;

use crate::foundation::core::Canvas;
use crate::foundation::error::{HeadlinerError, HeadlinerResult};
use crate::foundation::math::over_in_place;

/// A card being drawn, as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**, tightly packed, row-major. After background composition
/// every pixel is opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl Surface {
    /// Surface filled with one premultiplied color.
    pub fn filled(canvas: Canvas, rgba_premul: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(canvas.pixel_count() * 4);
        for _ in 0..canvas.pixel_count() {
            data.extend_from_slice(&rgba_premul);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Wrap existing premultiplied bytes.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> HeadlinerResult<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return Err(HeadlinerError::render(format!(
                "surface byte len mismatch: {} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Canvas matching this surface.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Blend a same-sized premultiplied layer over this surface.
    pub fn composite_over(&mut self, layer: &[u8]) -> HeadlinerResult<()> {
        over_in_place(&mut self.data, layer)
    }

    /// Straight-alpha RGB8 bytes; alpha is dropped after un-premultiplying.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.width as usize) * (self.height as usize) * 3);
        for px in self.data.chunks_exact(4) {
            let a = u16::from(px[3]);
            if a == 255 {
                out.extend_from_slice(&px[..3]);
            } else if a == 0 {
                out.extend_from_slice(&[0, 0, 0]);
            } else {
                for &c in &px[..3] {
                    let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
                    out.push(v.min(255) as u8);
                }
            }
        }
        out
    }

    /// Encode as an RGB8 PNG.
    pub fn encode_png(&self) -> HeadlinerResult<Vec<u8>> {
        let rgb = self.to_rgb8();
        let mut buf = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buf)
            .write_image(&rgb, self.width, self.height, image::ExtendedColorType::Rgb8)
            .map_err(|e| HeadlinerError::encode(format!("png encoding failed: {e}")))?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
