use crate::foundation::error::{HeadlinerError, HeadlinerResult};

pub use kurbo::{Point, Rect};

/// Default card size: 1080×1350, a 4:5 portrait ratio.
pub const CANVAS_SIZE: Canvas = Canvas {
    width: 1080,
    height: 1350,
};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        CANVAS_SIZE
    }
}

impl Canvas {
    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> HeadlinerResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Check that both dimensions are positive and fit the raster backend (`u16`).
    pub fn validate(self) -> HeadlinerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HeadlinerError::validation(format!(
                "canvas dimensions must be > 0 (got {}x{})",
                self.width, self.height
            )));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(HeadlinerError::validation(format!(
                "canvas dimensions must be <= {} (got {}x{})",
                u16::MAX,
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// Number of pixels on the canvas.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Full-canvas rectangle in pixel coordinates.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channel array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
