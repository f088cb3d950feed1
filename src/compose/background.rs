use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::assets::decode::{cover_fit, decode_image, read_image_bytes};
use crate::foundation::core::Canvas;
use crate::foundation::error::HeadlinerResult;
use crate::foundation::math::{over_in_place, over_uniform_in_place};
use crate::render::surface::Surface;

/// Scrim opacity, about half.
pub const SCRIM_ALPHA: u8 = 128;

/// Background image input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// No image; the theme background color is used.
    #[default]
    None,
    /// Encoded image bytes already in memory.
    #[serde(skip)]
    Bytes(Vec<u8>),
    /// Encoded image file on disk.
    Path(PathBuf),
}

/// Translucent full-canvas layer over the background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayMode {
    /// No scrim.
    None,
    /// Black scrim, for light text.
    #[default]
    Dark,
    /// White scrim.
    Light,
}

impl OverlayMode {
    /// Straight-alpha scrim color, if any.
    pub fn scrim_color(self) -> Option<Color> {
        match self {
            OverlayMode::None => None,
            OverlayMode::Dark => Some(Color::BLACK.with_alpha(SCRIM_ALPHA)),
            OverlayMode::Light => Some(Color::WHITE.with_alpha(SCRIM_ALPHA)),
        }
    }
}

/// Why the flat theme color was used instead of an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackgroundFallback {
    /// No image was supplied.
    Absent,
    /// The image could not be read.
    Unreadable(String),
    /// The image bytes could not be decoded.
    Undecodable(String),
}

impl std::fmt::Display for BackgroundFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackgroundFallback::Absent => f.write_str("no background image"),
            BackgroundFallback::Unreadable(e) => write!(f, "background image unreadable: {e}"),
            BackgroundFallback::Undecodable(e) => {
                write!(f, "background image undecodable: {e}")
            }
        }
    }
}

/// Background surface plus the fallback taken to produce it, if any.
#[derive(Clone, Debug)]
pub struct ComposedBackground {
    /// Opaque canvas-sized surface.
    pub surface: Surface,
    /// Set when the flat color stands in for the image.
    pub fallback: Option<BackgroundFallback>,
}

/// Paint the background layer of a card.
///
/// A usable image is cover-fitted to the canvas over the flat `background_color`; otherwise the
/// flat color alone is used and the reason is returned. The scrim for `overlay` is blended last.
/// Only an invalid `canvas` is an error; every image problem is a fallback.
pub fn compose_background(
    canvas: Canvas,
    image: &ImageSource,
    overlay: OverlayMode,
    background_color: Color,
) -> HeadlinerResult<ComposedBackground> {
    canvas.validate()?;
    let base = background_color.with_alpha(255).to_premul().to_array();
    let mut surface = Surface::filled(canvas, base);

    let fallback = match load_image(image) {
        Ok(img) => {
            let fitted = cover_fit(&img, canvas);
            if (fitted.width, fitted.height) != (canvas.width, canvas.height) {
                Some(BackgroundFallback::Undecodable(format!(
                    "cover fit produced {}x{}, expected {}x{}",
                    fitted.width, fitted.height, canvas.width, canvas.height
                )))
            } else {
                match over_in_place(&mut surface.data, &fitted.rgba8_premul) {
                    Ok(()) => None,
                    Err(e) => Some(BackgroundFallback::Undecodable(e.to_string())),
                }
            }
        }
        Err(reason) => Some(reason),
    };

    if let Some(scrim) = overlay.scrim_color() {
        over_uniform_in_place(&mut surface.data, scrim.to_premul().to_array());
    }

    match &fallback {
        None | Some(BackgroundFallback::Absent) => {}
        Some(reason) => tracing::warn!(%reason, "using flat background color"),
    }

    Ok(ComposedBackground { surface, fallback })
}

fn load_image(source: &ImageSource) -> Result<image::DynamicImage, BackgroundFallback> {
    let bytes = match source {
        ImageSource::None => return Err(BackgroundFallback::Absent),
        ImageSource::Bytes(b) => std::borrow::Cow::Borrowed(b.as_slice()),
        ImageSource::Path(p) => std::borrow::Cow::Owned(
            read_image_bytes(p).map_err(|e| BackgroundFallback::Unreadable(format!("{e:#}")))?,
        ),
    };
    decode_image(&bytes).map_err(|e| BackgroundFallback::Undecodable(format!("{e:#}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/background.rs"]
mod tests;
