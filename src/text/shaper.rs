use crate::assets::fonts::LoadedFont;
use crate::foundation::error::{HeadlinerError, HeadlinerResult};

/// Reference string for vertical metrics; covers cap height and a descender.
const METRICS_PROBE: &str = "Ay";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl From<crate::assets::color::Color> for TextBrushRgba8 {
    fn from(c: crate::assets::color::Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font-level vertical extents at one size, in pixels (both positive).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalMetrics {
    /// Distance from the baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f32,
}

/// Measurement seam between the fitter and a concrete font.
///
/// Implementations must be deterministic: the same text and size always measure the same.
pub trait TextMeasure {
    /// Horizontal advance of `text` set on a single line at `size_px`.
    fn advance(&mut self, text: &str, size_px: f32) -> HeadlinerResult<f32>;

    /// Ascent and descent of the font at `size_px`.
    fn vertical_metrics(&mut self, size_px: f32) -> HeadlinerResult<VerticalMetrics>;
}

/// Parley contexts bound to a single resolved font.
///
/// The font bytes are registered once; every layout uses that family only, so shaping never
/// depends on what else is installed.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    face: FaceAttrs,
    font: LoadedFont,
}

/// Attributes that select one registered face within its family.
#[derive(Clone, Copy, Debug)]
struct FaceAttrs {
    width: parley::style::FontWidth,
    style: parley::style::FontStyle,
    weight: parley::style::FontWeight,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("family", &self.family)
            .field("face", &self.face)
            .field("font", &self.font)
            .finish()
    }
}

impl TextLayoutEngine {
    /// Construct contexts and register `font` with them.
    pub fn new(font: &LoadedFont) -> HeadlinerResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let (family_id, face) = families
            .iter()
            .find_map(|(id, faces)| {
                faces
                    .iter()
                    .find(|info| info.index() == font.index())
                    .map(|info| {
                        let face = FaceAttrs {
                            width: info.width(),
                            style: info.style(),
                            weight: info.weight(),
                        };
                        (*id, face)
                    })
            })
            .ok_or_else(|| {
                HeadlinerError::font(format!(
                    "no face {} registered from '{}'",
                    font.index(),
                    font.family()
                ))
            })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HeadlinerError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            face,
            font: font.clone(),
        })
    }

    /// The font every layout is shaped with.
    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    /// Shape `text` as one unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> HeadlinerResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(HeadlinerError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWidth(self.face.width));
        builder.push_default(parley::style::StyleProperty::FontStyle(self.face.style));
        builder.push_default(parley::style::StyleProperty::FontWeight(self.face.weight));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextMeasure for TextLayoutEngine {
    fn advance(&mut self, text: &str, size_px: f32) -> HeadlinerResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(text, size_px, TextBrushRgba8::default())?;
        Ok(layout
            .lines()
            .map(|line| line.metrics().advance)
            .fold(0.0f32, f32::max))
    }

    fn vertical_metrics(&mut self, size_px: f32) -> HeadlinerResult<VerticalMetrics> {
        let layout = self.layout_line(METRICS_PROBE, size_px, TextBrushRgba8::default())?;
        let line = layout
            .lines()
            .next()
            .ok_or_else(|| HeadlinerError::render("metrics probe produced no line"))?;
        let m = line.metrics();
        Ok(VerticalMetrics {
            ascent: m.ascent.abs(),
            descent: m.descent.abs(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
