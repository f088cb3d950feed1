use crate::foundation::core::{Point, Rect};
use crate::foundation::error::HeadlinerResult;
use crate::text::shaper::TextMeasure;

/// Default tag label size in pixels.
pub const TAG_FONT_SIZE: f32 = 30.0;
/// Horizontal padding between the pill edge and the label.
pub const TAG_PAD_X: f64 = 32.0;
/// Vertical padding above and below the label.
pub const TAG_PAD_Y: f64 = 12.0;
/// Extra height added to the pill on top of text and padding.
pub const TAG_EXTRA_HEIGHT: f64 = 8.0;

/// Size of the tag pill and where its label sits inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct PillGeometry {
    /// Label text on one line, whitespace runs collapsed to single spaces.
    pub label: String,
    /// Label size in pixels.
    pub font_size: f32,
    /// Label advance.
    pub text_width: f64,
    /// Label ascent at `font_size`.
    pub ascent: f64,
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Corner radius; half the height, so the ends are semicircles.
    pub radius: f64,
}

impl PillGeometry {
    /// Measure a pill for `tag`. Empty or whitespace-only tags have no pill.
    pub fn measure<M: TextMeasure + ?Sized>(
        measure: &mut M,
        tag: &str,
        font_size: f32,
    ) -> HeadlinerResult<Option<Self>> {
        let label = tag.split_whitespace().collect::<Vec<_>>().join(" ");
        if label.is_empty() {
            return Ok(None);
        }
        let text_width = f64::from(measure.advance(&label, font_size)?);
        let vm = measure.vertical_metrics(font_size)?;
        let (ascent, descent) = (f64::from(vm.ascent), f64::from(vm.descent));
        let height = ascent + descent + 2.0 * TAG_PAD_Y + TAG_EXTRA_HEIGHT;
        Ok(Some(Self {
            label,
            font_size,
            text_width,
            ascent,
            width: text_width + 2.0 * TAG_PAD_X,
            height,
            radius: height / 2.0,
        }))
    }

    /// Outer rectangle when the pill's top-left corner is at `origin`.
    pub fn rect_at(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, origin.x + self.width, origin.y + self.height)
    }

    /// Label baseline origin when the pill's top-left corner is at `origin`.
    pub fn label_baseline_at(&self, origin: Point) -> Point {
        Point::new(
            origin.x + TAG_PAD_X,
            origin.y + TAG_PAD_Y + TAG_EXTRA_HEIGHT / 2.0 + self.ascent,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pill.rs"]
mod tests;
