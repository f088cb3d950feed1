//! Synthetic measurer for geometry tests.

use crate::foundation::error::HeadlinerResult;
use crate::text::shaper::{TextMeasure, VerticalMetrics};

/// Every char is half an em wide; ascent 0.8em, descent 0.2em.
#[derive(Default)]
pub(crate) struct Mono {
    pub(crate) advance_sizes: Vec<f32>,
}

impl TextMeasure for Mono {
    fn advance(&mut self, text: &str, size_px: f32) -> HeadlinerResult<f32> {
        self.advance_sizes.push(size_px);
        Ok(text.chars().count() as f32 * size_px * 0.5)
    }

    fn vertical_metrics(&mut self, size_px: f32) -> HeadlinerResult<VerticalMetrics> {
        Ok(VerticalMetrics {
            ascent: size_px * 0.8,
            descent: size_px * 0.2,
        })
    }
}
