use serde::{Deserialize, Serialize};

use crate::foundation::error::{HeadlinerError, HeadlinerResult};
use crate::text::shaper::TextMeasure;

/// Extra space between lines as a fraction of the font size.
pub const LEADING_RATIO: f32 = 0.12;

/// Strictly decreasing, non-empty list of font sizes to try, largest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct SizeCandidates(Vec<f32>);

impl SizeCandidates {
    /// Validate an explicit list.
    pub fn new(sizes: Vec<f32>) -> HeadlinerResult<Self> {
        if sizes.is_empty() {
            return Err(HeadlinerError::validation(
                "size candidates must not be empty",
            ));
        }
        if let Some(bad) = sizes.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(HeadlinerError::validation(format!(
                "size candidates must be finite and > 0 (got {bad})"
            )));
        }
        if sizes.windows(2).any(|w| w[1] >= w[0]) {
            return Err(HeadlinerError::validation(
                "size candidates must be strictly decreasing",
            ));
        }
        Ok(Self(sizes))
    }

    /// `start, start - step, ...` down to and including `floor` when it lies on the grid.
    pub fn descending(start: f32, step: f32, floor: f32) -> HeadlinerResult<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(HeadlinerError::validation("size step must be finite and > 0"));
        }
        if !(floor.is_finite() && floor > 0.0 && start.is_finite() && start >= floor) {
            return Err(HeadlinerError::validation(format!(
                "size range must satisfy start >= floor > 0 (got {start}..{floor})"
            )));
        }
        let steps = ((start - floor) / step + 1e-4).floor() as usize;
        Self::new((0..=steps).map(|i| start - step * i as f32).collect())
    }

    /// Title default: 140 down to 60 in steps of 5.
    pub fn title_default() -> Self {
        Self((0..=16).map(|i| 140.0 - 5.0 * i as f32).collect())
    }

    /// Subtitle default: 60 down to 40 in steps of 5.
    pub fn subtitle_default() -> Self {
        Self((0..=4).map(|i| 60.0 - 5.0 * i as f32).collect())
    }

    /// Sizes in the order they are tried.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Largest candidate.
    pub fn largest(&self) -> f32 {
        self.0[0]
    }

    /// Smallest candidate; the floor used when nothing fits.
    pub fn smallest(&self) -> f32 {
        self.0[self.0.len() - 1]
    }
}

impl TryFrom<Vec<f32>> for SizeCandidates {
    type Error = HeadlinerError;

    fn try_from(value: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SizeCandidates> for Vec<f32> {
    fn from(value: SizeCandidates) -> Self {
        value.0
    }
}

/// Wrapped, sized text ready for placement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Chosen font size in pixels.
    pub font_size: f32,
    /// Wrapped lines, top to bottom.
    pub lines: Vec<String>,
    /// Advance of each line at `font_size`.
    pub line_widths: Vec<f32>,
    /// Ascent + descent + leading at `font_size`.
    pub line_height: f32,
    /// `lines.len() * line_height`.
    pub total_height: f32,
    /// Set when even the smallest candidate exceeded the height budget.
    pub overflow: bool,
    /// Ascent at `font_size`; the baseline sits this far below the top of the line's ink box.
    pub ascent: f32,
}

impl TextBlock {
    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Widest line.
    pub fn max_line_width(&self) -> f32 {
        self.line_widths.iter().copied().fold(0.0, f32::max)
    }

    /// Offset from the top of a line box to its baseline.
    pub fn baseline_offset(&self) -> f32 {
        self.font_size * LEADING_RATIO * 0.5 + self.ascent
    }
}

/// Greedy word wrap at one size.
///
/// Words are whitespace-separated. A word joins the current line when the joined line still
/// measures within `max_width`; otherwise it starts a new line. A single word wider than
/// `max_width` keeps a line to itself.
pub fn wrap_words<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    max_width: f32,
    size_px: f32,
) -> HeadlinerResult<(Vec<String>, Vec<f32>)> {
    let mut lines = Vec::new();
    let mut widths = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0f32;

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            current_w = measure.advance(&current, size_px)?;
            continue;
        }
        let candidate = format!("{current} {word}");
        let w = measure.advance(&candidate, size_px)?;
        if w <= max_width {
            current = candidate;
            current_w = w;
        } else {
            lines.push(std::mem::take(&mut current));
            widths.push(current_w);
            current.push_str(word);
            current_w = measure.advance(&current, size_px)?;
        }
    }
    if !current.is_empty() {
        lines.push(current);
        widths.push(current_w);
    }
    Ok((lines, widths))
}

/// Pick the largest candidate size whose wrap at `max_width` fits within `max_height`.
///
/// Only height decides a fit; a word wider than `max_width` stays alone on its line.
/// Candidates are tried in order and the first fit wins. When none fits, the smallest
/// candidate's wrap is returned with `overflow` set. Empty or whitespace-only text yields an
/// empty block at the largest size.
pub fn fit_text<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    max_width: f32,
    max_height: f32,
    candidates: &SizeCandidates,
) -> HeadlinerResult<TextBlock> {
    if !(max_width.is_finite() && max_width > 0.0) || !(max_height.is_finite() && max_height > 0.0)
    {
        return Err(HeadlinerError::validation(format!(
            "text bounds must be finite and > 0 (got {max_width}x{max_height})"
        )));
    }

    if text.split_whitespace().next().is_none() {
        let size = candidates.largest();
        let vm = measure.vertical_metrics(size)?;
        return Ok(TextBlock {
            font_size: size,
            lines: Vec::new(),
            line_widths: Vec::new(),
            line_height: line_height(vm.ascent, vm.descent, size),
            total_height: 0.0,
            overflow: false,
            ascent: vm.ascent,
        });
    }

    let mut last = None;
    for &size in candidates.as_slice() {
        let (lines, line_widths) = wrap_words(measure, text, max_width, size)?;
        let vm = measure.vertical_metrics(size)?;
        let lh = line_height(vm.ascent, vm.descent, size);
        let total = lines.len() as f32 * lh;
        let block = TextBlock {
            font_size: size,
            lines,
            line_widths,
            line_height: lh,
            total_height: total,
            overflow: false,
            ascent: vm.ascent,
        };
        if total <= max_height {
            tracing::debug!(size, lines = block.lines.len(), total, "text fits");
            return Ok(block);
        }
        last = Some(block);
    }

    // Candidates are non-empty, so at least one block was built.
    let mut block = last.ok_or_else(|| HeadlinerError::validation("no size candidates"))?;
    block.overflow = true;
    tracing::debug!(
        size = block.font_size,
        total = block.total_height,
        max_height,
        "text overflows at smallest size"
    );
    Ok(block)
}

fn line_height(ascent: f32, descent: f32, size: f32) -> f32 {
    ascent + descent + LEADING_RATIO * size
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
