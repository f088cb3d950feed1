use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::foundation::core::{Canvas, Point, Rect};
use crate::layout::pill::PillGeometry;
use crate::style::policy::{Anchor, LayoutPolicy};
use crate::text::fit::TextBlock;

/// Outer padding applied on every side.
pub const DEFAULT_PADDING: f64 = 70.0;
/// Vertical gap between consecutive stack elements.
pub const DEFAULT_GAP: f64 = 40.0;

/// Spacing constants for [`plan_layout`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Outer padding.
    pub padding: f64,
    /// Gap between present elements.
    pub gap: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            gap: DEFAULT_GAP,
        }
    }
}

/// Stack element identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Tag pill.
    Tag,
    /// Title block.
    Title,
    /// Subtitle block.
    Subtitle,
}

/// One line of text with its final position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Line text.
    pub text: String,
    /// Baseline start point.
    pub baseline: Point,
    /// Line box (top of leading to bottom of descent).
    pub bounds: Rect,
}

/// Fitted text block with positioned lines.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    /// Font size the block was fitted at.
    pub font_size: f32,
    /// Lines top to bottom.
    pub lines: Vec<PlacedLine>,
    /// Union of the line boxes.
    pub bounds: Rect,
}

/// Tag pill with its final position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPill {
    /// Outer rectangle.
    pub rect: Rect,
    /// Corner radius.
    pub radius: f64,
    /// Label text.
    pub label: String,
    /// Label size.
    pub font_size: f32,
    /// Label baseline start point.
    pub baseline: Point,
}

/// Final geometry of one card. Pure data; drawing happens elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPlan {
    /// Canvas the plan was made for.
    pub canvas: Canvas,
    /// Tag pill, absent when the tag is empty.
    pub pill: Option<PlacedPill>,
    /// Title, absent when the title is empty.
    pub title: Option<PlacedText>,
    /// Subtitle, absent when the subtitle is empty.
    pub subtitle: Option<PlacedText>,
    /// Height of the stack including gaps.
    pub stack_height: f64,
    /// Top of the stack.
    pub stack_top: f64,
    /// Present elements in draw order with their bounds.
    pub elements: SmallVec<[(ElementKind, Rect); 3]>,
}

/// Place the tag pill, title and subtitle as one vertical stack.
///
/// Present elements are stacked top to bottom (tag, title, subtitle) with `metrics.gap` between
/// consecutive ones; absent elements take no space and add no gap. The stack is anchored
/// vertically per `policy`, and every line (and the pill) is aligned horizontally on its own.
/// Content larger than the padded canvas is pinned to the start edge.
pub fn plan_layout(
    canvas: Canvas,
    metrics: LayoutMetrics,
    pill: Option<&PillGeometry>,
    title: &TextBlock,
    subtitle: &TextBlock,
    policy: &LayoutPolicy,
) -> LayoutPlan {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let pad = metrics.padding;
    let avail_w = (w - 2.0 * pad).max(0.0);
    let avail_h = (h - 2.0 * pad).max(0.0);

    let mut heights = SmallVec::<[f64; 3]>::new();
    if let Some(p) = pill {
        heights.push(p.height);
    }
    for block in [title, subtitle] {
        if !block.is_empty() {
            heights.push(block_height(block));
        }
    }
    let stack_height = heights.iter().sum::<f64>()
        + (heights.len().saturating_sub(1) as f64) * metrics.gap;

    let stack_top = match policy.vertical_anchor {
        Anchor::Start => {
            let y = pad + policy.vertical_offset;
            y.min(h - stack_height).max(0.0)
        }
        anchor => pad + align_offset(avail_h, stack_height, anchor),
    };

    let mut elements = SmallVec::new();
    let mut y = stack_top;

    let placed_pill = pill.map(|p| {
        let x = pad + align_offset(avail_w, p.width, policy.horizontal_anchor);
        let origin = Point::new(x, y);
        let rect = p.rect_at(origin);
        elements.push((ElementKind::Tag, rect));
        y = rect.y1 + metrics.gap;
        PlacedPill {
            rect,
            radius: p.radius,
            label: p.label.clone(),
            font_size: p.font_size,
            baseline: p.label_baseline_at(origin),
        }
    });

    let mut place = |kind: ElementKind, block: &TextBlock, y: &mut f64| -> Option<PlacedText> {
        if block.is_empty() {
            return None;
        }
        let placed = place_block(block, *y, pad, avail_w, policy.horizontal_anchor);
        elements.push((kind, placed.bounds));
        *y = placed.bounds.y1 + metrics.gap;
        Some(placed)
    };
    let placed_title = place(ElementKind::Title, title, &mut y);
    let placed_subtitle = place(ElementKind::Subtitle, subtitle, &mut y);

    tracing::debug!(
        stack_height,
        stack_top,
        elements = elements.len(),
        "layout planned"
    );

    LayoutPlan {
        canvas,
        pill: placed_pill,
        title: placed_title,
        subtitle: placed_subtitle,
        stack_height,
        stack_top,
        elements,
    }
}

fn place_block(block: &TextBlock, top: f64, x0: f64, avail_w: f64, anchor: Anchor) -> PlacedText {
    let lh = f64::from(block.line_height);
    let baseline_offset = f64::from(block.baseline_offset());
    let mut lines = Vec::with_capacity(block.lines.len());
    let mut bounds: Option<Rect> = None;

    for (i, (text, &width)) in block.lines.iter().zip(&block.line_widths).enumerate() {
        let line_w = f64::from(width);
        let x = x0 + align_offset(avail_w, line_w, anchor);
        let line_top = top + lh * i as f64;
        let line_bounds = Rect::new(x, line_top, x + line_w, line_top + lh);
        bounds = Some(bounds.map_or(line_bounds, |b| b.union(line_bounds)));
        lines.push(PlacedLine {
            text: text.clone(),
            baseline: Point::new(x, line_top + baseline_offset),
            bounds: line_bounds,
        });
    }

    PlacedText {
        font_size: block.font_size,
        lines,
        bounds: bounds.unwrap_or(Rect::new(x0, top, x0, top)),
    }
}

/// Block height in the same f64 line math [`place_block`] uses for line boxes.
fn block_height(block: &TextBlock) -> f64 {
    f64::from(block.line_height) * block.lines.len() as f64
}

fn align_offset(container: f64, content: f64, anchor: Anchor) -> f64 {
    let rem = (container - content).max(0.0);
    match anchor {
        Anchor::Start => 0.0,
        Anchor::Center => rem * 0.5,
        Anchor::End => rem,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
