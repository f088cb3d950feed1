use kurbo::Shape;

use crate::assets::color::Color;
use crate::foundation::core::Point;
use crate::foundation::error::{HeadlinerError, HeadlinerResult};
use crate::layout::engine::{LayoutPlan, PlacedText};
use crate::render::surface::Surface;
use crate::style::theme::Theme;
use crate::text::shaper::{TextBrushRgba8, TextLayoutEngine};

/// Flattening tolerance for the pill outline, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Shaping engines for the three text roles of one theme.
#[derive(Debug)]
pub(crate) struct RoleEngines {
    pub(crate) tag: TextLayoutEngine,
    pub(crate) headline: TextLayoutEngine,
    pub(crate) subtitle: TextLayoutEngine,
}

/// Draw a planned layout onto `surface`.
///
/// Order: pill background, pill label, title lines, subtitle lines. Everything is rasterized into
/// a transparent layer first and then blended over the surface, so pixels outside the drawn
/// shapes keep their exact background values.
pub(crate) fn paint_layout(
    surface: &mut Surface,
    plan: &LayoutPlan,
    theme: &Theme,
    engines: &mut RoleEngines,
) -> HeadlinerResult<()> {
    if plan.elements.is_empty() {
        return Ok(());
    }
    let w: u16 = surface
        .width
        .try_into()
        .map_err(|_| HeadlinerError::render("surface width exceeds u16"))?;
    let h: u16 = surface
        .height
        .try_into()
        .map_err(|_| HeadlinerError::render("surface height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);

    if let Some(pill) = &plan.pill {
        set_solid_paint(&mut ctx, theme.pill_background_color);
        let rounded = kurbo::RoundedRect::from_rect(pill.rect, pill.radius);
        ctx.fill_path(&bezpath_to_cpu(&rounded.to_path(PATH_TOLERANCE)));
        draw_line(
            &mut ctx,
            &mut engines.tag,
            &pill.label,
            pill.font_size,
            pill.baseline,
            theme.pill_text_color,
        )?;
    }
    if let Some(title) = &plan.title {
        draw_block(&mut ctx, &mut engines.headline, title, theme.accent_color)?;
    }
    if let Some(subtitle) = &plan.subtitle {
        draw_block(
            &mut ctx,
            &mut engines.subtitle,
            subtitle,
            theme.secondary_text_color,
        )?;
    }

    let mut layer = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut layer);
    surface.composite_over(layer.data_as_u8_slice())
}

fn draw_block(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    block: &PlacedText,
    color: Color,
) -> HeadlinerResult<()> {
    for line in &block.lines {
        draw_line(ctx, engine, &line.text, block.font_size, line.baseline, color)?;
    }
    Ok(())
}

/// Shape `text` on one line and fill its glyphs with the baseline starting at `baseline`.
fn draw_line(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    text: &str,
    size_px: f32,
    baseline: Point,
    color: Color,
) -> HeadlinerResult<()> {
    let layout = engine.layout_line(text, size_px, TextBrushRgba8::from(color))?;
    let font = engine.font().vello_font();
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let run_baseline = run.baseline();
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: baseline.x as f32 + g.x,
                y: baseline.y as f32 + (g.y - run_baseline),
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    Ok(())
}

fn set_solid_paint(ctx: &mut vello_cpu::RenderContext, color: Color) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
