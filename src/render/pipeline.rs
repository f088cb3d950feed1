use std::collections::HashMap;

use rayon::prelude::*;

use crate::assets::fonts::{FallbackReason, FontResolution, FontResolver, FontRole, LoadedFont};
use crate::compose::background::{BackgroundFallback, compose_background};
use crate::config::EngineConfig;
use crate::foundation::error::{HeadlinerError, HeadlinerResult};
use crate::layout::engine::{LayoutPlan, plan_layout};
use crate::layout::pill::PillGeometry;
use crate::render::painter::{RoleEngines, paint_layout};
use crate::render::surface::Surface;
use crate::request::{RenderRequest, RequestFingerprint};
use crate::style::policy::lookup_layout;
use crate::style::theme::{THEME_NAMES, builtin_theme, lookup_theme};
use crate::text::fit::{TextBlock, fit_text};
use crate::text::shaper::TextLayoutEngine;

/// Something the renderer substituted or gave up on without failing the render.
#[derive(Clone, Debug, PartialEq)]
pub enum Degradation {
    /// The flat theme color replaced the background image.
    BackgroundFallback(BackgroundFallback),
    /// The built-in font replaced a theme font.
    FontFallback {
        /// Role whose font was replaced.
        role: FontRole,
        /// Why the requested font was unavailable.
        reason: FallbackReason,
    },
    /// Text exceeded its height budget even at the smallest size.
    TextOverflow {
        /// Overflowing role.
        role: FontRole,
        /// Size used (the smallest candidate).
        font_size: f32,
        /// Height of the wrapped block.
        height: f32,
        /// Height budget.
        max_height: f32,
    },
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Degradation::BackgroundFallback(reason) => write!(f, "{reason}"),
            Degradation::FontFallback { role, reason } => {
                write!(f, "{} font: {reason}, using built-in font", role.as_str())
            }
            Degradation::TextOverflow {
                role,
                font_size,
                height,
                max_height,
            } => write!(
                f,
                "{} overflows at {font_size}px ({height:.1} > {max_height:.1})",
                role.as_str()
            ),
        }
    }
}

/// A finished card.
#[derive(Clone, Debug)]
pub struct RenderedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB8 PNG bytes.
    pub png: Vec<u8>,
    /// Content key of the request that produced this image.
    pub fingerprint: RequestFingerprint,
    /// Substitutions made while rendering.
    pub degradations: Vec<Degradation>,
}

/// A finished card before encoding, with its layout.
#[derive(Clone, Debug)]
pub struct RenderedSurface {
    /// Final pixels.
    pub surface: Surface,
    /// Geometry the text was drawn with.
    pub plan: LayoutPlan,
    /// Substitutions made while rendering.
    pub degradations: Vec<Degradation>,
}

#[derive(Clone, Debug)]
struct ThemeFonts {
    tag: FontResolution,
    headline: FontResolution,
    subtitle: FontResolution,
}

impl ThemeFonts {
    fn get(&self, role: FontRole) -> &FontResolution {
        match role {
            FontRole::Tag => &self.tag,
            FontRole::Headline => &self.headline,
            FontRole::Subtitle => &self.subtitle,
        }
    }

    fn engines(&self) -> HeadlinerResult<RoleEngines> {
        Ok(RoleEngines {
            tag: TextLayoutEngine::new(self.tag.font())?,
            headline: TextLayoutEngine::new(self.headline.font())?,
            subtitle: TextLayoutEngine::new(self.subtitle.font())?,
        })
    }
}

/// Stateless card renderer.
///
/// Fonts for every catalog theme are resolved once in [`ThumbnailRenderer::new`]; afterwards the
/// renderer is immutable and can be shared across threads. Each render owns its surface and
/// shaping state.
#[derive(Debug)]
pub struct ThumbnailRenderer {
    config: EngineConfig,
    fonts: HashMap<&'static str, ThemeFonts>,
}

impl ThumbnailRenderer {
    /// Validate `config` and resolve all theme fonts.
    ///
    /// Missing fonts fall back to the built-in font; a font file that exists but cannot be parsed
    /// is an error.
    pub fn new(config: EngineConfig) -> HeadlinerResult<Self> {
        config.validate()?;
        let resolver = FontResolver::new(&config.font_root, config.system_fonts);

        let mut fonts = HashMap::with_capacity(THEME_NAMES.len());
        for name in THEME_NAMES {
            let theme = builtin_theme(name)
                .ok_or_else(|| HeadlinerError::validation(format!("missing theme '{name}'")))?;
            let resolve = |role: FontRole| -> HeadlinerResult<FontResolution> {
                let res = resolver.resolve(theme.font(role)).map_err(|e| match e {
                    HeadlinerError::Font(msg) => HeadlinerError::font(format!(
                        "theme '{name}' {} font: {msg}",
                        role.as_str()
                    )),
                    other => other,
                })?;
                if let Some(reason) = res.fallback_reason() {
                    tracing::warn!(theme = name, role = role.as_str(), %reason, "font fallback");
                }
                Ok(res)
            };
            let resolved = ThemeFonts {
                tag: resolve(FontRole::Tag)?,
                headline: resolve(FontRole::Headline)?,
                subtitle: resolve(FontRole::Subtitle)?,
            };
            fonts.insert(name, resolved);
        }

        Ok(Self { config, fonts })
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Font a theme role renders with.
    pub fn font_for(&self, theme: &str, role: FontRole) -> HeadlinerResult<&LoadedFont> {
        let (name, _) = lookup_theme(theme, self.config.catalog_policy)?;
        Ok(self.theme_fonts(name)?.get(role).font())
    }

    fn theme_fonts(&self, name: &str) -> HeadlinerResult<&ThemeFonts> {
        self.fonts
            .get(name)
            .ok_or_else(|| HeadlinerError::validation(format!("no fonts for theme '{name}'")))
    }

    /// Render one card to PNG.
    pub fn render(&self, request: &RenderRequest) -> HeadlinerResult<RenderedImage> {
        let rendered = self.render_surface(request)?;
        let png = rendered.surface.encode_png()?;
        Ok(RenderedImage {
            width: rendered.surface.width,
            height: rendered.surface.height,
            png,
            fingerprint: request.fingerprint(),
            degradations: rendered.degradations,
        })
    }

    /// Render independent cards in parallel; results keep input order.
    pub fn render_batch(&self, requests: &[RenderRequest]) -> Vec<HeadlinerResult<RenderedImage>> {
        requests.par_iter().map(|r| self.render(r)).collect()
    }

    /// Render one card without encoding it.
    #[tracing::instrument(skip(self, request), fields(theme = %request.theme, layout = %request.layout))]
    pub fn render_surface(&self, request: &RenderRequest) -> HeadlinerResult<RenderedSurface> {
        let cfg = &self.config;
        let (theme_name, theme) = lookup_theme(&request.theme, cfg.catalog_policy)?;
        let (_, policy) = lookup_layout(&request.layout, cfg.catalog_policy)?;
        let fonts = self.theme_fonts(theme_name)?;

        let mut degradations = Vec::new();
        for role in FontRole::ALL {
            if let Some(reason) = fonts.get(role).fallback_reason() {
                degradations.push(Degradation::FontFallback {
                    role,
                    reason: reason.clone(),
                });
            }
        }

        let background = compose_background(
            cfg.canvas,
            &request.background,
            request.overlay,
            theme.background_color,
        )?;
        let mut surface = background.surface;
        if let Some(reason) = background.fallback {
            degradations.push(Degradation::BackgroundFallback(reason));
        }

        let mut engines = fonts.engines()?;
        let max_w = cfg.max_text_width();
        let title = fit_text(
            &mut engines.headline,
            &request.title,
            max_w,
            cfg.title_max_height(),
            &cfg.title_sizes,
        )?;
        let subtitle = fit_text(
            &mut engines.subtitle,
            &request.subtitle,
            max_w,
            cfg.subtitle_max_height(),
            &cfg.subtitle_sizes,
        )?;
        let pill = PillGeometry::measure(&mut engines.tag, &request.tag, cfg.tag_size)?;

        push_overflow(&mut degradations, FontRole::Headline, &title, cfg.title_max_height());
        push_overflow(
            &mut degradations,
            FontRole::Subtitle,
            &subtitle,
            cfg.subtitle_max_height(),
        );

        let plan = plan_layout(
            cfg.canvas,
            cfg.layout_metrics(),
            pill.as_ref(),
            &title,
            &subtitle,
            &policy,
        );
        paint_layout(&mut surface, &plan, &theme, &mut engines)?;

        tracing::debug!(
            title_size = title.font_size,
            title_lines = title.lines.len(),
            subtitle_size = subtitle.font_size,
            subtitle_lines = subtitle.lines.len(),
            degradations = degradations.len(),
            "card rendered"
        );

        Ok(RenderedSurface {
            surface,
            plan,
            degradations,
        })
    }
}

fn push_overflow(out: &mut Vec<Degradation>, role: FontRole, block: &TextBlock, max_height: f32) {
    if !block.overflow {
        return;
    }
    let d = Degradation::TextOverflow {
        role,
        font_size: block.font_size,
        height: block.total_height,
        max_height,
    };
    tracing::warn!(%d, "text overflow");
    out.push(d);
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
