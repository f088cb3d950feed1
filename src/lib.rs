//! Headliner renders social-media thumbnail cards.
//!
//! A card is a fixed-size raster (1080×1350 by default) built in three stages:
//!
//! - the background: a cover-cropped image or a flat theme color, under a translucent scrim
//! - text fitting: the largest candidate font size whose greedy word wrap fits a height budget
//! - layout: a tag pill, title and subtitle stacked and anchored per a named layout policy
//!
//! Create a [`ThumbnailRenderer`] once from an [`EngineConfig`], then call
//! [`ThumbnailRenderer::render`] per [`RenderRequest`]. Rendering is deterministic and never
//! fails for missing images or fonts; those substitutions are reported as [`Degradation`]s.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod config;
mod foundation;
mod layout;
mod render;
mod request;
mod style;
mod text;

pub use crate::foundation::core::{CANVAS_SIZE, Canvas, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{HeadlinerError, HeadlinerResult};

pub use crate::assets::color::Color;
pub use crate::assets::decode::{CropRect, cover_crop_rect};
pub use crate::assets::fonts::{
    BUILTIN_FONT_BYTES, FallbackReason, FontRef, FontResolution, FontResolver, FontRole,
    FontSource, LoadedFont,
};
pub use crate::compose::background::{
    BackgroundFallback, ComposedBackground, ImageSource, OverlayMode, SCRIM_ALPHA,
    compose_background,
};
pub use crate::config::EngineConfig;
pub use crate::layout::engine::{
    ElementKind, LayoutMetrics, LayoutPlan, PlacedLine, PlacedPill, PlacedText, plan_layout,
};
pub use crate::layout::pill::PillGeometry;
pub use crate::render::pipeline::{
    Degradation, RenderedImage, RenderedSurface, ThumbnailRenderer,
};
pub use crate::render::surface::Surface;
pub use crate::request::{RenderRequest, RequestFingerprint};
pub use crate::style::policy::{
    Anchor, CatalogPolicy, LAYOUT_NAMES, LayoutPolicy, builtin_layout, lookup_layout,
};
pub use crate::style::theme::{THEME_NAMES, Theme, builtin_theme, lookup_theme};
pub use crate::text::fit::{LEADING_RATIO, SizeCandidates, TextBlock, fit_text, wrap_words};
pub use crate::text::shaper::{TextLayoutEngine, TextMeasure, VerticalMetrics};
