use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::Canvas;
use crate::foundation::error::{HeadlinerError, HeadlinerResult};
use crate::layout::engine::{DEFAULT_GAP, DEFAULT_PADDING, LayoutMetrics};
use crate::layout::pill::TAG_FONT_SIZE;
use crate::style::policy::CatalogPolicy;
use crate::text::fit::SizeCandidates;

/// Engine-wide settings, fixed for the lifetime of a [`crate::ThumbnailRenderer`].
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Outer padding on every side.
    pub padding: f64,
    /// Gap between the pill, title and subtitle.
    pub gap: f64,
    /// Title sizes, largest first.
    pub title_sizes: SizeCandidates,
    /// Subtitle sizes, largest first.
    pub subtitle_sizes: SizeCandidates,
    /// Tag label size.
    pub tag_size: f32,
    /// Title height budget as a fraction of the padded canvas height.
    pub title_height_ratio: f64,
    /// Subtitle height budget as a fraction of the padded canvas height.
    pub subtitle_height_ratio: f64,
    /// Directory that theme font paths are relative to.
    pub font_root: PathBuf,
    /// Allow theme font families to be looked up among installed fonts.
    pub system_fonts: bool,
    /// Treatment of unknown theme and layout names.
    pub catalog_policy: CatalogPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            padding: DEFAULT_PADDING,
            gap: DEFAULT_GAP,
            title_sizes: SizeCandidates::title_default(),
            subtitle_sizes: SizeCandidates::subtitle_default(),
            tag_size: TAG_FONT_SIZE,
            title_height_ratio: 0.4,
            subtitle_height_ratio: 0.3,
            font_root: PathBuf::from("static"),
            system_fonts: false,
            catalog_policy: CatalogPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> HeadlinerResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            HeadlinerError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_slice(&bytes).map_err(|e| {
            HeadlinerError::validation(format!("parse engine config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges and cross-field constraints.
    pub fn validate(&self) -> HeadlinerResult<()> {
        self.canvas.validate()?;
        let short_side = f64::from(self.canvas.width.min(self.canvas.height));
        if !self.padding.is_finite() || self.padding < 0.0 || self.padding * 2.0 >= short_side {
            return Err(HeadlinerError::validation(format!(
                "padding must be >= 0 and leave room on a {}x{} canvas (got {})",
                self.canvas.width, self.canvas.height, self.padding
            )));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(HeadlinerError::validation(format!(
                "gap must be finite and >= 0 (got {})",
                self.gap
            )));
        }
        if !self.tag_size.is_finite() || self.tag_size <= 0.0 {
            return Err(HeadlinerError::validation(format!(
                "tag_size must be finite and > 0 (got {})",
                self.tag_size
            )));
        }
        for (name, ratio) in [
            ("title_height_ratio", self.title_height_ratio),
            ("subtitle_height_ratio", self.subtitle_height_ratio),
        ] {
            if !(ratio.is_finite() && ratio > 0.0 && ratio <= 1.0) {
                return Err(HeadlinerError::validation(format!(
                    "{name} must be in (0, 1] (got {ratio})"
                )));
            }
        }
        Ok(())
    }

    /// Spacing used by the layout engine.
    pub fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            padding: self.padding,
            gap: self.gap,
        }
    }

    /// Widest a line may be.
    pub fn max_text_width(&self) -> f32 {
        (f64::from(self.canvas.width) - 2.0 * self.padding) as f32
    }

    fn padded_height(&self) -> f64 {
        f64::from(self.canvas.height) - 2.0 * self.padding
    }

    /// Height budget of the title block.
    pub fn title_max_height(&self) -> f32 {
        (self.padded_height() * self.title_height_ratio) as f32
    }

    /// Height budget of the subtitle block.
    pub fn subtitle_max_height(&self) -> f32 {
        (self.padded_height() * self.subtitle_height_ratio) as f32
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
