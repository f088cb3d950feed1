use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::assets::fonts::{FontRef, FontRole};
use crate::foundation::error::{HeadlinerError, HeadlinerResult};
use crate::style::CatalogPolicy;

/// Name of the theme used when none (or an unknown one) is requested.
pub const DEFAULT_THEME: &str = "default";

/// Immutable color and font set for a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Title color.
    pub accent_color: Color,
    /// Flat fill when there is no usable background image.
    pub background_color: Color,
    /// Body text color.
    pub primary_text_color: Color,
    /// Subtitle color.
    pub secondary_text_color: Color,
    /// Tag pill fill.
    pub pill_background_color: Color,
    /// Tag pill label color.
    pub pill_text_color: Color,
    /// Title font.
    pub headline_font: FontRef,
    /// Subtitle font.
    pub subtitle_font: FontRef,
    /// Tag font.
    pub tag_font: FontRef,
}

impl Theme {
    /// Font reference for a role.
    pub fn font(&self, role: FontRole) -> &FontRef {
        match role {
            FontRole::Headline => &self.headline_font,
            FontRole::Subtitle => &self.subtitle_font,
            FontRole::Tag => &self.tag_font,
        }
    }
}

/// Built-in theme names, in catalog order.
pub const THEME_NAMES: [&str; 3] = ["default", "cyber", "elegant"];

fn canonical_theme_name(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_lowercase().as_str() {
        "" | "default" => Some("default"),
        "cyber" | "theme-cyber" => Some("cyber"),
        "elegant" | "theme-elegant" => Some("elegant"),
        _ => None,
    }
}

/// Built-in theme by exact canonical name or alias.
pub fn builtin_theme(name: &str) -> Option<Theme> {
    let theme = match canonical_theme_name(name)? {
        "default" => Theme {
            accent_color: Color::rgb(0xcc, 0xff, 0x00),
            background_color: Color::rgb(0x09, 0x09, 0x0b),
            primary_text_color: Color::rgb(0xe4, 0xe4, 0xe7),
            secondary_text_color: Color::rgb(0xa1, 0xa1, 0xaa),
            pill_background_color: Color::rgb(0xcc, 0xff, 0x00),
            pill_text_color: Color::rgb(0x00, 0x00, 0x00),
            headline_font: FontRef::file_or_family("Inter-Black.ttf", "Inter", 900),
            subtitle_font: FontRef::file_or_family("Inter-Medium.ttf", "Inter", 500),
            tag_font: FontRef::file_or_family("Inter-Bold.ttf", "Inter", 700),
        },
        "cyber" => Theme {
            accent_color: Color::rgb(0x00, 0xff, 0xf9),
            background_color: Color::rgb(0x0a, 0x00, 0x15),
            primary_text_color: Color::rgb(0xe0, 0xcc, 0xff),
            secondary_text_color: Color::rgb(0xff, 0x00, 0xff),
            pill_background_color: Color::rgb(0x00, 0x00, 0x00),
            pill_text_color: Color::rgb(0x00, 0xff, 0xf9),
            headline_font: FontRef::file_or_family("Courier New Bold.ttf", "Courier New", 700),
            subtitle_font: FontRef::file_or_family("Courier New.ttf", "Courier New", 400),
            tag_font: FontRef::file_or_family("Courier New Bold.ttf", "Courier New", 700),
        },
        _ => Theme {
            accent_color: Color::rgb(0xe8, 0xd5, 0xc4),
            background_color: Color::rgb(0x1c, 0x1b, 0x1b),
            primary_text_color: Color::rgb(0xd4, 0xd4, 0xd4),
            secondary_text_color: Color::rgb(0xe8, 0xd5, 0xc4),
            pill_background_color: Color::rgb(0xff, 0xff, 0xff),
            pill_text_color: Color::rgb(0x00, 0x00, 0x00),
            headline_font: FontRef::file_or_family(
                "Times New Roman Bold.ttf",
                "Times New Roman",
                700,
            ),
            subtitle_font: FontRef::file_or_family("Times New Roman.ttf", "Times New Roman", 400),
            tag_font: FontRef::file_or_family("Times New Roman.ttf", "Times New Roman", 400),
        },
    };
    Some(theme)
}

/// Resolve a requested theme name against the catalog.
///
/// Returns the canonical name with the theme so callers can key per-theme state. Unknown names
/// (an empty name means the default) map to [`DEFAULT_THEME`] under [`CatalogPolicy::FallbackToDefault`] and are rejected under
/// [`CatalogPolicy::Strict`].
pub fn lookup_theme(
    name: &str,
    policy: CatalogPolicy,
) -> HeadlinerResult<(&'static str, Theme)> {
    if let Some(canonical) = canonical_theme_name(name)
        && let Some(theme) = builtin_theme(canonical)
    {
        return Ok((canonical, theme));
    }
    match policy {
        CatalogPolicy::Strict => Err(HeadlinerError::validation(format!(
            "unknown theme '{name}' (expected one of: {})",
            THEME_NAMES.join(", ")
        ))),
        CatalogPolicy::FallbackToDefault => {
            tracing::warn!(requested = name, "unknown theme, using default");
            let theme = builtin_theme(DEFAULT_THEME)
                .ok_or_else(|| HeadlinerError::validation("default theme missing"))?;
            Ok((DEFAULT_THEME, theme))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/theme.rs"]
mod tests;
