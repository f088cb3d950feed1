use serde::{Deserialize, Serialize};

use crate::foundation::error::{HeadlinerError, HeadlinerResult};

/// Name of the layout used when none (or an unknown one) is requested.
pub const DEFAULT_LAYOUT: &str = "standard";

/// Built-in layout names, in catalog order.
pub const LAYOUT_NAMES: [&str; 3] = ["standard", "centered", "bold"];

/// Vertical offset of the `bold` layout, applied to the top padding.
pub const BOLD_VERTICAL_OFFSET: f64 = -30.0;

/// How unknown catalog names are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogPolicy {
    /// Substitute the default entry and log a warning.
    #[default]
    FallbackToDefault,
    /// Reject with a validation error.
    Strict,
}

/// Position along one axis of the padded canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Left or top edge.
    #[default]
    Start,
    /// Middle.
    Center,
    /// Right or bottom edge.
    End,
}

/// Where the content stack sits on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutPolicy {
    /// Vertical placement of the whole stack.
    pub vertical_anchor: Anchor,
    /// Horizontal placement of each line and of the pill.
    pub horizontal_anchor: Anchor,
    /// Added to the top padding for `start` vertical anchoring.
    #[serde(default)]
    pub vertical_offset: f64,
}

impl LayoutPolicy {
    /// Bottom-left: content rests on the bottom padding.
    pub const STANDARD: Self = Self {
        vertical_anchor: Anchor::End,
        horizontal_anchor: Anchor::Start,
        vertical_offset: 0.0,
    };

    /// Both axes centered.
    pub const CENTERED: Self = Self {
        vertical_anchor: Anchor::Center,
        horizontal_anchor: Anchor::Center,
        vertical_offset: 0.0,
    };

    /// Top-left, nudged up into the padding.
    pub const BOLD: Self = Self {
        vertical_anchor: Anchor::Start,
        horizontal_anchor: Anchor::Start,
        vertical_offset: BOLD_VERTICAL_OFFSET,
    };
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Built-in layout by name; an empty name means the default.
pub fn builtin_layout(name: &str) -> Option<(&'static str, LayoutPolicy)> {
    match name.trim().to_ascii_lowercase().as_str() {
        "" | "standard" => Some(("standard", LayoutPolicy::STANDARD)),
        "centered" => Some(("centered", LayoutPolicy::CENTERED)),
        "bold" => Some(("bold", LayoutPolicy::BOLD)),
        _ => None,
    }
}

/// Resolve a requested layout name against the catalog.
pub fn lookup_layout(
    name: &str,
    policy: CatalogPolicy,
) -> HeadlinerResult<(&'static str, LayoutPolicy)> {
    if let Some(found) = builtin_layout(name) {
        return Ok(found);
    }
    match policy {
        CatalogPolicy::Strict => Err(HeadlinerError::validation(format!(
            "unknown layout '{name}' (expected one of: {})",
            LAYOUT_NAMES.join(", ")
        ))),
        CatalogPolicy::FallbackToDefault => {
            tracing::warn!(requested = name, "unknown layout, using standard");
            Ok((DEFAULT_LAYOUT, LayoutPolicy::STANDARD))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/policy.rs"]
mod tests;
