use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use xxhash_rust::xxh3::Xxh3;

use crate::compose::background::{ImageSource, OverlayMode};
use crate::foundation::error::{HeadlinerError, HeadlinerResult};
use crate::style::policy::DEFAULT_LAYOUT;
use crate::style::theme::DEFAULT_THEME;

const XXH3_SEED: u64 = 0x5eed_c0de_4ead_11e5;

/// One card to render.
///
/// Only presence is checked: missing or `null` text fields become empty strings, and a missing
/// theme, layout or overlay takes its default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// Headline text.
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    /// Subtitle text.
    #[serde(deserialize_with = "null_as_empty")]
    pub subtitle: String,
    /// Tag pill label.
    #[serde(deserialize_with = "null_as_empty")]
    pub tag: String,
    /// Background image.
    pub background: ImageSource,
    /// Theme name from the catalog.
    #[serde(deserialize_with = "null_as_empty")]
    pub theme: String,
    /// Layout name from the catalog.
    #[serde(deserialize_with = "null_as_empty")]
    pub layout: String,
    /// Scrim over the background.
    pub overlay: OverlayMode,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            tag: String::new(),
            background: ImageSource::None,
            theme: DEFAULT_THEME.to_owned(),
            layout: DEFAULT_LAYOUT.to_owned(),
            overlay: OverlayMode::default(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stable 128-bit content key of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for RequestFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

impl RenderRequest {
    /// Request with the three text fields set and everything else default.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Read a single request from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> HeadlinerResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            HeadlinerError::validation(format!("open request JSON '{}': {e}", path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            HeadlinerError::validation(format!("parse request JSON '{}': {e}", path.display()))
        })
    }

    /// Resolve a relative background path against `base`.
    pub fn with_background_base(mut self, base: &Path) -> Self {
        if let ImageSource::Path(p) = &self.background
            && p.is_relative()
        {
            self.background = ImageSource::Path(base.join(p));
        }
        self
    }

    /// Content key for caching rendered output.
    ///
    /// Equal requests always produce equal fingerprints, independent of platform and process.
    /// Background files are keyed by path, not by content.
    pub fn fingerprint(&self) -> RequestFingerprint {
        let mut h = Xxh3::with_seed(XXH3_SEED);
        for s in [&self.title, &self.subtitle, &self.tag, &self.theme, &self.layout] {
            write_str(&mut h, s);
        }
        match &self.background {
            ImageSource::None => h.update(&[0]),
            ImageSource::Bytes(b) => {
                h.update(&[1]);
                h.update(&(b.len() as u64).to_le_bytes());
                h.update(b);
            }
            ImageSource::Path(p) => {
                h.update(&[2]);
                write_str(&mut h, &p.to_string_lossy());
            }
        }
        h.update(&[match self.overlay {
            OverlayMode::None => 0,
            OverlayMode::Dark => 1,
            OverlayMode::Light => 2,
        }]);
        let v = h.digest128();
        RequestFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_str(h: &mut Xxh3, s: &str) {
    h.update(&(s.len() as u64).to_le_bytes());
    h.update(s.as_bytes());
}

#[cfg(test)]
#[path = "../tests/unit/request.rs"]
mod tests;
