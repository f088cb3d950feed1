use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use usvg::fontdb;

use crate::foundation::error::{HeadlinerError, HeadlinerResult};

/// Font compiled into the binary; the last link of every resolution chain.
pub const BUILTIN_FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

const DEFAULT_WEIGHT: u16 = 700;

/// Text role a theme assigns a font to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Title lines.
    Headline,
    /// Subtitle lines.
    Subtitle,
    /// Tag pill label.
    Tag,
}

impl FontRole {
    /// All roles in draw order.
    pub const ALL: [FontRole; 3] = [FontRole::Tag, FontRole::Headline, FontRole::Subtitle];

    /// Stable lowercase name used in logs and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            FontRole::Headline => "headline",
            FontRole::Subtitle => "subtitle",
            FontRole::Tag => "tag",
        }
    }
}

/// Where a role's font should come from.
///
/// `path` is relative to the engine's font root. `family` names an installed system family and
/// is only consulted when system fonts are enabled. With neither set the built-in font is used.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontRef {
    /// Font file relative to the font root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// System family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// CSS-style weight used for the system lookup.
    #[serde(default = "default_weight")]
    pub weight: u16,
}

fn default_weight() -> u16 {
    DEFAULT_WEIGHT
}

impl Default for FontRef {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FontRef {
    /// Reference that always resolves to the built-in font.
    pub fn builtin() -> Self {
        Self {
            path: None,
            family: None,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// File reference with a family to try when the file is missing.
    pub fn file_or_family(path: &str, family: &str, weight: u16) -> Self {
        Self {
            path: Some(path.to_owned()),
            family: Some(family.to_owned()),
            weight,
        }
    }
}

/// Origin of a loaded font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// Loaded from a file under the font root.
    File(PathBuf),
    /// Loaded from an installed system family.
    System(String),
    /// The font embedded in the binary.
    Builtin,
}

/// Parsed, shareable font bytes.
#[derive(Clone)]
pub struct LoadedFont {
    data: vello_cpu::peniko::FontData,
    family: String,
    source: FontSource,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family", &self.family)
            .field("source", &self.source)
            .field("index", &self.data.index)
            .field("bytes", &self.data.data.len())
            .finish()
    }
}

impl LoadedFont {
    /// Parse `bytes` and keep the face at `index`.
    ///
    /// Fails when the bytes hold no parseable face.
    pub fn from_bytes(bytes: Vec<u8>, index: u32, source: FontSource) -> HeadlinerResult<Self> {
        let family = probe_family(&bytes, index).ok_or_else(|| {
            HeadlinerError::font(format!("{source:?} does not contain a parseable font face"))
        })?;
        Ok(Self {
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index),
            family,
            source,
        })
    }

    /// The embedded fallback font.
    pub fn builtin() -> HeadlinerResult<Self> {
        Self::from_bytes(BUILTIN_FONT_BYTES.to_vec(), 0, FontSource::Builtin)
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &[u8] {
        self.data.data.data()
    }

    /// Face index inside a collection file.
    pub fn index(&self) -> u32 {
        self.data.index
    }

    /// Family name read from the font's name table.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Where the font came from.
    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Handle for the raster backend.
    pub fn vello_font(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

fn probe_family(bytes: &[u8], index: u32) -> Option<String> {
    let mut db = fontdb::Database::new();
    db.load_font_data(bytes.to_vec());
    let face = db
        .faces()
        .find(|f| f.index == index)
        .or_else(|| db.faces().next())?;
    face.families
        .first()
        .map(|(name, _)| name.clone())
        .or_else(|| Some(face.post_script_name.clone()))
}

/// Why a font reference fell back to the built-in font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// The configured file does not exist or cannot be read.
    FileMissing(PathBuf),
    /// No installed family matched (or system fonts are disabled).
    FamilyNotFound(String),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::FileMissing(p) => write!(f, "font file '{}' not found", p.display()),
            FallbackReason::FamilyNotFound(family) => {
                write!(f, "font family '{family}' not available")
            }
        }
    }
}

/// Outcome of resolving a [`FontRef`].
#[derive(Clone, Debug)]
pub enum FontResolution {
    /// The requested font was loaded.
    Resolved(LoadedFont),
    /// The built-in font stands in for the requested one.
    FallbackUsed(LoadedFont, FallbackReason),
}

impl FontResolution {
    /// The font to render with, regardless of outcome.
    pub fn font(&self) -> &LoadedFont {
        match self {
            FontResolution::Resolved(f) | FontResolution::FallbackUsed(f, _) => f,
        }
    }

    /// Reason for falling back, if any.
    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            FontResolution::Resolved(_) => None,
            FontResolution::FallbackUsed(_, r) => Some(r),
        }
    }
}

/// Resolves font references against a font root and, optionally, installed system fonts.
pub struct FontResolver {
    root: PathBuf,
    system: Option<fontdb::Database>,
}

impl std::fmt::Debug for FontResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResolver")
            .field("root", &self.root)
            .field("system_faces", &self.system.as_ref().map(|db| db.len()))
            .finish()
    }
}

impl FontResolver {
    /// Resolver rooted at `root`. Scans installed fonts only when `system_fonts` is set.
    pub fn new(root: impl Into<PathBuf>, system_fonts: bool) -> Self {
        let system = system_fonts.then(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system font database");
            db
        });
        Self {
            root: root.into(),
            system,
        }
    }

    /// Root that relative font paths are joined to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve one reference: file, then system family, then the built-in font.
    ///
    /// Missing files and unknown families degrade to the built-in font. A path that escapes the
    /// root is a validation error and a file that exists but is not a font is a font error.
    pub fn resolve(&self, font: &FontRef) -> HeadlinerResult<FontResolution> {
        let mut reason = None;

        if let Some(rel) = font.path.as_deref() {
            let norm = normalize_rel_path(rel)?;
            let path = self.root.join(Path::new(&norm));
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let loaded = LoadedFont::from_bytes(bytes, 0, FontSource::File(path.clone()))
                        .map_err(|e| {
                            HeadlinerError::font(format!(
                                "failed to parse font '{}': {e}",
                                path.display()
                            ))
                        })?;
                    return Ok(FontResolution::Resolved(loaded));
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "font file unavailable");
                    reason = Some(FallbackReason::FileMissing(path));
                }
            }
        }

        if let Some(family) = font.family.as_deref() {
            if let Some(loaded) = self.load_system_family(family, font.weight)? {
                return Ok(FontResolution::Resolved(loaded));
            }
            reason.get_or_insert_with(|| FallbackReason::FamilyNotFound(family.to_owned()));
        }

        let builtin = LoadedFont::builtin()?;
        Ok(match reason {
            Some(r) => FontResolution::FallbackUsed(builtin, r),
            None => FontResolution::Resolved(builtin),
        })
    }

    fn load_system_family(&self, family: &str, weight: u16) -> HeadlinerResult<Option<LoadedFont>> {
        let Some(db) = &self.system else {
            return Ok(None);
        };
        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight(weight),
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let Some(id) = db.query(&query) else {
            return Ok(None);
        };
        let Some((bytes, index)) = db.with_face_data(id, |data, index| (data.to_vec(), index))
        else {
            return Ok(None);
        };
        LoadedFont::from_bytes(bytes, index, FontSource::System(family.to_owned())).map(Some)
    }
}

/// Normalize and validate font-root-relative paths.
///
/// The result uses `/` separators, drops `.` segments, and rejects absolute paths or parent
/// traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> HeadlinerResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(HeadlinerError::validation("font paths must be relative"));
    }
    if s.is_empty() {
        return Err(HeadlinerError::validation("font path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(HeadlinerError::validation("font paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(HeadlinerError::validation("font path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
