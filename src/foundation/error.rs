/// Convenience result type used across headliner.
pub type HeadlinerResult<T> = Result<T, HeadlinerError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Degradable conditions (unusable background image, missing font file, text overflow at the
/// smallest size) are never reported through this type; they surface as
/// [`crate::Degradation`] values on the rendered output.
#[derive(thiserror::Error, Debug)]
pub enum HeadlinerError {
    /// Invalid caller-provided input or configuration, rejected before any drawing.
    #[error("validation error: {0}")]
    Validation(String),

    /// A font source exists but could not be parsed as a font.
    #[error("font error: {0}")]
    Font(String),

    /// Failures while rasterizing or compositing a card.
    #[error("render error: {0}")]
    Render(String),

    /// Failures while encoding the finished canvas.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeadlinerError {
    /// Build a [`HeadlinerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeadlinerError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`HeadlinerError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HeadlinerError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Return `true` for errors caused by invalid input rather than by rendering.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
