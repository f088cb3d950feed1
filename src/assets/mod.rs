//! Inputs that are loaded rather than computed: theme colors, background images and fonts.

pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod fonts;
