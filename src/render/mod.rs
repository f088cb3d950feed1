//! Drawing and encoding: the card surface, text painting and the end-to-end pipeline.

pub(crate) mod painter;
pub(crate) mod pipeline;
pub(crate) mod surface;
