//! Pure placement of the tag pill, title and subtitle on the canvas.

pub(crate) mod engine;
pub(crate) mod pill;
