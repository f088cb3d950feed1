//! Shared primitives: canvas geometry, premultiplied color math and the error taxonomy.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
