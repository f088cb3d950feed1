//! Text measurement, greedy wrapping and font-size fitting.

pub(crate) mod fit;
pub(crate) mod shaper;

#[cfg(test)]
#[path = "../../tests/unit/text/mono.rs"]
pub(crate) mod mono;
