//! Background layer: cover-cropped image or flat color, then the scrim.

pub(crate) mod background;
