//! Color model shared between producers and the batcher.

mod color;

pub use color::Color;
