//! Text measurement.
//!
//! Layout code asks the [`FontSystem`] how big a string is without drawing it.
//! Measurement never records anything into a draw stream.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem, TextAlign};
