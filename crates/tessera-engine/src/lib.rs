//! Tessera engine crate.
//!
//! Owns the platform-facing pieces the widget core consumes: geometry, paint,
//! the draw stream, text measurement and the input snapshot.

pub mod input;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod text;
