//! Coordinate and geometry types shared by the draw stream and the widget tree.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Widget positions are always relative to the parent widget; absolute positions
//! are the sum along the parent chain.

mod axis;
mod corner_radii;
mod rect;
mod vec2;
mod viewport;

pub use axis::Axis;
pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
