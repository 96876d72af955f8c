//! Scene (draw stream) types.
//!
//! The draw stream is the only drawing capability widgets see. It records
//! renderer-agnostic commands with:
//! - deterministic ordering (z-index + insertion order)
//! - a scissor stack
//! - a translation stack so widgets can draw in their parent's local space

mod cmd;
mod key;
mod list;

pub use cmd::{Border, DrawCmd, LineCmd, RectCmd, RoundedRectCmd, TextCmd};
pub use key::{SortKey, ZIndex};
pub use list::{DrawItem, DrawList};
