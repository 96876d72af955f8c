//! Input snapshot.
//!
//! Platform-agnostic on purpose: whatever owns the window turns its native
//! events into [`InputEvent`]s and feeds them to [`InputState::apply_event`],
//! which keeps what is held down and records the frame's events and wheel
//! travel in an [`InputFrame`].

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, WheelDelta};
