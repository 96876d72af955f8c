use std::fmt;

use crate::coords::Vec2;

/// Keyboard key.
///
/// Only keys a game menu typically binds get a variant; everything else
/// arrives as `Other` with the platform scancode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Space,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,

    Shift,
    Control,
    Alt,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    Other(u32),
}

impl Key {
    /// Shift, Control and Alt.
    #[inline]
    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Other(code) => write!(f, "Key#{code}"),
            key => fmt::Debug::fmt(key, f),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false };

    #[inline]
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

/// Wheel travel, either in notches or already in pixels (touchpads).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Lines(Vec2),
    Pixels(Vec2),
}

impl WheelDelta {
    /// Pixels per wheel notch.
    pub const LINE_HEIGHT: f32 = 20.0;

    #[inline]
    pub fn to_pixels(self) -> Vec2 {
        match self {
            WheelDelta::Lines(v) => v * Self::LINE_HEIGHT,
            WheelDelta::Pixels(v) => v,
        }
    }
}

/// One input event in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),
    Key { key: Key, state: KeyState, modifiers: Modifiers, repeat: bool },
    PointerMoved(Vec2),
    /// Carries the pointer position at the time of the press or release.
    PointerButton { button: MouseButton, state: MouseButtonState, pos: Vec2, modifiers: Modifiers },
    Wheel { delta: WheelDelta, modifiers: Modifiers },
    /// Committed text, after IME composition.
    Text(String),
    PointerLeft,
    /// The window gained or lost keyboard focus.
    Focused(bool),
}
