use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// What is held down right now, for one window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    /// The window has keyboard focus.
    pub focused: bool,
    /// `None` while the pointer is outside the window.
    pub pointer_pos: Option<Vec2>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Updates the held state from `ev` and appends it to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::Focused(focused) => {
                self.focused = *focused;
                // Releases are lost while unfocused.
                if !focused {
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
            InputEvent::PointerMoved(pos) => self.pointer_pos = Some(*pos),
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => self.keys_down.insert(*key),
                    KeyState::Released => self.keys_down.remove(key),
                };
            }
            InputEvent::PointerButton { button, state, pos, modifiers } => {
                self.pointer_pos = Some(*pos);
                self.modifiers = *modifiers;
                match state {
                    MouseButtonState::Pressed => self.buttons_down.insert(*button),
                    MouseButtonState::Released => self.buttons_down.remove(button),
                };
            }
            InputEvent::Wheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                frame.scroll += delta.to_pixels();
            }
            InputEvent::Text(_) => {}
        }
        frame.events.push(ev);
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::WheelDelta;

    fn click(button: MouseButton, state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton { button, state, pos: Vec2::new(x, y), modifiers: Modifiers::NONE }
    }

    #[test]
    fn buttons_track_press_and_release() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, click(MouseButton::Left, MouseButtonState::Pressed, 4.0, 5.0));
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(state.pointer_pos, Some(Vec2::new(4.0, 5.0)));

        state.apply_event(&mut frame, click(MouseButton::Left, MouseButtonState::Released, 6.0, 5.0));
        assert!(!state.button_down(MouseButton::Left));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn losing_focus_drops_held_input() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, click(MouseButton::Right, MouseButtonState::Pressed, 0.0, 0.0));
        state.apply_event(
            &mut frame,
            InputEvent::Key { key: Key::W, state: KeyState::Pressed, modifiers: Modifiers::NONE, repeat: false },
        );
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.buttons_down.is_empty());
        assert!(!state.key_down(Key::W));
    }

    #[test]
    fn wheel_sums_in_pixels_until_cleared() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let notch = InputEvent::Wheel { delta: WheelDelta::Lines(Vec2::new(0.0, 1.0)), modifiers: Modifiers::NONE };
        state.apply_event(&mut frame, notch.clone());
        state.apply_event(&mut frame, notch);
        state.apply_event(&mut frame, InputEvent::Text("hi".into()));
        assert_eq!(frame.scroll, Vec2::new(0.0, 40.0));
        assert_eq!(frame.text().collect::<Vec<_>>(), vec!["hi"]);

        frame.clear();
        assert!(frame.is_idle());
        assert_eq!(frame.scroll, Vec2::zero());
    }

    #[test]
    fn pointer_leaving_forgets_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(Vec2::new(1.0, 2.0)));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }
}
