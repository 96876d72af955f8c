//! Per-frame input aggregator consumed by [`crate::UiTree::dispatch`].
//!
//! [`Input`] turns the engine's event stream into the view widgets care about:
//! where the mouse is and how far it moved this frame, what each button is
//! doing ([`ButtonState`]), which keys went down or up, and what text was typed.
//!
//! It also carries the drag *selection*: the id of the widget that grabbed the
//! mouse (a dialog being dragged by its title). The pair is stored in atomics so
//! hooks can claim and release it through a shared `&Input`; there is no
//! cross-thread use, so every access is `Relaxed`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tessera_engine::coords::Vec2;
use tessera_engine::input::{InputEvent, InputFrame, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

use crate::widget::WidgetId;

/// Where a mouse button is in its press cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ButtonState {
    #[default]
    None,
    /// Went down this frame.
    Pressed,
    /// Down since an earlier frame.
    Held,
    /// Went up this frame.
    Released,
}

#[derive(Debug, Default)]
pub struct Input {
    mouse_pos: Vec2,
    mouse_delta: Vec2,
    scroll: Vec2,
    /// Buttons with a non-`None` state, in the order they were first touched.
    buttons: Vec<(MouseButton, ButtonState)>,

    keys_down: HashSet<Key>,
    keys_pressed: Vec<Key>,
    keys_released: Vec<Key>,
    text: Vec<String>,
    modifiers: Modifiers,

    has_selection: AtomicBool,
    selected_id: AtomicU64,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// Mouse position in screen space.
    #[inline]
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    /// Mouse movement accumulated this frame.
    #[inline]
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Wheel movement this frame, in pixels.
    #[inline]
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll
    }

    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|&(_, s)| s)
            .unwrap_or_default()
    }

    /// Buttons currently in `state`.
    pub fn buttons_in(&self, state: ButtonState) -> impl Iterator<Item = MouseButton> + '_ {
        self.buttons.iter().filter(move |(_, s)| *s == state).map(|&(b, _)| b)
    }

    /// True for `Pressed` and `Held`.
    pub fn is_down(&self, button: MouseButton) -> bool {
        matches!(self.button(button), ButtonState::Pressed | ButtonState::Held)
    }

    #[inline]
    pub fn keys_pressed(&self) -> &[Key] {
        &self.keys_pressed
    }

    #[inline]
    pub fn keys_released(&self) -> &[Key] {
        &self.keys_released
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Text committed this frame, in arrival order.
    #[inline]
    pub fn text(&self) -> &[String] {
        &self.text
    }

    // ── feeding ───────────────────────────────────────────────────────────

    /// Folds one engine frame in. Transitions are applied in event order;
    /// buttons the engine reports as down but this aggregator has not seen
    /// pressed become `Held`.
    pub fn update_from(&mut self, state: &InputState, frame: &InputFrame) {
        for ev in &frame.events {
            match ev {
                InputEvent::PointerMoved(pos) => self.move_mouse(*pos),
                InputEvent::PointerButton { button, state, pos, .. } => {
                    self.move_mouse(*pos);
                    match state {
                        MouseButtonState::Pressed => self.set_button(*button, ButtonState::Pressed),
                        MouseButtonState::Released => self.set_button(*button, ButtonState::Released),
                    }
                }
                InputEvent::Key { key, state, .. } => match state {
                    KeyState::Pressed => self.press_key(*key),
                    KeyState::Released => self.release_key(*key),
                },
                InputEvent::Text(t) => self.push_text(t.as_str()),
                _ => {}
            }
        }
        self.scroll(frame.scroll);

        for &button in &state.buttons_down {
            if self.button(button) == ButtonState::None {
                self.set_button(button, ButtonState::Held);
            }
        }
        self.modifiers = state.modifiers;
    }

    /// Moves the mouse to `pos`, accumulating the delta.
    pub fn move_mouse(&mut self, pos: Vec2) {
        self.mouse_delta += pos - self.mouse_pos;
        self.mouse_pos = pos;
    }

    pub fn set_button(&mut self, button: MouseButton, state: ButtonState) {
        match self.buttons.iter_mut().find(|(b, _)| *b == button) {
            Some(entry) => entry.1 = state,
            None => self.buttons.push((button, state)),
        }
        self.buttons.retain(|&(_, s)| s != ButtonState::None);
    }

    pub fn press_key(&mut self, key: Key) {
        if self.keys_down.insert(key) {
            self.keys_pressed.push(key);
        }
    }

    pub fn release_key(&mut self, key: Key) {
        if self.keys_down.remove(&key) {
            self.keys_released.push(key);
        }
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.text.push(text.into());
    }

    pub fn scroll(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Ages transitions for the next frame: `Pressed` becomes `Held`,
    /// `Released` is forgotten, and per-frame deltas and lists are cleared.
    /// The selection survives.
    pub fn end_frame(&mut self) {
        for (_, state) in &mut self.buttons {
            if *state == ButtonState::Pressed {
                *state = ButtonState::Held;
            }
        }
        self.buttons.retain(|&(_, s)| s != ButtonState::Released);

        self.mouse_delta = Vec2::zero();
        self.scroll = Vec2::zero();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.text.clear();
    }

    // ── selection ─────────────────────────────────────────────────────────

    pub fn set_selection(&self, selected: bool, id: u64) {
        self.selected_id.store(id, Ordering::Relaxed);
        self.has_selection.store(selected, Ordering::Relaxed);
    }

    /// Makes `id` the selected widget.
    pub fn select(&self, id: WidgetId) {
        self.set_selection(true, id.to_u64());
    }

    pub fn clear_selection(&self) {
        self.set_selection(false, 0);
    }

    /// Raw id of the selected widget, if any. It may no longer resolve.
    pub fn selection(&self) -> Option<u64> {
        self.has_selection
            .load(Ordering::Relaxed)
            .then(|| self.selected_id.load(Ordering::Relaxed))
    }

    pub fn is_selected(&self, id: WidgetId) -> bool {
        self.selection() == Some(id.to_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_cycle_through_frames() {
        let mut input = Input::new();
        input.set_button(MouseButton::Left, ButtonState::Pressed);
        assert!(input.is_down(MouseButton::Left));

        input.end_frame();
        assert_eq!(input.button(MouseButton::Left), ButtonState::Held);

        input.set_button(MouseButton::Left, ButtonState::Released);
        assert!(!input.is_down(MouseButton::Left));
        assert_eq!(input.buttons_in(ButtonState::Released).collect::<Vec<_>>(), vec![MouseButton::Left]);

        input.end_frame();
        assert_eq!(input.button(MouseButton::Left), ButtonState::None);
    }

    #[test]
    fn mouse_delta_accumulates_until_end_of_frame() {
        let mut input = Input::new();
        input.move_mouse(Vec2::new(10.0, 10.0));
        input.end_frame();

        input.move_mouse(Vec2::new(12.0, 10.0));
        input.move_mouse(Vec2::new(13.0, 15.0));
        assert_eq!(input.mouse_delta(), Vec2::new(3.0, 5.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2::zero());
        assert_eq!(input.mouse_pos(), Vec2::new(13.0, 15.0));
    }

    #[test]
    fn keys_report_transitions_once() {
        let mut input = Input::new();
        input.press_key(Key::A);
        input.press_key(Key::A);
        assert_eq!(input.keys_pressed(), &[Key::A]);
        assert!(input.key_down(Key::A));

        input.end_frame();
        input.release_key(Key::A);
        input.release_key(Key::B);
        assert_eq!(input.keys_released(), &[Key::A]);
        assert!(!input.key_down(Key::A));
    }

    #[test]
    fn selection_round_trips() {
        let input = Input::new();
        assert_eq!(input.selection(), None);

        input.set_selection(true, 42);
        assert_eq!(input.selection(), Some(42));

        input.clear_selection();
        assert_eq!(input.selection(), None);
    }

    #[test]
    fn selection_survives_end_frame() {
        let mut input = Input::new();
        input.set_selection(true, 7);
        input.end_frame();
        assert_eq!(input.selection(), Some(7));
    }

    #[test]
    fn update_from_engine_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(Vec2::new(5.0, 6.0)));
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                pos: Vec2::new(8.0, 6.0),
                modifiers: Modifiers::NONE,
            },
        );
        state.apply_event(&mut frame, InputEvent::Text("q".to_owned()));

        let mut input = Input::new();
        input.update_from(&state, &frame);
        assert_eq!(input.mouse_pos(), Vec2::new(8.0, 6.0));
        assert_eq!(input.mouse_delta(), Vec2::new(8.0, 6.0));
        assert_eq!(input.button(MouseButton::Left), ButtonState::Pressed);
        assert_eq!(input.text(), &["q".to_owned()]);
    }

    #[test]
    fn engine_held_buttons_become_held() {
        let mut state = InputState::default();
        state.buttons_down.insert(MouseButton::Right);
        let mut input = Input::new();
        input.update_from(&state, &InputFrame::default());
        assert_eq!(input.button(MouseButton::Right), ButtonState::Held);
    }
}
