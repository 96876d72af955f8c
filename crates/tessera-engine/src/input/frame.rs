use crate::coords::Vec2;

use super::types::InputEvent;

/// Everything that happened since the last [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Events in arrival order.
    pub events: Vec<InputEvent>,
    /// Wheel travel summed over the frame, in pixels.
    pub scroll: Vec2,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.scroll = Vec2::zero();
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.events.is_empty()
    }

    /// Text committed this frame, in order.
    pub fn text(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|ev| match ev {
            InputEvent::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }
}
