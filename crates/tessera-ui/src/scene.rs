use tessera_engine::coords::{Vec2, Viewport};
use tessera_engine::scene::DrawList;
use tessera_engine::text::{FontId, FontLoadError, FontSystem};

use crate::input::Input;
use crate::layout::LayoutCtx;
use crate::painter::Painter;
use crate::tree::UiTree;

/// Owns the widget tree and the resources it needs across frames.
///
/// Each [`frame`](Self::frame) runs the fixed per-frame order: resize the
/// screen root to the viewport, dispatch input, lay the tree out, then draw it
/// into the scene's `DrawList`. Rendering that list is up to the caller.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiScene::new(Viewport::new(1280.0, 720.0));
/// ui.load_named_font("sans", &std::fs::read("DejaVuSans.ttf")?)?;
/// let root = ui.tree.root();
/// let dialog = ui.tree.insert(Some(root), Dialog::new("Settings"));
///
/// // Once per frame:
/// input.update_from(&state, &frame);
/// let draw_list = ui.frame(&input, viewport);
/// input.end_frame();
/// ```
pub struct UiScene {
    /// Public so callers can borrow it alongside `draw_list` when rendering.
    pub font_system: FontSystem,
    /// Populated by the most recent [`frame`](Self::frame).
    pub draw_list: DrawList,
    pub tree: UiTree,
}

impl UiScene {
    pub fn new(viewport: Viewport) -> Self {
        Self { font_system: FontSystem::new(), draw_list: DrawList::new(), tree: UiTree::new(viewport.size()) }
    }

    /// Load a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Loads a font and registers it under `name` so themes can refer to it.
    pub fn load_named_font(&mut self, name: &str, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_named_font(name, data)
    }

    /// Lays out the whole tree from the screen root.
    pub fn layout(&mut self) {
        let ctx = LayoutCtx::new(&self.font_system);
        let root = self.tree.root();
        self.tree.perform_layout(root, &ctx);
    }

    /// Runs one frame and returns the freshly recorded draw list.
    ///
    /// An invalid viewport (zero or non-finite) keeps the previous screen size.
    /// Ageing `input` for the next frame is the caller's job.
    #[must_use]
    pub fn frame(&mut self, input: &Input, viewport: Viewport) -> &mut DrawList {
        let root = self.tree.root();
        if viewport.is_valid() {
            self.tree.core_mut(root).set_size(viewport.size());
        }

        self.tree.dispatch(input);
        self.layout();

        self.draw_list.clear();
        let mut painter = Painter::new(&mut self.draw_list, &self.font_system, input.mouse_pos());
        self.tree.draw(&mut painter);
        &mut self.draw_list
    }

    /// Current screen size.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.tree.core(self.tree.root()).size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;
    use crate::input::ButtonState;
    use crate::layout::{Alignment, BoxLayout, Orientation};
    use crate::widgets::{Dialog, Label};

    #[test]
    fn frame_resizes_root_and_draws() {
        let mut ui = UiScene::new(Viewport::new(320.0, 240.0));
        let input = Input::new();

        let list = ui.frame(&input, Viewport::new(640.0, 480.0));
        assert_eq!(list.len(), 1);
        assert_eq!(ui.size(), Vec2::new(640.0, 480.0));

        let _ = ui.frame(&input, Viewport::new(0.0, 0.0));
        assert_eq!(ui.size(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn frame_dispatches_before_layout() {
        let mut ui = UiScene::new(Viewport::new(800.0, 600.0));
        let root = ui.tree.root();
        let d = ui.tree.insert(Some(root), Dialog::new("Tools"));
        ui.tree.set_layout(d, BoxLayout::new(Orientation::Vertical, Alignment::Minimum, 10.0, 5.0));
        let label = ui.tree.insert(Some(d), Label::new("Brush"));
        ui.tree.core_mut(d).set_position(Vec2::new(100.0, 100.0));

        let mut input = Input::new();
        let _ = ui.frame(&input, Viewport::new(800.0, 600.0));
        assert_eq!(ui.tree.core(label).position(), Vec2::new(10.0, 45.0));

        input.end_frame();
        input.move_mouse(Vec2::new(110.0, 110.0));
        input.set_button(MouseButton::Left, ButtonState::Pressed);
        let _ = ui.frame(&input, Viewport::new(800.0, 600.0));
        input.end_frame();
        input.move_mouse(Vec2::new(130.0, 115.0));
        let _ = ui.frame(&input, Viewport::new(800.0, 600.0));

        assert_eq!(ui.tree.core(d).position(), Vec2::new(120.0, 105.0));
        assert!(ui.draw_list.len() > 1);
    }
}
