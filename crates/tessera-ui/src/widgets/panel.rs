use tessera_engine::paint::{Color, Paint};
use tessera_engine::scene::Border;

use crate::painter::Painter;
use crate::widget::{WidgetBehavior, WidgetCore};

/// Plain container. Draws an optional background, border and rounding, and
/// leaves sizing to the attached layout.
///
/// An empty `Panel` draws nothing and ignores input, so presses fall through
/// to whatever is behind it.
///
/// # Example
/// ```rust,ignore
/// let panel = tree.insert(Some(root), Panel::new()
///     .background(Color::from_srgb_u8(40, 40, 48, 255))
///     .corner_radius(4.0)
///     .border(Border::new(1.0, Color::black())));
/// tree.set_layout(panel, BoxLayout::new(Orientation::Vertical, Alignment::Fill, 8.0, 4.0));
/// ```
#[derive(Debug, Default)]
pub struct Panel {
    background: Option<Paint>,
    border: Option<Border>,
    corner_radius: f32,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(mut self, paint: impl Into<Paint>) -> Self {
        self.background = Some(paint.into());
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }
}

impl WidgetBehavior for Panel {
    fn draw(&self, core: &WidgetCore, painter: &mut Painter<'_>) {
        if self.background.is_none() && self.border.is_none() {
            return;
        }
        let paint = self.background.clone().unwrap_or(Paint::Solid(Color::transparent()));
        painter.fill_rounded_rect(core.rect(), self.corner_radius, paint, self.border.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_engine::coords::{Rect, Vec2};
    use tessera_engine::scene::{DrawCmd, DrawList};
    use tessera_engine::text::FontSystem;

    use crate::tree::UiTree;

    fn draw(tree: &UiTree) -> DrawList {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        tree.draw(&mut Painter::new(&mut list, &fonts, Vec2::zero()));
        list
    }

    #[test]
    fn empty_panel_draws_nothing() {
        let mut tree = UiTree::new(Vec2::new(100.0, 100.0));
        let root = tree.root();
        tree.insert(Some(root), Panel::new());
        // Only the screen clear.
        assert_eq!(draw(&tree).len(), 1);
    }

    #[test]
    fn background_fills_own_rect_in_absolute_space() {
        let mut tree = UiTree::new(Vec2::new(100.0, 100.0));
        let root = tree.root();
        let outer = tree.insert(Some(root), Panel::new());
        tree.core_mut(outer).set_position(Vec2::new(10.0, 10.0));
        tree.core_mut(outer).set_size(Vec2::new(50.0, 50.0));
        let inner = tree.insert(Some(outer), Panel::new().background(Color::white()).corner_radius(3.0));
        tree.core_mut(inner).set_position(Vec2::new(5.0, 5.0));
        tree.core_mut(inner).set_size(Vec2::new(20.0, 10.0));

        let list = draw(&tree);
        let last = list.items().last().map(|i| i.cmd.clone());
        match last {
            Some(DrawCmd::RoundedRect(r)) => {
                assert_eq!(r.rect, Rect::new(15.0, 15.0, 20.0, 10.0));
                assert_eq!(r.paint, Paint::Solid(Color::white()));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
