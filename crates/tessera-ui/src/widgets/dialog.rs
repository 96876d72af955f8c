use tessera_engine::coords::{CornerRadii, Rect, Vec2};
use tessera_engine::paint::LinearGradient;
use tessera_engine::text::TextAlign;

use crate::event::{EventCtx, EventResult, MouseButton};
use crate::painter::Painter;
use crate::widget::{WidgetBehavior, WidgetCore};

/// A movable window with an optional title bar.
///
/// A titled dialog reserves `theme.dialog_header_height` at the top; layouts
/// attached to it start below that strip. Pressing the left button in the strip
/// grabs the input selection and raises the dialog, and while the button is
/// held the dialog follows the mouse. An untitled dialog cannot be dragged.
///
/// Every press inside the dialog is consumed, so clicks never reach widgets
/// behind it.
#[derive(Debug, Clone, Default)]
pub struct Dialog {
    title: String,
}

impl Dialog {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The grabbable strip, in the dialog's parent space.
    pub fn title_rect(&self, core: &WidgetCore) -> Rect {
        Rect::from_origin_size(core.position(), Vec2::new(core.width(), self.header_height(core)))
    }
}

impl WidgetBehavior for Dialog {
    fn header_height(&self, core: &WidgetCore) -> f32 {
        if self.title.is_empty() { 0.0 } else { core.theme().dialog_header_height }
    }

    fn draw(&self, core: &WidgetCore, painter: &mut Painter<'_>) {
        let theme = core.theme();
        let rect = core.rect();
        let radius = theme.dialog_corner_radius;

        let shadow = rect.expand(theme.dialog_drop_shadow_size / 2.0);
        painter.fill_rounded_rect(shadow, radius * 2.0, theme.drop_shadow, None);

        let body = if core.mouse_focus() { theme.dialog_fill_focused } else { theme.dialog_fill_unfocused };
        painter.fill_rounded_rect(rect, radius, body, None);

        let header = self.header_height(core);
        if header <= 0.0 {
            return;
        }

        let strip = self.title_rect(core);
        let (x, y) = (strip.origin.x, strip.origin.y);
        let gradient = LinearGradient::vertical(
            x,
            y,
            y + header,
            theme.dialog_header_gradient_top,
            theme.dialog_header_gradient_bot,
        );
        painter.fill_rounded_rect_corners(strip, CornerRadii::top(radius), gradient, None);

        let right = x + strip.size.x;
        painter.stroke_line(Vec2::new(x + 0.5, y + 1.5), Vec2::new(right - 0.5, y + 1.5), 1.0, theme.dialog_header_sep_top);
        painter.stroke_line(Vec2::new(x + 0.5, y + header - 0.5), Vec2::new(right - 0.5, y + header - 0.5), 1.0, theme.dialog_header_sep_bot);

        let size = theme.dialog_title_font_size;
        let line = painter.measure_text(&self.title, &theme.font_bold, size);
        let origin = Vec2::new(x + strip.size.x / 2.0, y + (header - line.y) / 2.0);
        let color = if core.focused() { theme.dialog_title_focused } else { theme.dialog_title_unfocused };
        painter.text(self.title.as_str(), &theme.font_bold, size, theme.drop_shadow, origin + Vec2::new(0.0, -1.0), TextAlign::Center);
        painter.text(self.title.as_str(), &theme.font_bold, size, color, origin, TextAlign::Center);
    }

    fn on_mouse_button_pressed(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        pos: Vec2,
        button: MouseButton,
    ) -> EventResult {
        if button == MouseButton::Left && self.header_height(core) > 0.0 && self.title_rect(core).contains(pos) {
            let input = ctx.input();
            if input.selection().is_none() {
                input.select(ctx.id());
                log::debug!("dialog {:?} grabbed the selection", ctx.id());
            }
            ctx.move_to_front();
        }
        EventResult::Consumed
    }

    fn on_mouse_drag(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        _pos: Vec2,
        delta: Vec2,
        button: MouseButton,
    ) -> EventResult {
        if button != MouseButton::Left || !ctx.input().is_selected(ctx.id()) {
            return EventResult::Ignored;
        }
        core.set_position(core.position() + delta);
        EventResult::Consumed
    }

    fn on_mouse_button_released(
        &mut self,
        _core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        _pos: Vec2,
        button: MouseButton,
    ) -> EventResult {
        let input = ctx.input();
        if button != MouseButton::Left || !input.is_selected(ctx.id()) {
            return EventResult::Ignored;
        }
        input.clear_selection();
        log::debug!("dialog {:?} released the selection", ctx.id());
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_engine::scene::{DrawCmd, DrawList};
    use tessera_engine::text::FontSystem;

    use crate::input::{ButtonState, Input};
    use crate::layout::{Alignment, BoxLayout, LayoutCtx, Orientation};
    use crate::tree::UiTree;
    use crate::widget::WidgetId;

    fn dialog(tree: &mut UiTree, title: &str, pos: Vec2) -> WidgetId {
        let root = tree.root();
        let d = tree.insert(Some(root), Dialog::new(title));
        tree.core_mut(d).set_position(pos);
        tree.core_mut(d).set_size(Vec2::new(200.0, 150.0));
        d
    }

    fn step(input: &mut Input, pos: Vec2, state: ButtonState) {
        input.end_frame();
        input.move_mouse(pos);
        input.set_button(MouseButton::Left, state);
    }

    // ── dragging ──────────────────────────────────────────────────────────

    #[test]
    fn title_drag_moves_by_summed_deltas() {
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let a = dialog(&mut tree, "Settings", Vec2::new(50.0, 50.0));
        let b = dialog(&mut tree, "Inventory", Vec2::new(400.0, 50.0));
        let mut input = Input::new();

        step(&mut input, Vec2::new(60.0, 60.0), ButtonState::Pressed);
        tree.dispatch(&input);
        assert!(input.is_selected(a));

        for d in [Vec2::new(3.0, 0.0), Vec2::new(0.0, 4.0), Vec2::new(-1.0, -1.0)] {
            let to = input.mouse_pos() + d;
            step(&mut input, to, ButtonState::Held);
            tree.dispatch(&input);
        }
        assert_eq!(tree.core(a).position(), Vec2::new(52.0, 53.0));

        let at = input.mouse_pos();
        step(&mut input, at, ButtonState::Released);
        tree.dispatch(&input);
        assert_eq!(input.selection(), None);

        step(&mut input, Vec2::new(410.0, 60.0), ButtonState::Pressed);
        tree.dispatch(&input);
        assert!(input.is_selected(b));
        assert_eq!(tree.core(a).position(), Vec2::new(52.0, 53.0));
    }

    #[test]
    fn body_press_is_consumed_without_grabbing() {
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let a = dialog(&mut tree, "Settings", Vec2::new(50.0, 50.0));
        let mut input = Input::new();

        step(&mut input, Vec2::new(60.0, 120.0), ButtonState::Pressed);
        assert!(tree.dispatch(&input));
        assert_eq!(input.selection(), None);

        step(&mut input, Vec2::new(80.0, 140.0), ButtonState::Held);
        tree.dispatch(&input);
        assert_eq!(tree.core(a).position(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn untitled_dialog_does_not_drag() {
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let a = dialog(&mut tree, "", Vec2::new(50.0, 50.0));
        assert_eq!(tree.header_height(a), 0.0);

        let mut input = Input::new();
        step(&mut input, Vec2::new(60.0, 52.0), ButtonState::Pressed);
        tree.dispatch(&input);
        assert_eq!(input.selection(), None);
    }

    #[test]
    fn held_selection_is_not_stolen() {
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let a = dialog(&mut tree, "Settings", Vec2::new(50.0, 50.0));
        let b = dialog(&mut tree, "Inventory", Vec2::new(400.0, 50.0));

        let mut input = Input::new();
        input.select(a);
        step(&mut input, Vec2::new(410.0, 60.0), ButtonState::Pressed);
        tree.dispatch(&input);
        assert!(input.is_selected(a));
        assert!(!input.is_selected(b));
    }

    #[test]
    fn title_press_raises_dialog() {
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let a = dialog(&mut tree, "Under", Vec2::new(50.0, 50.0));
        let b = dialog(&mut tree, "Over", Vec2::new(100.0, 100.0));
        let root = tree.root();
        assert_eq!(tree.children(root).last(), Some(&b));

        let mut input = Input::new();
        step(&mut input, Vec2::new(60.0, 60.0), ButtonState::Pressed);
        tree.dispatch(&input);
        assert_eq!(tree.children(root).last(), Some(&a));
    }

    // ── layout / drawing ──────────────────────────────────────────────────

    #[test]
    fn layout_starts_below_title() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts);
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let d = dialog(&mut tree, "Settings", Vec2::zero());
        tree.set_layout(d, BoxLayout::new(Orientation::Vertical, Alignment::Minimum, 10.0, 0.0));
        let child = tree.insert(Some(d), Dialog::new(""));
        tree.core_mut(child).set_fixed_size(Vec2::new(20.0, 20.0));

        tree.perform_layout(d, &ctx);
        assert_eq!(tree.core(child).position(), Vec2::new(10.0, 45.0));
    }

    #[test]
    fn draws_title_centered_in_header() {
        let fonts = FontSystem::new();
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        dialog(&mut tree, "Settings", Vec2::new(100.0, 100.0));

        let mut list = DrawList::new();
        tree.draw(&mut Painter::new(&mut list, &fonts, Vec2::zero()));
        let title = list.items().iter().rev().find_map(|i| match &i.cmd {
            DrawCmd::Text(t) => Some(t.clone()),
            _ => None,
        });
        let Some(title) = title else { panic!("no title drawn") };
        assert_eq!(title.text, "Settings");
        assert_eq!(title.align, TextAlign::Center);
        assert_eq!(title.origin.x, 200.0);
        assert_eq!(title.size, 24.0);
    }
}
