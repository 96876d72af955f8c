use tessera_engine::coords::{Rect, Vec2};
use tessera_engine::paint::{Color, LinearGradient};

use crate::event::{EventCtx, EventResult, MouseButton};
use crate::layout::{Layout, LayoutCtx, place, target_size};
use crate::painter::Painter;
use crate::shared::Shared;
use crate::tree::UiTree;
use crate::widget::{WidgetBehavior, WidgetCore, WidgetId};

/// Horizontal space kept free on the right for the scrollbar.
const SCROLLBAR_WIDTH: f32 = 12.0;
/// Gap between the panel edge and the scrollbar track, top and bottom.
const TRACK_INSET: f32 = 4.0;
/// Fraction of a page moved by a click on the track outside the thumb.
const PAGE_STEP: f32 = 0.98;

/// Vertical scroll container for a single child.
///
/// The child keeps its preferred height; when that exceeds the panel it is
/// shifted up by `scroll * overflow` and a scrollbar is drawn on the right.
/// The wheel scrolls by pixels, the thumb can be dragged, and a press on the
/// track pages towards the click. Drawing of the child is clipped to the panel.
///
/// Give the panel a fixed size: its preferred size is the child's, so the
/// default layout would otherwise grow it until nothing overflows.
///
/// # Example
/// ```rust,ignore
/// let scroll = tree.insert(Some(dialog), VScrollPanel::new());
/// tree.core_mut(scroll).set_fixed_size(Vec2::new(0.0, 120.0));
/// let list = tree.insert(Some(scroll), Panel::new());
/// tree.set_layout(list, BoxLayout::new(Orientation::Vertical, Alignment::Fill, 0.0, 4.0));
/// ```
#[derive(Debug, Default)]
pub struct VScrollPanel {
    scroll: f32,
    content_height: f32,
}

impl VScrollPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll position in `[0, 1]`: 0 shows the top of the child, 1 the bottom.
    #[inline]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Clamped to `[0, 1]`. Takes effect on the next layout pass.
    pub fn set_scroll(&mut self, scroll: f32) {
        self.scroll = scroll.clamp(0.0, 1.0);
    }

    /// Child height seen by the last layout pass.
    #[inline]
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    fn overflows(&self, core: &WidgetCore) -> bool {
        self.content_height > core.height()
    }

    fn thumb_height(&self, core: &WidgetCore) -> f32 {
        let h = core.height();
        h * (h / self.content_height).min(1.0)
    }

    /// Scrollbar track, in the parent's space.
    fn track_rect(&self, core: &WidgetCore) -> Rect {
        let r = core.rect();
        Rect::new(
            r.max().x - SCROLLBAR_WIDTH,
            r.origin.y + TRACK_INSET,
            2.0 * TRACK_INSET,
            r.size.y - 2.0 * TRACK_INSET,
        )
    }

    /// Thumb top, in the parent's space.
    fn thumb_top(&self, core: &WidgetCore) -> f32 {
        let travel = core.height() - 2.0 * TRACK_INSET - self.thumb_height(core);
        core.position().y + TRACK_INSET + 1.0 + travel * self.scroll
    }

    fn on_scrollbar(&self, core: &WidgetCore, pos: Vec2) -> bool {
        let right = core.rect().max().x;
        pos.x > right - SCROLLBAR_WIDTH - 1.0 && pos.x < right - TRACK_INSET
    }
}

impl WidgetBehavior for VScrollPanel {
    fn default_layout(&self) -> Option<Shared<dyn Layout>> {
        Some(Shared::new(ScrollLayout).into_dyn())
    }

    fn clips_children(&self) -> bool {
        true
    }

    fn draw(&self, core: &WidgetCore, painter: &mut Painter<'_>) {
        if !self.overflows(core) {
            return;
        }

        let track = self.track_rect(core);
        let shade = LinearGradient::vertical(
            track.origin.x,
            track.origin.y,
            track.max().y,
            Color::from_srgb_u8(0, 0, 0, 32),
            Color::from_srgb_u8(0, 0, 0, 92),
        );
        painter.fill_rounded_rect(track, 3.0, shade, None);

        let thumb_h = self.thumb_height(core);
        let thumb = Rect::new(track.origin.x + 1.0, self.thumb_top(core), track.size.x - 2.0, thumb_h - 2.0);
        let shine = LinearGradient::vertical(
            thumb.origin.x,
            thumb.origin.y,
            thumb.max().y,
            Color::from_srgb_u8(220, 220, 220, 100),
            Color::from_srgb_u8(128, 128, 128, 100),
        );
        painter.fill_rounded_rect(thumb, 2.0, shine, None);
    }

    fn on_mouse_scroll(
        &mut self,
        core: &mut WidgetCore,
        _ctx: &mut EventCtx<'_>,
        _pos: Vec2,
        delta: Vec2,
    ) -> EventResult {
        if !self.overflows(core) {
            return EventResult::Ignored;
        }
        // Wheel up (positive y) moves towards the top.
        let overflow = self.content_height - core.height();
        self.set_scroll(self.scroll - delta.y / overflow);
        EventResult::Consumed
    }

    fn on_mouse_button_pressed(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        pos: Vec2,
        button: MouseButton,
    ) -> EventResult {
        if button != MouseButton::Left || !self.overflows(core) || !self.on_scrollbar(core, pos) {
            return EventResult::Ignored;
        }

        let top = self.thumb_top(core);
        let page = core.height() / self.content_height * PAGE_STEP;
        if pos.y < top {
            self.set_scroll(self.scroll - page);
        } else if pos.y > top + self.thumb_height(core) {
            self.set_scroll(self.scroll + page);
        } else {
            let input = ctx.input();
            if input.selection().is_none() {
                input.select(ctx.id());
            }
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
        if button != MouseButton::Left || !ctx.input().is_selected(ctx.id()) || !self.overflows(core) {
            return EventResult::Ignored;
        }
        let travel = core.height() - 2.0 * TRACK_INSET - self.thumb_height(core);
        if travel > 0.0 {
            self.set_scroll(self.scroll + delta.y / travel);
        }
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
        EventResult::Consumed
    }
}

/// Places the single child of a [`VScrollPanel`] according to its scroll state.
struct ScrollLayout;

impl Layout for ScrollLayout {
    fn preferred_size(&self, tree: &UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) -> Vec2 {
        match tree.children(widget).first() {
            Some(&child) => target_size(tree, child, ctx) + Vec2::new(SCROLLBAR_WIDTH, 0.0),
            None => Vec2::zero(),
        }
    }

    fn perform_layout(&self, tree: &mut UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) {
        let children = tree.children(widget);
        assert!(children.len() <= 1, "VScrollPanel: expected at most one child, found {}", children.len());
        let Some(&child) = children.first() else {
            return;
        };

        let size = tree.core(widget).size();
        let content = target_size(tree, child, ctx).y;
        let Some(panel) = tree.behavior_mut::<VScrollPanel>(widget) else {
            return;
        };
        panel.content_height = content;

        let (position, child_size) = if content > size.y {
            let offset = (panel.scroll * (content - size.y)).trunc();
            (Vec2::new(0.0, -offset), Vec2::new(size.x - SCROLLBAR_WIDTH, content))
        } else {
            panel.scroll = 0.0;
            (Vec2::zero(), size)
        };
        place(tree, child, position, child_size, ctx);
    }
}
