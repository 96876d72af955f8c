use tessera_engine::coords::{CornerRadii, Rect, Vec2};
use tessera_engine::paint::{Color, Paint};
use tessera_engine::scene::{Border, DrawList, ZIndex};
use tessera_engine::text::{FontSystem, TextAlign};

use crate::layout::LayoutCtx;

/// Drawing surface passed to [`WidgetBehavior::draw`].
///
/// Wraps the engine's `DrawList` and the `FontSystem` for one frame. Widgets
/// draw in their parent's space (the same space as `core.position()`); the tree
/// scopes a translation per container so every recorded command lands in
/// absolute coordinates.
///
/// Each call takes the next z so later commands stack on top of earlier ones,
/// which keeps children above their parent and later siblings above earlier ones.
///
/// [`WidgetBehavior::draw`]: crate::WidgetBehavior::draw
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    z: i32,
    /// Mouse position in screen space.
    pub mouse_pos: Vec2,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, fonts: &'a FontSystem, mouse_pos: Vec2) -> Self {
        Self { draw_list, fonts, z: 0, mouse_pos }
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// Screen-space origin of the current drawing space.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.draw_list.translation()
    }

    /// True if the mouse is inside `rect`, given in the current space.
    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        rect.translate(self.offset()).contains(self.mouse_pos)
    }

    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'_> {
        LayoutCtx::new(self.fonts)
    }

    /// Size of a single line of text. Records nothing.
    pub fn measure_text(&self, text: &str, font: &str, size: f32) -> Vec2 {
        self.fonts.text_bounds(text, font, size, TextAlign::Left).size
    }

    /// Bounds of a line anchored at `origin`. Records nothing.
    pub fn text_bounds(&self, text: &str, font: &str, size: f32, origin: Vec2, align: TextAlign) -> Rect {
        self.fonts.text_bounds(text, font, size, align).translate(origin)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, paint.into());
    }

    /// Rounded rectangle with optional border.
    ///
    /// Pass `radius = 0.0` for sharp corners. Pass `border = None` for no stroke.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, paint: impl Into<Paint>, border: Option<Border>) {
        self.fill_rounded_rect_corners(rect, CornerRadii::all(radius), paint, border);
    }

    pub fn fill_rounded_rect_corners(
        &mut self,
        rect: Rect,
        radii: CornerRadii,
        paint: impl Into<Paint>,
        border: Option<Border>,
    ) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, radii, paint.into(), border);
    }

    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_line(z, from, to, width, color);
    }

    /// One line of text anchored at `origin` (top of the line; `align` picks the x anchor).
    ///
    /// `font` is a name registered with the `FontSystem`; unknown names are
    /// recorded without a font and measured with fallback metrics.
    pub fn text(&mut self, text: impl Into<String>, font: &str, size: f32, color: Color, origin: Vec2, align: TextAlign) {
        let z = self.next_z();
        let id = self.fonts.font_id(font);
        self.draw_list.push_text(z, text, id, size, color, origin, align, None);
    }

    /// Text wrapped at `max_width`, top-left at `origin`.
    pub fn text_box(&mut self, text: impl Into<String>, font: &str, size: f32, color: Color, origin: Vec2, max_width: f32) {
        let z = self.next_z();
        let id = self.fonts.font_id(font);
        self.draw_list.push_text(z, text, id, size, color, origin, TextAlign::Left, Some(max_width));
    }

    // ── scopes ────────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    /// Runs `f` with the drawing space moved by `offset`.
    pub fn with_translation<R>(&mut self, offset: Vec2, f: impl FnOnce(&mut Self) -> R) -> R {
        self.draw_list.push_translation(offset);
        let out = f(self);
        self.draw_list.pop_translation();
        out
    }

    /// Runs `f` with drawing clipped to `rect`.
    pub fn with_clip<R>(&mut self, rect: Rect, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_clip(rect);
        let out = f(self);
        self.pop_clip();
        out
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_engine::scene::DrawCmd;

    #[test]
    fn nested_translations_stay_balanced() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, Vec2::zero());

        p.with_translation(Vec2::new(10.0, 0.0), |p| {
            p.with_translation(Vec2::new(0.0, 5.0), |p| {
                assert_eq!(p.offset(), Vec2::new(10.0, 5.0));
                p.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::white());
            });
            assert_eq!(p.offset(), Vec2::new(10.0, 0.0));
        });
        assert_eq!(p.offset(), Vec2::zero());

        assert_eq!(list.translation_depth(), 0);
        assert_eq!(list.items()[0].cmd.bounds(), Some(Rect::new(11.0, 6.0, 2.0, 2.0)));
    }

    #[test]
    fn measuring_records_nothing() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let p = Painter::new(&mut list, &fonts, Vec2::zero());

        let size = p.measure_text("hello", "sans", 16.0);
        let bounds = p.text_bounds("hello", "sans", 16.0, Vec2::new(50.0, 0.0), TextAlign::Center);
        assert!(size.x > 0.0);
        assert_eq!(bounds.origin.x, 50.0 - size.x / 2.0);
        assert!(list.is_empty());
    }

    #[test]
    fn later_commands_stack_on_top() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, Vec2::zero());
        p.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::black());
        p.text("x", "sans", 12.0, Color::white(), Vec2::zero(), TextAlign::Left);

        let items: Vec<_> = list.iter_in_paint_order().map(|i| i.cmd.clone()).collect();
        assert!(matches!(items[0], DrawCmd::Rect(_)));
        assert!(matches!(items[1], DrawCmd::Text(_)));
        assert!(list.items()[0].key.z < list.items()[1].key.z);
    }

    #[test]
    fn hover_uses_current_space() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, Vec2::new(105.0, 105.0));
        let local = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!p.is_hovered(local));
        p.with_translation(Vec2::new(100.0, 100.0), |p| assert!(p.is_hovered(local)));
    }
}
