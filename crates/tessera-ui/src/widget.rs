use std::any::Any;

use slotmap::{Key as _, KeyData, new_key_type};
use tessera_engine::coords::{Rect, Vec2};

use crate::event::{EventCtx, EventResult, Key, Modifiers, MouseButton};
use crate::layout::{Layout, LayoutCtx};
use crate::painter::Painter;
use crate::shared::Shared;
use crate::theme::Theme;

// ── WidgetId ──────────────────────────────────────────────────────────────

new_key_type! {
    /// Handle to a widget inside a [`crate::UiTree`].
    ///
    /// Ids are generational: once a widget is removed its id never resolves again,
    /// even if the slot is reused.
    pub struct WidgetId;
}

impl WidgetId {
    /// Stable numeric form, used for the input selection.
    #[inline]
    pub fn to_u64(self) -> u64 {
        self.data().as_ffi()
    }

    /// Inverse of [`to_u64`](Self::to_u64). The result may be stale.
    #[inline]
    pub fn from_u64(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

// ── WidgetCore ────────────────────────────────────────────────────────────

/// The data every widget carries, independent of what kind of widget it is.
///
/// Positions are relative to the parent widget. Sizes of zero in `fixed_size`
/// mean "unset" on that axis.
#[derive(Debug)]
pub struct WidgetCore {
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,

    position: Vec2,
    size: Vec2,
    fixed_size: Vec2,
    min_size: Vec2,
    max_size: Vec2,

    visible: bool,
    enabled: bool,
    pub(crate) focused: bool,
    pub(crate) mouse_focus: bool,

    font_size: Option<f32>,
    tooltip: String,
    name: String,

    pub(crate) theme: Shared<Theme>,
    pub(crate) layout: Option<Shared<dyn Layout>>,
}

impl WidgetCore {
    pub(crate) fn new(theme: Shared<Theme>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            position: Vec2::zero(),
            size: Vec2::zero(),
            fixed_size: Vec2::zero(),
            min_size: Vec2::zero(),
            max_size: Vec2::zero(),
            visible: true,
            enabled: true,
            focused: false,
            mouse_focus: false,
            font_size: None,
            tooltip: String::new(),
            name: String::new(),
            theme,
            layout: None,
        }
    }

    // ── structure ─────────────────────────────────────────────────────────

    #[inline]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Position relative to the parent.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn fixed_size(&self) -> Vec2 {
        self.fixed_size
    }

    /// Overrides the computed size on each axis with a non-zero component.
    #[inline]
    pub fn set_fixed_size(&mut self, size: Vec2) {
        self.fixed_size = size;
    }

    #[inline]
    pub fn min_size(&self) -> Vec2 {
        self.min_size
    }

    #[inline]
    pub fn set_min_size(&mut self, size: Vec2) {
        self.min_size = size;
    }

    /// Zero on an axis means unbounded.
    #[inline]
    pub fn max_size(&self) -> Vec2 {
        self.max_size
    }

    #[inline]
    pub fn set_max_size(&mut self, size: Vec2) {
        self.max_size = size;
    }

    /// Bounds in the parent's coordinate space.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// `p` is in the parent's coordinate space.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.rect().contains(p)
    }

    /// Per axis: the fixed size if set, otherwise `preferred`.
    #[inline]
    pub fn resolve_size(&self, preferred: Vec2) -> Vec2 {
        Vec2::new(
            if self.fixed_size.x != 0.0 { self.fixed_size.x } else { preferred.x },
            if self.fixed_size.y != 0.0 { self.fixed_size.y } else { preferred.y },
        )
    }

    /// Clamps `size` into `[min_size, max_size]`; unbounded where max is zero.
    pub fn clamp_size(&self, size: Vec2) -> Vec2 {
        let mut out = size.max(self.min_size);
        if self.max_size.x > 0.0 {
            out.x = out.x.min(self.max_size.x);
        }
        if self.max_size.y > 0.0 {
            out.y = out.y.min(self.max_size.y);
        }
        out
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// True while the widget is on the focus path.
    #[inline]
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// True while the mouse is over the widget.
    #[inline]
    pub fn mouse_focus(&self) -> bool {
        self.mouse_focus
    }

    // ── text / identity ───────────────────────────────────────────────────

    /// The override if set, otherwise the theme's standard size.
    #[inline]
    pub fn font_size(&self) -> f32 {
        self.font_size.unwrap_or(self.theme.standard_font_size)
    }

    #[inline]
    pub fn has_font_size(&self) -> bool {
        self.font_size.is_some()
    }

    #[inline]
    pub fn set_font_size(&mut self, size: Option<f32>) {
        self.font_size = size;
    }

    #[inline]
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    #[inline]
    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) {
        self.tooltip = tooltip.into();
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ── shared objects ────────────────────────────────────────────────────

    #[inline]
    pub fn theme(&self) -> &Shared<Theme> {
        &self.theme
    }

    #[inline]
    pub fn layout(&self) -> Option<&Shared<dyn Layout>> {
        self.layout.as_ref()
    }
}

// ── WidgetBehavior ────────────────────────────────────────────────────────

/// Type-erasure helper so behaviors can be downcast back to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// What makes one kind of widget different from another.
///
/// Every hook has a default, so a unit struct is already a working container.
/// Hooks receive the widget's [`WidgetCore`]; positions passed to mouse hooks
/// are in the parent's coordinate space, the same space as `core.position()`.
///
/// The tree routes input to children before it calls a widget's own hook, so
/// a hook only sees events none of its children consumed (see
/// [`crate::UiTree::dispatch`]).
///
/// # Implementing a custom widget
///
/// ```rust,ignore
/// struct Swatch(Color);
///
/// impl WidgetBehavior for Swatch {
///     fn preferred_size(&self, _core: &WidgetCore, _ctx: &LayoutCtx) -> Option<Vec2> {
///         Some(Vec2::new(24.0, 24.0))
///     }
///     fn draw(&self, core: &WidgetCore, painter: &mut Painter) {
///         painter.fill_rect(core.rect(), self.0);
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait WidgetBehavior: AsAny {
    /// Draws the widget itself. Children are drawn by the tree afterwards,
    /// translated into this widget's space.
    fn draw(&self, core: &WidgetCore, painter: &mut Painter<'_>) {}

    /// Content-driven size. `None` defers to the attached layout, or to the
    /// current size when there is none.
    fn preferred_size(&self, core: &WidgetCore, ctx: &LayoutCtx<'_>) -> Option<Vec2> {
        None
    }

    /// Height of a title header that layouts must leave free. Zero = untitled.
    fn header_height(&self, core: &WidgetCore) -> f32 {
        0.0
    }

    /// Caption text for group headings. Labels report their text here.
    fn caption(&self) -> Option<&str> {
        None
    }

    /// Layout attached when the widget is constructed. Widgets that place their
    /// own children (scroll panels) return one here.
    fn default_layout(&self) -> Option<Shared<dyn Layout>> {
        None
    }

    /// When true the tree clips drawing of children to this widget's rect.
    fn clips_children(&self) -> bool {
        false
    }

    fn on_theme_changed(&mut self, core: &mut WidgetCore) {}

    // ── mouse ─────────────────────────────────────────────────────────────

    fn on_mouse_button_pressed(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        pos: Vec2,
        button: MouseButton,
    ) -> EventResult {
        EventResult::Ignored
    }

    fn on_mouse_button_released(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        pos: Vec2,
        button: MouseButton,
    ) -> EventResult {
        EventResult::Ignored
    }

    fn on_mouse_scroll(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        pos: Vec2,
        delta: Vec2,
    ) -> EventResult {
        EventResult::Ignored
    }

    fn on_mouse_move(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        pos: Vec2,
        delta: Vec2,
    ) -> EventResult {
        EventResult::Ignored
    }

    /// Delivered directly (no hit-testing) to the widget that owns the input
    /// selection while a button is held.
    fn on_mouse_drag(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        pos: Vec2,
        delta: Vec2,
        button: MouseButton,
    ) -> EventResult {
        EventResult::Ignored
    }

    fn on_mouse_entered(&mut self, core: &mut WidgetCore, ctx: &mut EventCtx<'_>) {}

    fn on_mouse_exited(&mut self, core: &mut WidgetCore, ctx: &mut EventCtx<'_>) {}

    // ── keyboard ──────────────────────────────────────────────────────────

    fn on_key_pressed(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        key: Key,
        modifiers: Modifiers,
    ) -> EventResult {
        EventResult::Ignored
    }

    fn on_key_released(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        key: Key,
        modifiers: Modifiers,
    ) -> EventResult {
        EventResult::Ignored
    }

    fn on_character_input(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        text: &str,
    ) -> EventResult {
        EventResult::Ignored
    }

    // ── focus ─────────────────────────────────────────────────────────────

    fn on_focus_gained(&mut self, core: &mut WidgetCore) {}

    fn on_focus_lost(&mut self, core: &mut WidgetCore) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> WidgetCore {
        WidgetCore::new(Shared::new(Theme::default()))
    }

    #[test]
    fn fixed_size_overrides_per_axis() {
        let mut c = core();
        c.set_fixed_size(Vec2::new(40.0, 0.0));
        assert_eq!(c.resolve_size(Vec2::new(10.0, 20.0)), Vec2::new(40.0, 20.0));
    }

    #[test]
    fn clamp_size_treats_zero_max_as_unbounded() {
        let mut c = core();
        c.set_min_size(Vec2::new(5.0, 5.0));
        c.set_max_size(Vec2::new(50.0, 0.0));
        assert_eq!(c.clamp_size(Vec2::new(80.0, 1.0)), Vec2::new(50.0, 5.0));
        assert_eq!(c.clamp_size(Vec2::new(1.0, 900.0)), Vec2::new(5.0, 900.0));
    }

    #[test]
    fn font_size_falls_back_to_theme() {
        let mut c = core();
        assert_eq!(c.font_size(), 16.0);
        c.set_font_size(Some(22.0));
        assert_eq!(c.font_size(), 22.0);
        assert!(c.has_font_size());
    }

    #[test]
    fn contains_uses_parent_space_rect() {
        let mut c = core();
        c.set_position(Vec2::new(10.0, 10.0));
        c.set_size(Vec2::new(5.0, 5.0));
        assert!(c.contains(Vec2::new(12.0, 14.0)));
        assert!(!c.contains(Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn widget_id_round_trips_through_u64() {
        let mut arena: slotmap::SlotMap<WidgetId, ()> = slotmap::SlotMap::with_key();
        let id = arena.insert(());
        assert_eq!(WidgetId::from_u64(id.to_u64()), id);
    }
}
