use tessera_engine::coords::{Rect, Vec2};
use tessera_engine::paint::{Color, LinearGradient};
use tessera_engine::scene::Border;
use tessera_engine::text::TextAlign;

use crate::event::{EventCtx, EventResult, MouseButton};
use crate::layout::LayoutCtx;
use crate::painter::Painter;
use crate::widget::{WidgetBehavior, WidgetCore};

/// A two-state toggle with a caption to the right of the box.
///
/// A left press arms it; the release inside flips the state and fires the
/// callback with the new value.
///
/// # Example
/// ```rust,ignore
/// let vsync = tree.insert(Some(dialog), CheckBox::new("V-Sync").checked(true).on_toggle(|on| log::info!("vsync {on}")));
/// ```
pub struct CheckBox {
    caption: String,
    checked: bool,
    pushed: bool,
    on_toggle: Option<Box<dyn FnMut(bool)>>,
}

impl CheckBox {
    pub fn new(caption: impl Into<String>) -> Self {
        Self { caption: caption.into(), checked: false, pushed: false, on_toggle: None }
    }

    /// Initial state.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Callback invoked with the new state after a click.
    pub fn on_toggle(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_toggle = Some(Box::new(f));
        self
    }

    pub fn set_callback(&mut self, f: impl FnMut(bool) + 'static) {
        self.on_toggle = Some(Box::new(f));
    }

    #[inline]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the state without firing the callback.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    #[inline]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    #[inline]
    pub fn pushed(&self) -> bool {
        self.pushed
    }

    fn font_size(core: &WidgetCore) -> f32 {
        if core.has_font_size() { core.font_size() } else { core.theme().standard_font_size }
    }
}

impl WidgetBehavior for CheckBox {
    fn preferred_size(&self, core: &WidgetCore, ctx: &LayoutCtx<'_>) -> Option<Vec2> {
        let size = Self::font_size(core);
        let text = ctx.fonts.text_bounds(&self.caption, &core.theme().font_normal, size, TextAlign::Left);
        Some(Vec2::new(text.size.x + 1.8 * size, 1.3 * size))
    }

    fn draw(&self, core: &WidgetCore, painter: &mut Painter<'_>) {
        let theme = core.theme();
        let rect = core.rect();
        let size = Self::font_size(core);

        let line = painter.measure_text(&self.caption, &theme.font_normal, size);
        let color = if core.enabled() { theme.text_color } else { theme.disabled_text_color };
        let origin = Vec2::new(rect.origin.x + 1.6 * size, rect.origin.y + (rect.size.y - line.y) / 2.0);
        painter.text(self.caption.as_str(), &theme.font_normal, size, color, origin, TextAlign::Left);

        let side = rect.size.y - 2.0;
        let check = Rect::new(rect.origin.x + 1.0, rect.origin.y + 1.0, side, side);
        let alpha = if self.pushed { 100 } else { 32 };
        let fill = LinearGradient::vertical(
            check.origin.x,
            check.origin.y,
            check.max().y,
            Color::from_srgb_u8(0, 0, 0, alpha),
            Color::from_srgb_u8(0, 0, 0, 180),
        );
        painter.fill_rounded_rect(check, 3.0, fill, Some(Border::new(theme.border_width, theme.border_dark)));

        if self.checked {
            // Tick drawn as two strokes inside the box.
            let a = check.origin + Vec2::new(side * 0.22, side * 0.52);
            let b = check.origin + Vec2::new(side * 0.42, side * 0.74);
            let c = check.origin + Vec2::new(side * 0.78, side * 0.26);
            let width = (side * 0.12).max(1.5);
            painter.stroke_line(a, b, width, color);
            painter.stroke_line(b, c, width, color);
        }
    }

    fn on_mouse_button_pressed(
        &mut self,
        core: &mut WidgetCore,
        _ctx: &mut EventCtx<'_>,
        _pos: Vec2,
        button: MouseButton,
    ) -> EventResult {
        if button != MouseButton::Left || !core.enabled() {
            return EventResult::Ignored;
        }
        self.pushed = true;
        EventResult::Consumed
    }

    fn on_mouse_button_released(
        &mut self,
        core: &mut WidgetCore,
        _ctx: &mut EventCtx<'_>,
        pos: Vec2,
        button: MouseButton,
    ) -> EventResult {
        if button != MouseButton::Left || !self.pushed {
            return EventResult::Ignored;
        }
        self.pushed = false;
        if core.contains(pos) {
            self.checked = !self.checked;
            log::debug!("checkbox {:?} -> {}", self.caption, self.checked);
            if let Some(f) = &mut self.on_toggle {
                f(self.checked);
            }
        }
        EventResult::Consumed
    }

    fn on_mouse_exited(&mut self, _core: &mut WidgetCore, _ctx: &mut EventCtx<'_>) {
        self.pushed = false;
    }
}
