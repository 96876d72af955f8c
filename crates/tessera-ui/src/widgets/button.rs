use tessera_engine::coords::Vec2;
use tessera_engine::paint::LinearGradient;
use tessera_engine::scene::Border;
use tessera_engine::text::TextAlign;

use crate::event::{EventCtx, EventResult, MouseButton};
use crate::layout::LayoutCtx;
use crate::painter::Painter;
use crate::widget::{WidgetBehavior, WidgetCore};

/// Padding added around the caption by [`Button`]'s preferred size.
const CAPTION_PADDING: Vec2 = Vec2::new(20.0, 10.0);

/// A push button with a text caption.
///
/// A left press arms the button; releasing inside it fires the callback.
/// Leaving the button while armed disarms it.
///
/// # Example
/// ```rust,ignore
/// let ok = tree.insert(Some(dialog), Button::new("OK").on_click(|| log::info!("ok")));
/// ```
pub struct Button {
    caption: String,
    pushed: bool,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new(caption: impl Into<String>) -> Self {
        Self { caption: caption.into(), pushed: false, on_click: None }
    }

    /// Callback invoked when the button is clicked.
    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn set_callback(&mut self, f: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(f));
    }

    #[inline]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// True between a press and the matching release or exit.
    #[inline]
    pub fn pushed(&self) -> bool {
        self.pushed
    }

    fn font_size(core: &WidgetCore) -> f32 {
        if core.has_font_size() { core.font_size() } else { core.theme().button_font_size }
    }
}

impl WidgetBehavior for Button {
    fn preferred_size(&self, core: &WidgetCore, ctx: &LayoutCtx<'_>) -> Option<Vec2> {
        let text = ctx
            .fonts
            .text_bounds(&self.caption, &core.theme().font_bold, Self::font_size(core), TextAlign::Left);
        Some(text.size + CAPTION_PADDING)
    }

    fn draw(&self, core: &WidgetCore, painter: &mut Painter<'_>) {
        let theme = core.theme();
        let rect = core.rect();

        let (top, bot) = if self.pushed {
            (theme.button_gradient_top_pushed, theme.button_gradient_bot_pushed)
        } else if core.mouse_focus() && core.enabled() {
            (theme.button_gradient_top_focused, theme.button_gradient_bot_focused)
        } else {
            (theme.button_gradient_top_unfocused, theme.button_gradient_bot_unfocused)
        };
        let y = rect.origin.y;
        let fill = LinearGradient::vertical(rect.origin.x, y, y + rect.size.y, top, bot);
        let border = Border::new(theme.border_width, theme.border_dark);
        painter.fill_rounded_rect(rect, theme.button_corner_radius, fill, Some(border));

        // Highlight along the top edge, dropped while pushed.
        if !self.pushed {
            let edge_y = y + 1.0;
            painter.stroke_line(
                Vec2::new(rect.origin.x + 1.0, edge_y),
                Vec2::new(rect.origin.x + rect.size.x - 1.0, edge_y),
                theme.border_width,
                theme.border_light,
            );
        }

        let size = Self::font_size(core);
        let line = painter.measure_text(&self.caption, &theme.font_bold, size);
        let origin = Vec2::new(rect.origin.x + rect.size.x / 2.0, y + (rect.size.y - line.y) / 2.0);
        let color = if core.enabled() { theme.text_color } else { theme.disabled_text_color };
        painter.text(self.caption.as_str(), &theme.font_bold, size, theme.text_shadow, origin + Vec2::new(0.0, -1.0), TextAlign::Center);
        painter.text(self.caption.as_str(), &theme.font_bold, size, color, origin, TextAlign::Center);
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
            if let Some(f) = &mut self.on_click {
                f();
            }
        }
        EventResult::Consumed
    }

    fn on_mouse_exited(&mut self, _core: &mut WidgetCore, _ctx: &mut EventCtx<'_>) {
        self.pushed = false;
    }
}
