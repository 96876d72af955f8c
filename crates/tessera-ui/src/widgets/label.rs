use tessera_engine::coords::Vec2;
use tessera_engine::paint::Color;
use tessera_engine::text::TextAlign;

use crate::layout::LayoutCtx;
use crate::painter::Painter;
use crate::widget::{WidgetBehavior, WidgetCore};

/// A line of static text.
///
/// Labels report their text as a caption, so a [`GroupLayout`](crate::layout::GroupLayout)
/// treats them as group headings. With a fixed width set the text wraps.
#[derive(Debug, Clone, Default)]
pub struct Label {
    caption: String,
    font: Option<String>,
    color: Option<Color>,
}

impl Label {
    pub fn new(caption: impl Into<String>) -> Self {
        Self { caption: caption.into(), font: None, color: None }
    }

    /// Font name; the theme's normal font when unset.
    pub fn font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(name.into());
        self
    }

    /// Text color; the theme's label color when unset.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.caption
    }

    pub fn set_text(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    fn font_name<'a>(&'a self, core: &'a WidgetCore) -> &'a str {
        self.font.as_deref().unwrap_or(&core.theme().font_normal)
    }

    fn font_size(core: &WidgetCore) -> f32 {
        if core.has_font_size() { core.font_size() } else { core.theme().label_font_size }
    }
}

impl WidgetBehavior for Label {
    fn preferred_size(&self, core: &WidgetCore, ctx: &LayoutCtx<'_>) -> Option<Vec2> {
        if self.caption.is_empty() {
            return Some(Vec2::zero());
        }
        let font = self.font_name(core);
        let size = Self::font_size(core);
        let wrap = core.fixed_size().x;
        if wrap > 0.0 {
            let bounds = ctx.fonts.text_box_bounds(&self.caption, font, size, wrap);
            Some(Vec2::new(wrap, bounds.y))
        } else {
            Some(ctx.fonts.text_bounds(&self.caption, font, size, TextAlign::Left).size)
        }
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.caption)
    }

    fn draw(&self, core: &WidgetCore, painter: &mut Painter<'_>) {
        if self.caption.is_empty() {
            return;
        }
        let font = self.font_name(core);
        let size = Self::font_size(core);
        let color = self.color.unwrap_or(core.theme().label_font_color);

        let wrap = core.fixed_size().x;
        if wrap > 0.0 {
            painter.text_box(self.caption.as_str(), font, size, color, core.position(), wrap);
        } else {
            let line = painter.measure_text(&self.caption, font, size);
            let origin = core.position() + Vec2::new(0.0, (core.height() - line.y) / 2.0);
            painter.text(self.caption.as_str(), font, size, color, origin, TextAlign::Left);
        }
    }
}
