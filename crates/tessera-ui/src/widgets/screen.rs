use tessera_engine::paint::Color;

use crate::painter::Painter;
use crate::widget::{WidgetBehavior, WidgetCore};

/// Root of every [`UiTree`](crate::UiTree). Sized to the viewport by the scene.
///
/// Clears the viewport with the theme's `screen_background` unless a background
/// is set explicitly.
#[derive(Debug, Default)]
pub struct Screen {
    background: Option<Color>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }
}

impl WidgetBehavior for Screen {
    fn draw(&self, core: &WidgetCore, painter: &mut Painter<'_>) {
        let color = self.background.unwrap_or(core.theme().screen_background);
        painter.fill_rect(core.rect(), color);
    }
}
