//! Tessera UI: a retained widget tree on top of `tessera-engine`.
//!
//! Widgets live in a [`UiTree`] arena and are addressed by [`WidgetId`]. Each
//! one is a [`WidgetCore`] (geometry, visibility, theme, layout) paired with a
//! [`WidgetBehavior`] that supplies drawing, sizing and input hooks. Containers
//! delegate child placement to a shared [`Layout`](layout::Layout).
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tessera_ui::prelude::*;
//!
//! let mut ui = UiScene::new(Viewport::new(1280.0, 720.0));
//! let root = ui.tree.root();
//!
//! let dialog = ui.tree.insert(Some(root), Dialog::new("Settings"));
//! ui.tree.set_layout(dialog, GroupLayout::default());
//! ui.tree.insert(Some(dialog), Label::new("Audio"));
//! ui.tree.insert(Some(dialog), Button::new("Mute").on_click(|| log::info!("muted")));
//! ui.layout();
//! ui.tree.center(dialog);
//!
//! // In your frame callback:
//! input.update_from(&state, &frame);
//! let draw_list = ui.frame(&input, viewport);
//! input.end_frame();
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`WidgetBehavior`] for any `'static` type and insert it:
//!
//! ```rust,ignore
//! use tessera_ui::prelude::*;
//!
//! struct Swatch(Color);
//!
//! impl WidgetBehavior for Swatch {
//!     fn preferred_size(&self, _core: &WidgetCore, _ctx: &LayoutCtx) -> Option<Vec2> {
//!         Some(Vec2::new(24.0, 24.0))
//!     }
//!     fn draw(&self, core: &WidgetCore, painter: &mut Painter) {
//!         painter.fill_rounded_rect(core.rect(), 4.0, self.0, None);
//!     }
//! }
//!
//! let swatch = ui.tree.insert(Some(root), Swatch(Color::white()));
//! ```

pub mod dispatch;
pub mod event;
pub mod focus;
pub mod input;
pub mod layout;
pub mod painter;
pub mod scene;
pub mod shared;
pub mod theme;
pub mod tree;
pub mod widget;
pub mod widgets;

pub use event::{EventCtx, EventResult};
pub use input::{ButtonState, Input};
pub use scene::UiScene;
pub use shared::Shared;
pub use theme::Theme;
pub use tree::{TreeError, UiTree};
pub use widget::{WidgetBehavior, WidgetCore, WidgetId};

/// Everything you need to build and extend UI. Import this in your component files.
pub mod prelude {
    pub use crate::event::{EventCtx, EventResult, Key, Modifiers, MouseButton};
    pub use crate::focus::FocusPath;
    pub use crate::input::{ButtonState, Input};
    pub use crate::layout::{
        AdvancedGridLayout, Alignment, Anchor, BoxLayout, GridLayout, GroupLayout, Layout, LayoutCtx,
        Orientation,
    };
    pub use crate::painter::Painter;
    pub use crate::scene::UiScene;
    pub use crate::shared::Shared;
    pub use crate::theme::Theme;
    pub use crate::tree::{TreeError, UiTree};
    pub use crate::widget::{WidgetBehavior, WidgetCore, WidgetId};
    pub use crate::widgets::{Button, CheckBox, Dialog, Label, Panel, Screen, TextBox, VScrollPanel};

    // Re-export the engine primitives everyone needs.
    pub use tessera_engine::coords::{Axis, CornerRadii, Rect, Vec2, Viewport};
    pub use tessera_engine::paint::{Color, ColorStop, LinearGradient, Paint, SpreadMode};
    pub use tessera_engine::scene::{Border, DrawList};
    pub use tessera_engine::text::{FontId, TextAlign};
}
