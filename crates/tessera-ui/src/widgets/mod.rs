//! Stock widgets. Each one is a [`WidgetBehavior`](crate::WidgetBehavior)
//! inserted into a [`UiTree`](crate::UiTree).

pub mod button;
pub mod checkbox;
pub mod dialog;
pub mod label;
pub mod panel;
pub mod screen;
pub mod text_box;
mod text_edit;
pub mod vscroll_panel;

pub use button::Button;
pub use checkbox::CheckBox;
pub use dialog::Dialog;
pub use label::Label;
pub use panel::Panel;
pub use screen::Screen;
pub use text_box::TextBox;
pub use vscroll_panel::VScrollPanel;
