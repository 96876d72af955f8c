use tessera_engine::paint::Color;

/// Look-and-feel data read by widgets.
///
/// A theme is plain data: widgets read the fields they care about by name. It is
/// shared between widgets through [`crate::Shared`] and broadcast down the tree by
/// [`crate::UiTree::set_theme`].
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // ── fonts ─────────────────────────────────────────────────────────────
    /// Font name looked up in the `FontSystem`.
    pub font_normal: String,
    pub font_bold: String,
    pub font_mono: String,

    pub standard_font_size: f32,
    pub button_font_size: f32,
    pub text_box_font_size: f32,
    pub label_font_size: f32,
    pub dialog_title_font_size: f32,
    pub tooltip_font_size: f32,

    // ── metrics ───────────────────────────────────────────────────────────
    pub dialog_corner_radius: f32,
    pub dialog_header_height: f32,
    pub dialog_drop_shadow_size: f32,
    pub button_corner_radius: f32,
    pub tooltip_width: f32,
    pub border_width: f32,

    // ── colors ────────────────────────────────────────────────────────────
    pub drop_shadow: Color,
    pub border_dark: Color,
    pub border_light: Color,
    pub border_medium: Color,
    pub text_color: Color,
    pub disabled_text_color: Color,
    pub text_shadow: Color,
    pub label_font_color: Color,

    pub button_gradient_top_focused: Color,
    pub button_gradient_bot_focused: Color,
    pub button_gradient_top_unfocused: Color,
    pub button_gradient_bot_unfocused: Color,
    pub button_gradient_top_pushed: Color,
    pub button_gradient_bot_pushed: Color,

    pub dialog_fill_unfocused: Color,
    pub dialog_fill_focused: Color,
    pub dialog_title_unfocused: Color,
    pub dialog_title_focused: Color,
    pub dialog_header_gradient_top: Color,
    pub dialog_header_gradient_bot: Color,
    pub dialog_header_sep_top: Color,
    pub dialog_header_sep_bot: Color,

    pub screen_background: Color,
}

impl Theme {
    pub fn new() -> Self {
        let rgba = Color::from_srgb_u8;
        Self {
            font_normal: "sans".to_owned(),
            font_bold: "sans-bold".to_owned(),
            font_mono: "mono".to_owned(),

            standard_font_size: 16.0,
            button_font_size: 20.0,
            text_box_font_size: 20.0,
            label_font_size: 18.0,
            dialog_title_font_size: 24.0,
            tooltip_font_size: 18.0,

            dialog_corner_radius: 5.0,
            dialog_header_height: 40.0,
            dialog_drop_shadow_size: 15.0,
            button_corner_radius: 2.5,
            tooltip_width: 150.0,
            border_width: 1.0,

            drop_shadow: rgba(0, 0, 0, 128),
            border_dark: rgba(29, 29, 29, 255),
            border_light: rgba(92, 92, 92, 255),
            border_medium: rgba(35, 35, 35, 255),
            text_color: rgba(211, 211, 211, 255),
            disabled_text_color: rgba(105, 105, 105, 255),
            text_shadow: rgba(0, 0, 0, 128),
            label_font_color: Color::white(),

            button_gradient_top_focused: rgba(64, 64, 64, 255),
            button_gradient_bot_focused: rgba(48, 48, 48, 255),
            button_gradient_top_unfocused: rgba(74, 74, 74, 255),
            button_gradient_bot_unfocused: rgba(58, 58, 58, 255),
            button_gradient_top_pushed: rgba(41, 41, 41, 255),
            button_gradient_bot_pushed: rgba(29, 29, 29, 255),

            dialog_fill_unfocused: rgba(43, 43, 43, 230),
            dialog_fill_focused: rgba(45, 45, 45, 230),
            dialog_title_unfocused: rgba(220, 220, 220, 160),
            dialog_title_focused: rgba(255, 255, 255, 190),
            dialog_header_gradient_top: rgba(74, 74, 74, 255),
            dialog_header_gradient_bot: rgba(58, 58, 58, 255),
            dialog_header_sep_top: rgba(92, 92, 92, 255),
            dialog_header_sep_bot: rgba(29, 29, 29, 255),

            screen_background: rgba(30, 31, 34, 255),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
