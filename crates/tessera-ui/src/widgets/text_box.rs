use regex::Regex;
use tessera_engine::coords::{Rect, Vec2};
use tessera_engine::paint::{Color, LinearGradient};
use tessera_engine::scene::Border;
use tessera_engine::text::TextAlign;

use crate::event::{EventCtx, EventResult, Key, Modifiers, MouseButton};
use crate::layout::LayoutCtx;
use crate::painter::Painter;
use crate::widget::{WidgetBehavior, WidgetCore};
use crate::widgets::text_edit::EditBuffer;

/// Fires when an edit is committed; returning false restores the old value.
type CommitCallback = Box<dyn FnMut(&str) -> bool>;

/// Single-line editable text field.
///
/// Focus starts an edit on a copy of the value. Enter or losing focus commits
/// it: an empty edit commits the default value, an edit that fails the format
/// is dropped, and a callback returning false rolls the value back. Keys and
/// typed text are only taken while focused.
///
/// # Example
/// ```rust,ignore
/// let fov = tree.insert(
///     Some(dialog),
///     TextBox::new("90").units("deg").with_format(r"[0-9]{1,3}")?.on_commit(|v| v != "0"),
/// );
/// ```
pub struct TextBox {
    value: String,
    edit: EditBuffer,
    default_value: String,
    placeholder: String,
    units: String,
    editable: bool,
    committed: bool,
    valid_format: bool,
    format: Option<Regex>,
    callback: Option<CommitCallback>,
}

impl TextBox {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            edit: EditBuffer::default(),
            default_value: String::new(),
            placeholder: String::new(),
            units: String::new(),
            editable: true,
            committed: true,
            valid_format: true,
            format: None,
            callback: None,
        }
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Value committed when the edit is left empty.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Shown greyed out while the committed value is empty.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Suffix drawn at the right edge, e.g. "px".
    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Builder form of [`set_format`](Self::set_format).
    pub fn with_format(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.set_format(pattern)?;
        Ok(self)
    }

    /// Restricts commits to text matching `pattern` as a whole. An empty
    /// pattern accepts anything.
    pub fn set_format(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.format = if pattern.is_empty() { None } else { Some(Regex::new(&format!("^(?:{pattern})$"))?) };
        self.valid_format = self.check_format(self.edit.text());
        Ok(())
    }

    /// Callback run on every commit with the new value.
    pub fn on_commit(mut self, f: impl FnMut(&str) -> bool + 'static) -> Self {
        self.callback = Some(Box::new(f));
        self
    }

    pub fn set_callback(&mut self, f: impl FnMut(&str) -> bool + 'static) {
        self.callback = Some(Box::new(f));
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets the committed value without running the callback.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The text being edited; equal to the value's copy taken at focus time
    /// until edited.
    #[inline]
    pub fn editing_text(&self) -> &str {
        self.edit.text()
    }

    /// False between focus and the next commit.
    #[inline]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Whether the edit currently matches the format.
    #[inline]
    pub fn is_valid_format(&self) -> bool {
        self.valid_format
    }

    #[inline]
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn check_format(&self, text: &str) -> bool {
        text.is_empty() || self.format.as_ref().is_none_or(|re| re.is_match(text))
    }

    fn commit(&mut self) {
        let backup = self.value.clone();
        if self.valid_format {
            self.value = if self.edit.text().is_empty() { self.default_value.clone() } else { self.edit.text().to_owned() };
        }
        if let Some(f) = &mut self.callback {
            if !f(&self.value) {
                log::debug!("textbox commit {:?} rejected", self.value);
                self.value = backup;
            }
        }
        self.committed = true;
        self.valid_format = self.check_format(self.edit.text());
    }

    fn copy_selection(&self) {
        let Some(selected) = self.edit.selected_text() else {
            return;
        };
        match arboard::Clipboard::new() {
            Ok(mut cb) => {
                if let Err(e) = cb.set_text(selected.to_owned()) {
                    log::debug!("clipboard write failed: {e}");
                }
            }
            Err(e) => log::debug!("clipboard unavailable: {e}"),
        }
    }

    fn paste(&mut self) {
        if let Ok(mut cb) = arboard::Clipboard::new() {
            if let Ok(text) = cb.get_text() {
                // Single line: keep what comes before the first line break.
                let line = text.lines().next().unwrap_or_default();
                self.edit.insert(line);
            }
        }
    }

    fn font_size(core: &WidgetCore) -> f32 {
        if core.has_font_size() { core.font_size() } else { core.theme().text_box_font_size }
    }

    fn active(&self, core: &WidgetCore) -> bool {
        self.editable && core.focused()
    }
}

impl WidgetBehavior for TextBox {
    fn preferred_size(&self, core: &WidgetCore, ctx: &LayoutCtx<'_>) -> Option<Vec2> {
        let theme = core.theme();
        let size = Self::font_size(core);
        let height = size * 1.4;
        let units = if self.units.is_empty() {
            0.0
        } else {
            ctx.fonts.text_bounds(&self.units, &theme.font_normal, size, TextAlign::Left).size.x
        };
        let text = ctx.fonts.text_bounds(&self.value, &theme.font_normal, size, TextAlign::Left).size.x;
        Some(Vec2::new(height + text + units, height))
    }

    fn draw(&self, core: &WidgetCore, painter: &mut Painter<'_>) {
        let theme = core.theme();
        let rect = core.rect();
        let size = Self::font_size(core);
        let editing = self.active(core) && !self.committed;

        let (top, bot) = if editing && !self.valid_format {
            (Color::from_srgb_u8(255, 0, 0, 100), Color::from_srgb_u8(255, 0, 0, 50))
        } else {
            (Color::from_srgb_u8(255, 255, 255, 32), Color::from_srgb_u8(32, 32, 32, 32))
        };
        let fill = LinearGradient::vertical(rect.origin.x, rect.origin.y, rect.max().y, top, bot);
        let border = Border::new(theme.border_width, theme.border_dark);
        painter.fill_rounded_rect(rect, 3.0, fill, Some(border));

        let pad = rect.size.y * 0.3;
        let line = painter.measure_text("A", &theme.font_normal, size);
        let text_y = rect.origin.y + (rect.size.y - line.y) / 2.0;

        let mut right = rect.max().x - pad;
        if !self.units.is_empty() {
            let origin = Vec2::new(right, text_y);
            painter.text(self.units.as_str(), &theme.font_normal, size, theme.disabled_text_color, origin, TextAlign::Right);
            right -= painter.measure_text(&self.units, &theme.font_normal, size).x + pad / 2.0;
        }

        let area = Rect::new(rect.origin.x + pad, rect.origin.y, (right - rect.origin.x - pad).max(0.0), rect.size.y);
        let origin = Vec2::new(area.origin.x, text_y);
        let font = theme.font_normal.as_str();

        if !editing {
            let (text, color) = if self.value.is_empty() {
                (self.placeholder.as_str(), theme.disabled_text_color)
            } else if core.enabled() {
                (self.value.as_str(), theme.text_color)
            } else {
                (self.value.as_str(), theme.disabled_text_color)
            };
            painter.with_clip(area, |p| p.text(text, font, size, color, origin, TextAlign::Left));
            return;
        }

        let text = self.edit.text();
        let x_at = |p: &Painter<'_>, at: usize| origin.x + p.measure_text(&text[..at], font, size).x;
        painter.with_clip(area, |p| {
            if let Some((lo, hi)) = self.edit.selection() {
                let (x0, x1) = (x_at(&*p, lo), x_at(&*p, hi));
                p.fill_rect(Rect::new(x0, text_y, x1 - x0, line.y), Color::from_srgb_u8(255, 255, 255, 80));
            }
            p.text(text, font, size, theme.text_color, origin, TextAlign::Left);
            let x = x_at(&*p, self.edit.cursor());
            p.stroke_line(Vec2::new(x, text_y), Vec2::new(x, text_y + line.y), 1.0, Color::from_srgb_u8(255, 192, 0, 255));
        });
    }

    fn on_mouse_button_pressed(
        &mut self,
        core: &mut WidgetCore,
        ctx: &mut EventCtx<'_>,
        _pos: Vec2,
        button: MouseButton,
    ) -> EventResult {
        if button != MouseButton::Left || !self.editable || !core.enabled() {
            return EventResult::Ignored;
        }
        if !core.focused() {
            ctx.request_focus();
        }
        EventResult::Consumed
    }

    fn on_key_pressed(
        &mut self,
        core: &mut WidgetCore,
        _ctx: &mut EventCtx<'_>,
        key: Key,
        modifiers: Modifiers,
    ) -> EventResult {
        if !self.active(core) {
            return EventResult::Ignored;
        }

        let extend = modifiers.shift;
        match key {
            Key::Left => self.edit.left(extend),
            Key::Right => self.edit.right(extend),
            Key::Home => self.edit.home(extend),
            Key::End => self.edit.end(extend),
            Key::Backspace => self.edit.backspace(),
            Key::Delete => self.edit.delete(),
            Key::Enter if !self.committed => self.commit(),
            Key::A if modifiers.ctrl => self.edit.select_all(),
            Key::C if modifiers.ctrl => self.copy_selection(),
            Key::X if modifiers.ctrl => {
                self.copy_selection();
                self.edit.delete_selection();
            }
            Key::V if modifiers.ctrl => self.paste(),
            _ => {}
        }
        self.valid_format = self.check_format(self.edit.text());
        EventResult::Consumed
    }

    fn on_key_released(
        &mut self,
        core: &mut WidgetCore,
        _ctx: &mut EventCtx<'_>,
        _key: Key,
        _modifiers: Modifiers,
    ) -> EventResult {
        self.active(core).into()
    }

    fn on_character_input(&mut self, core: &mut WidgetCore, _ctx: &mut EventCtx<'_>, text: &str) -> EventResult {
        if !self.active(core) {
            return EventResult::Ignored;
        }
        let printable: String = text.chars().filter(|c| !c.is_control()).collect();
        if !printable.is_empty() {
            self.edit.insert(&printable);
            self.valid_format = self.check_format(self.edit.text());
        }
        EventResult::Consumed
    }

    fn on_focus_gained(&mut self, _core: &mut WidgetCore) {
        if !self.editable {
            return;
        }
        self.edit.reset(&self.value, 0);
        self.committed = false;
        self.valid_format = self.check_format(self.edit.text());
    }

    fn on_focus_lost(&mut self, _core: &mut WidgetCore) {
        if self.editable && !self.committed {
            self.commit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use tessera_engine::text::FontSystem;

    use crate::input::{ButtonState, Input};
    use crate::tree::UiTree;
    use crate::widget::WidgetId;

    const INSIDE: Vec2 = Vec2::new(20.0, 20.0);

    fn setup(text_box: TextBox) -> (UiTree, WidgetId, Input) {
        let mut tree = UiTree::new(Vec2::new(300.0, 200.0));
        let root = tree.root();
        let id = tree.insert(Some(root), text_box);
        tree.core_mut(id).set_position(Vec2::new(10.0, 10.0));
        tree.core_mut(id).set_size(Vec2::new(120.0, 28.0));
        (tree, id, Input::new())
    }

    fn click(tree: &mut UiTree, input: &mut Input, pos: Vec2) {
        input.end_frame();
        input.move_mouse(pos);
        input.set_button(MouseButton::Left, ButtonState::Pressed);
        tree.dispatch(input);
        input.end_frame();
        input.set_button(MouseButton::Left, ButtonState::Released);
        tree.dispatch(input);
    }

    /// One key tap with `modifiers` held. Returns whether the press was consumed.
    fn tap(tree: &mut UiTree, input: &mut Input, key: Key, modifiers: Modifiers) -> bool {
        input.end_frame();
        input.set_modifiers(modifiers);
        input.press_key(key);
        let consumed = tree.dispatch(input);
        input.end_frame();
        input.release_key(key);
        tree.dispatch(input);
        input.set_modifiers(Modifiers::NONE);
        consumed
    }

    fn type_text(tree: &mut UiTree, input: &mut Input, text: &str) -> bool {
        input.end_frame();
        input.push_text(text);
        tree.dispatch(input)
    }

    fn text_box(tree: &UiTree, id: WidgetId) -> &TextBox {
        tree.behavior::<TextBox>(id).expect("text box")
    }

    const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false };
    const CTRL: Modifiers = Modifiers { shift: false, ctrl: true, alt: false };

    #[test]
    fn preferred_size_fits_value_and_units() {
        let fonts = FontSystem::new();
        let (tree, id, _) = setup(TextBox::new("1280").units("px"));
        let value = fonts.text_bounds("1280", "sans", 20.0, TextAlign::Left).size.x;
        let units = fonts.text_bounds("px", "sans", 20.0, TextAlign::Left).size.x;
        let h = 20.0 * 1.4;
        assert_eq!(tree.preferred_size(id, &LayoutCtx::new(&fonts)), Vec2::new(h + value + units, h));
    }

    #[test]
    fn click_focuses_and_starts_an_edit() {
        let (mut tree, id, mut input) = setup(TextBox::new("42"));
        click(&mut tree, &mut input, INSIDE);

        assert_eq!(tree.focused(), Some(id));
        let tb = text_box(&tree, id);
        assert!(!tb.is_committed());
        assert_eq!(tb.editing_text(), "42");
        assert_eq!(tb.edit.cursor(), 0);
    }

    #[test]
    fn typing_then_enter_commits() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let tb = TextBox::new("42").on_commit(move |v| {
            sink.borrow_mut().push(v.to_owned());
            true
        });
        let (mut tree, id, mut input) = setup(tb);
        click(&mut tree, &mut input, INSIDE);

        assert!(tap(&mut tree, &mut input, Key::End, Modifiers::NONE));
        assert!(type_text(&mut tree, &mut input, "0"));
        assert_eq!(text_box(&tree, id).editing_text(), "420");
        assert_eq!(text_box(&tree, id).value(), "42");

        tap(&mut tree, &mut input, Key::Enter, Modifiers::NONE);
        assert_eq!(text_box(&tree, id).value(), "420");
        assert!(text_box(&tree, id).is_committed());
        assert_eq!(*seen.borrow(), vec!["420".to_owned()]);
    }

    #[test]
    fn losing_focus_commits() {
        let (mut tree, id, mut input) = setup(TextBox::new("a"));
        click(&mut tree, &mut input, INSIDE);
        type_text(&mut tree, &mut input, "b");

        tree.clear_focus();
        assert_eq!(text_box(&tree, id).value(), "ba");
        assert!(text_box(&tree, id).is_committed());
    }

    #[test]
    fn rejected_commit_restores_old_value() {
        let (mut tree, id, mut input) = setup(TextBox::new("ok").on_commit(|v| v != "bad"));
        click(&mut tree, &mut input, INSIDE);
        tap(&mut tree, &mut input, Key::A, CTRL);
        type_text(&mut tree, &mut input, "bad");
        tap(&mut tree, &mut input, Key::Enter, Modifiers::NONE);
        assert_eq!(text_box(&tree, id).value(), "ok");
    }

    #[test]
    fn invalid_format_is_not_committed() {
        let tb = TextBox::new("12").with_format("[0-9]+").expect("valid pattern");
        let (mut tree, id, mut input) = setup(tb);
        click(&mut tree, &mut input, INSIDE);

        // "x12" holds digits, but the pattern must match the whole text.
        type_text(&mut tree, &mut input, "x");
        assert!(!text_box(&tree, id).is_valid_format());
        tap(&mut tree, &mut input, Key::Enter, Modifiers::NONE);
        assert_eq!(text_box(&tree, id).value(), "12");
    }

    #[test]
    fn malformed_format_is_an_error() {
        assert!(TextBox::new("").with_format("[").is_err());
    }

    #[test]
    fn empty_edit_commits_the_default() {
        let (mut tree, id, mut input) = setup(TextBox::new("7").default_value("0"));
        click(&mut tree, &mut input, INSIDE);
        tap(&mut tree, &mut input, Key::Delete, Modifiers::NONE);
        assert_eq!(text_box(&tree, id).editing_text(), "");
        tap(&mut tree, &mut input, Key::Enter, Modifiers::NONE);
        assert_eq!(text_box(&tree, id).value(), "0");
    }

    #[test]
    fn shift_selection_is_replaced_by_typing() {
        let (mut tree, id, mut input) = setup(TextBox::new("volume"));
        click(&mut tree, &mut input, INSIDE);
        for _ in 0..3 {
            tap(&mut tree, &mut input, Key::Right, SHIFT);
        }
        type_text(&mut tree, &mut input, "V");
        assert_eq!(text_box(&tree, id).editing_text(), "Vume");

        tap(&mut tree, &mut input, Key::End, Modifiers::NONE);
        tap(&mut tree, &mut input, Key::Backspace, Modifiers::NONE);
        assert_eq!(text_box(&tree, id).editing_text(), "Vum");
    }

    #[test]
    fn keys_pass_through_when_unfocused() {
        let (mut tree, id, mut input) = setup(TextBox::new("x"));
        input.move_mouse(INSIDE);
        assert!(!tap(&mut tree, &mut input, Key::Backspace, Modifiers::NONE));
        assert!(!type_text(&mut tree, &mut input, "y"));
        assert_eq!(text_box(&tree, id).value(), "x");
        assert!(text_box(&tree, id).is_committed());
    }

    #[test]
    fn read_only_box_ignores_editing() {
        let (mut tree, id, mut input) = setup(TextBox::new("fixed").editable(false));
        click(&mut tree, &mut input, INSIDE);
        // Still a leaf, so the press focuses it, but no edit starts.
        assert_eq!(tree.focused(), Some(id));
        assert!(text_box(&tree, id).is_committed());
        assert!(!type_text(&mut tree, &mut input, "y"));
        assert_eq!(text_box(&tree, id).value(), "fixed");
    }
}
