//! Single-line editing buffer behind [`TextBox`](super::TextBox).
//!
//! Cursor and selection anchor are byte offsets into the text, always on a
//! char boundary. The selection is the range between the two.

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct EditBuffer {
    text: String,
    cursor: usize,
    anchor: Option<usize>,
}

impl EditBuffer {
    /// Replaces the contents; cursor at `cursor` clamped to the text.
    pub fn reset(&mut self, text: &str, cursor: usize) {
        self.text = text.to_owned();
        self.cursor = self.floor(cursor.min(self.text.len()));
        self.anchor = None;
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Ordered selection bounds, `None` when nothing is selected.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        (anchor != self.cursor).then(|| (anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selection().map(|(lo, hi)| &self.text[lo..hi])
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.text.len();
    }

    /// Moves the cursor to `to`. With `extend` the anchor stays put, so the
    /// selection grows or shrinks; otherwise it is dropped.
    fn move_to(&mut self, to: usize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
        self.cursor = to;
    }

    pub fn left(&mut self, extend: bool) {
        let to = self.prev(self.cursor);
        self.move_to(to, extend);
    }

    pub fn right(&mut self, extend: bool) {
        let to = self.next(self.cursor);
        self.move_to(to, extend);
    }

    pub fn home(&mut self, extend: bool) {
        self.move_to(0, extend);
    }

    pub fn end(&mut self, extend: bool) {
        self.move_to(self.text.len(), extend);
    }

    /// Removes the selection. Returns false if there was none.
    pub fn delete_selection(&mut self) -> bool {
        let Some((lo, hi)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.text.replace_range(lo..hi, "");
        self.cursor = lo;
        self.anchor = None;
        true
    }

    /// Replaces the selection (if any) with `s`, leaving the cursor after it.
    pub fn insert(&mut self, s: &str) {
        self.delete_selection();
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        let from = self.prev(self.cursor);
        self.text.replace_range(from..self.cursor, "");
        self.cursor = from;
    }

    pub fn delete(&mut self) {
        if self.delete_selection() || self.cursor == self.text.len() {
            return;
        }
        let to = self.next(self.cursor);
        self.text.replace_range(self.cursor..to, "");
    }

    fn prev(&self, at: usize) -> usize {
        self.text[..at].char_indices().next_back().map_or(0, |(i, _)| i)
    }

    fn next(&self, at: usize) -> usize {
        self.text[at..].chars().next().map_or(at, |c| at + c.len_utf8())
    }

    fn floor(&self, mut at: usize) -> usize {
        while !self.text.is_char_boundary(at) {
            at -= 1;
        }
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> EditBuffer {
        let mut b = EditBuffer::default();
        b.reset(text, text.len());
        b
    }

    #[test]
    fn typing_and_erasing_at_the_cursor() {
        let mut b = buffer("helo");
        b.left(false);
        b.insert("l");
        assert_eq!((b.text(), b.cursor()), ("hello", 4));
        b.backspace();
        b.delete();
        assert_eq!((b.text(), b.cursor()), ("hel", 3));
    }

    #[test]
    fn shift_moves_build_a_selection() {
        let mut b = buffer("volume");
        b.home(false);
        b.right(true);
        b.right(true);
        b.right(true);
        assert_eq!(b.selected_text(), Some("vol"));
        b.left(true);
        assert_eq!(b.selection(), Some((0, 2)));

        b.insert("X");
        assert_eq!(b.text(), "Xlume");
        assert_eq!(b.selection(), None);
    }

    #[test]
    fn plain_move_drops_the_selection() {
        let mut b = buffer("abc");
        b.select_all();
        b.end(false);
        assert_eq!(b.selection(), None);
        b.backspace();
        assert_eq!(b.text(), "ab");
    }

    #[test]
    fn multibyte_chars_move_as_one() {
        let mut b = buffer("añb");
        b.left(false);
        b.left(false);
        assert_eq!(b.cursor(), 1);
        b.delete();
        assert_eq!(b.text(), "ab");

        b.reset("ñ", 1);
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn edits_at_the_edges_are_no_ops() {
        let mut b = buffer("x");
        b.delete();
        b.home(false);
        b.backspace();
        b.left(false);
        assert_eq!((b.text(), b.cursor()), ("x", 0));
    }
}
