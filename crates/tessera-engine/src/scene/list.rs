use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::{Color, Paint};
use crate::text::{FontId, TextAlign};

use super::cmd::{LineCmd, RectCmd, RoundedRectCmd, TextCmd};
use super::{Border, DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in absolute logical pixels. `None` = no clipping.
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream for a frame.
///
/// # Transforms
///
/// [`push_translation`](Self::push_translation) /
/// [`pop_translation`](Self::pop_translation) scope a coordinate offset.
/// Offsets nest additively and every command (and clip rect) pushed while a
/// translation is active is stored already moved into absolute space.
///
/// # Clipping
///
/// [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) scope a
/// scissor rect, intersected with any parent clip.
///
/// Both stacks must be balanced by the caller; popping an empty stack panics.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Effective clip rects; the top is already intersected with all parents.
    clip_stack: Vec<Rect>,

    /// Accumulated offsets; the top is the sum of all pushed translations.
    translation_stack: Vec<Vec2>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and both stacks. Keeps allocated capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.clip_stack.clear();
        self.translation_stack.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records a command with the given z-index.
    ///
    /// The command is moved by the current translation and inherits the current clip.
    pub fn push(&mut self, z: ZIndex, mut cmd: DrawCmd) {
        let offset = self.translation();
        if offset != Vec2::zero() {
            cmd.translate(offset);
        }

        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });

        self.sorted_dirty = true;
    }

    // ── transforms ────────────────────────────────────────────────────────

    /// Current absolute offset applied to pushed commands.
    #[inline]
    pub fn translation(&self) -> Vec2 {
        self.translation_stack.last().copied().unwrap_or_default()
    }

    /// Number of active translations.
    #[inline]
    pub fn translation_depth(&self) -> usize {
        self.translation_stack.len()
    }

    /// Offsets all following commands by `offset` (on top of the current translation).
    pub fn push_translation(&mut self, offset: Vec2) {
        let total = self.translation() + offset;
        self.translation_stack.push(total);
    }

    /// Ends the most recent [`push_translation`](Self::push_translation).
    ///
    /// # Panics
    /// Panics if no translation is active.
    pub fn pop_translation(&mut self) {
        assert!(
            self.translation_stack.pop().is_some(),
            "pop_translation called without matching push_translation"
        );
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begins a scissor region in local coordinates.
    pub fn push_clip(&mut self, rect: Rect) {
        let rect = rect.translate(self.translation());
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap: a zero-area rect makes the renderer skip the draws.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region.
    ///
    /// # Panics
    /// Panics if no clip is active.
    pub fn pop_clip(&mut self) {
        assert!(self.clip_stack.pop().is_some(), "pop_clip called without matching push_clip");
    }

    // ── shape helpers ─────────────────────────────────────────────────────

    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, paint: Paint) {
        self.push(z, DrawCmd::Rect(RectCmd { rect, paint }));
    }

    #[inline]
    pub fn push_rounded_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radii: CornerRadii,
        paint: Paint,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::RoundedRect(RoundedRectCmd { rect, radii, paint, border }));
    }

    #[inline]
    pub fn push_line(&mut self, z: ZIndex, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(z, DrawCmd::Line(LineCmd { from, to, width, color }));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: Option<FontId>,
        size: f32,
        color: Color,
        origin: Vec2,
        align: TextAlign,
        max_width: Option<f32>,
    ) {
        self.push(
            z,
            DrawCmd::Text(TextCmd { text: text.into(), font, size, color, origin, align, max_width }),
        );
    }

    // ── paint order ───────────────────────────────────────────────────────

    /// Iterates items in paint order (back-to-front) without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // SortKey includes insertion order, so this is stable.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_at(list: &DrawList, i: usize) -> Rect {
        match &list.items()[i].cmd {
            DrawCmd::Rect(c) => c.rect,
            other => panic!("expected rect, got {other:?}"),
        }
    }

    // ── translation ───────────────────────────────────────────────────────

    #[test]
    fn nested_translations_accumulate() {
        let mut list = DrawList::new();
        list.push_translation(Vec2::new(10.0, 5.0));
        list.push_translation(Vec2::new(1.0, 2.0));
        list.push_rect(ZIndex(0), Rect::new(0.0, 0.0, 4.0, 4.0), Color::white().into());
        list.pop_translation();
        list.push_rect(ZIndex(0), Rect::new(0.0, 0.0, 4.0, 4.0), Color::white().into());
        list.pop_translation();
        list.push_rect(ZIndex(0), Rect::new(0.0, 0.0, 4.0, 4.0), Color::white().into());

        assert_eq!(rect_at(&list, 0).origin, Vec2::new(11.0, 7.0));
        assert_eq!(rect_at(&list, 1).origin, Vec2::new(10.0, 5.0));
        assert_eq!(rect_at(&list, 2).origin, Vec2::zero());
        assert_eq!(list.translation_depth(), 0);
    }

    #[test]
    #[should_panic(expected = "pop_translation called without matching push_translation")]
    fn unbalanced_pop_translation_panics() {
        DrawList::new().pop_translation();
    }

    #[test]
    fn clip_follows_translation() {
        let mut list = DrawList::new();
        list.push_translation(Vec2::new(20.0, 20.0));
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_line(ZIndex(0), Vec2::zero(), Vec2::new(5.0, 0.0), 1.0, Color::black());
        list.pop_clip();
        list.pop_translation();

        assert_eq!(list.items()[0].clip_rect, Some(Rect::new(20.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn disjoint_nested_clip_is_empty() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(50.0, 50.0, 10.0, 10.0));
        list.push_rect(ZIndex(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::white().into());
        assert!(list.items()[0].clip_rect.is_some_and(|r| r.is_empty()));
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_rect(ZIndex(2), Rect::new(0.0, 0.0, 1.0, 1.0), Color::white().into());
        list.push_rect(ZIndex(0), Rect::new(1.0, 0.0, 1.0, 1.0), Color::white().into());
        list.push_rect(ZIndex(0), Rect::new(2.0, 0.0, 1.0, 1.0), Color::white().into());

        let xs: Vec<f32> = list
            .iter_in_paint_order()
            .filter_map(|item| item.cmd.bounds())
            .map(|r| r.origin.x)
            .collect();
        assert_eq!(xs, vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn clear_resets_stacks() {
        let mut list = DrawList::new();
        list.push_translation(Vec2::new(3.0, 3.0));
        list.push_clip(Rect::new(0.0, 0.0, 1.0, 1.0));
        list.clear();
        assert_eq!(list.translation(), Vec2::zero());
        assert_eq!(list.translation_depth(), 0);
        assert!(list.is_empty());
    }
}
