use tessera_engine::coords::Vec2;

use super::{Layout, LayoutCtx, container_size, place, target_size, visible_children};
use crate::tree::UiTree;
use crate::widget::WidgetId;

/// Vertical form layout organised in captioned groups.
///
/// A child that reports a caption (a label) starts a new group and is preceded
/// by `group_spacing` instead of `spacing`. Widgets following a non-empty
/// caption are indented by `group_indent`. Children without a fixed width are
/// stretched to the available width, less their indent.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout {
    margin: f32,
    spacing: f32,
    group_spacing: f32,
    group_indent: f32,
}

impl GroupLayout {
    pub fn new(margin: f32, spacing: f32, group_spacing: f32, group_indent: f32) -> Self {
        Self { margin, spacing, group_spacing, group_indent }
    }

    #[inline]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: f32) {
        self.margin = margin;
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
    }

    #[inline]
    pub fn group_spacing(&self) -> f32 {
        self.group_spacing
    }

    pub fn set_group_spacing(&mut self, group_spacing: f32) {
        self.group_spacing = group_spacing;
    }

    #[inline]
    pub fn group_indent(&self) -> f32 {
        self.group_indent
    }

    pub fn set_group_indent(&mut self, group_indent: f32) {
        self.group_indent = group_indent;
    }

    /// Starting y: the margin, plus the header of a titled container.
    fn top(&self, tree: &UiTree, widget: WidgetId) -> f32 {
        let header = tree.header_height(widget);
        if header > 0.0 { self.margin + header - self.margin / 2.0 } else { self.margin }
    }
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self::new(15.0, 6.0, 14.0, 20.0)
    }
}

impl Layout for GroupLayout {
    fn preferred_size(&self, tree: &UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) -> Vec2 {
        let mut height = self.top(tree, widget);
        let mut width = 2.0 * self.margin;

        let mut first = true;
        let mut indent = false;
        for child in visible_children(tree, widget) {
            let caption = tree.caption(child);
            if !first {
                height += if caption.is_some() { self.group_spacing } else { self.spacing };
            }
            first = false;

            let target = target_size(tree, child, ctx);
            let indent_cur = indent && caption.is_none();
            height += target.y;
            width = width.max(target.x + 2.0 * self.margin + if indent_cur { self.group_indent } else { 0.0 });

            if let Some(text) = caption {
                indent = !text.is_empty();
            }
        }

        Vec2::new(width, height + self.margin)
    }

    fn perform_layout(&self, tree: &mut UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) {
        let mut height = self.top(tree, widget);
        let available_width = container_size(tree, widget).x - 2.0 * self.margin;

        let mut first = true;
        let mut indent = false;
        for child in visible_children(tree, widget) {
            let caption = tree.caption(child).map(str::is_empty);
            if !first {
                height += if caption.is_some() { self.group_spacing } else { self.spacing };
            }
            first = false;

            let indent_cur = indent && caption.is_none();
            let shift = if indent_cur { self.group_indent } else { 0.0 };

            let preferred = tree.preferred_size(child, ctx);
            let target = tree.core(child).resolve_size(Vec2::new(available_width - shift, preferred.y));

            place(tree, child, Vec2::new(self.margin + shift, height), target, ctx);
            height += target.y;

            if let Some(empty) = caption {
                indent = !empty;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::testing::{Caption, Titled, geometry, leaf};
    use crate::widgets::Panel;
    use tessera_engine::text::FontSystem;

    #[test]
    fn captions_start_indented_groups() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts);
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let root = tree.root();
        let c = tree.insert(Some(root), Panel::new());
        tree.set_layout(c, GroupLayout::new(10.0, 5.0, 12.0, 20.0));

        let title = tree.insert(Some(c), Caption("Audio", Vec2::new(40.0, 16.0)));
        let slider = leaf(&mut tree, c, 60.0, 20.0);
        let untitled = tree.insert(Some(c), Caption("", Vec2::new(0.0, 0.0)));
        let check = leaf(&mut tree, c, 30.0, 10.0);

        // 10 + 16 + 5 + 20 + 12 + 0 + 5 + 10 + 10
        assert_eq!(tree.preferred_size(c, &ctx), Vec2::new(100.0, 88.0));

        tree.core_mut(c).set_size(Vec2::new(200.0, 88.0));
        tree.perform_layout(c, &ctx);
        assert_eq!(geometry(&tree, title), (Vec2::new(10.0, 10.0), Vec2::new(180.0, 16.0)));
        assert_eq!(geometry(&tree, slider), (Vec2::new(30.0, 31.0), Vec2::new(160.0, 20.0)));
        assert_eq!(tree.core(untitled).position(), Vec2::new(10.0, 63.0));
        assert_eq!(geometry(&tree, check), (Vec2::new(10.0, 68.0), Vec2::new(180.0, 10.0)));
    }

    #[test]
    fn fixed_width_is_kept() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts);
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let root = tree.root();
        let c = tree.insert(Some(root), Panel::new());
        tree.set_layout(c, GroupLayout::default());
        let a = leaf(&mut tree, c, 60.0, 20.0);
        tree.core_mut(a).set_fixed_size(Vec2::new(50.0, 0.0));
        tree.core_mut(c).set_size(Vec2::new(300.0, 100.0));

        tree.perform_layout(c, &ctx);
        assert_eq!(geometry(&tree, a), (Vec2::new(15.0, 15.0), Vec2::new(50.0, 20.0)));
    }

    #[test]
    fn titled_container_starts_below_header() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts);
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let root = tree.root();
        let c = tree.insert(Some(root), Titled(40.0));
        tree.set_layout(c, GroupLayout::new(10.0, 0.0, 0.0, 0.0));
        let a = leaf(&mut tree, c, 30.0, 20.0);

        assert_eq!(tree.preferred_size(c, &ctx), Vec2::new(50.0, 75.0));
        tree.core_mut(c).set_size(Vec2::new(50.0, 75.0));
        tree.perform_layout(c, &ctx);
        assert_eq!(tree.core(a).position(), Vec2::new(10.0, 45.0));
    }
}
