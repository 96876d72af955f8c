//! Layout strategies.
//!
//! A [`Layout`] is attached to a container widget (shared through [`Shared`]) and
//! decides where that container's visible children go. Layout is depth-first:
//! the container sizes and places its children, then each child lays out its own
//! children through [`UiTree::perform_layout`].
//!
//! Layouts hold no per-pass state; both methods are functions of the current
//! tree, so running a pass twice gives the same result.

mod advanced_grid;
mod box_layout;
mod grid;
mod group;

pub use advanced_grid::{AdvancedGridLayout, Anchor};
pub use box_layout::BoxLayout;
pub use grid::GridLayout;
pub use group::GroupLayout;

use tessera_engine::coords::{Axis, Vec2};
use tessera_engine::text::FontSystem;

use crate::shared::Shared;
use crate::tree::UiTree;
use crate::widget::WidgetId;

/// Measurement context for a layout pass.
///
/// Borrowed read-only; text measurement through it never draws anything.
#[derive(Clone, Copy)]
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
}

impl<'a> LayoutCtx<'a> {
    #[inline]
    pub fn new(fonts: &'a FontSystem) -> Self {
        Self { fonts }
    }
}

/// Sizing and placement strategy for a container's children.
pub trait Layout {
    /// The size the container would like, given its children. Must not mutate.
    fn preferred_size(&self, tree: &UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) -> Vec2;

    /// Positions and sizes every visible child of `widget`, then recurses into them.
    fn perform_layout(&self, tree: &mut UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>);
}

impl<L: Layout + 'static> Shared<L> {
    /// Erases the concrete layout type so it can be attached to widgets.
    pub fn into_dyn(self) -> Shared<dyn Layout> {
        let rc: std::rc::Rc<L> = Shared::into_rc(self);
        let rc: std::rc::Rc<dyn Layout> = rc;
        Shared::from_rc(rc)
    }
}

/// Stacking direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The axis children are stacked along.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Orientation::Horizontal => Axis::X,
            Orientation::Vertical => Axis::Y,
        }
    }
}

/// Placement of a child inside the space it was given, per axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Alignment {
    /// Flush to the start (left / top).
    Minimum,
    #[default]
    Center,
    /// Flush to the end (right / bottom).
    Maximum,
    /// Stretched to the available space.
    Fill,
}

// ── shared helpers ────────────────────────────────────────────────────────

/// Visible children of `widget`, in insertion order.
pub(crate) fn visible_children(tree: &UiTree, widget: WidgetId) -> Vec<WidgetId> {
    tree.children(widget)
        .iter()
        .copied()
        .filter(|&c| tree.core(c).visible())
        .collect()
}

/// Per axis: the child's fixed size if set, else its preferred size.
pub(crate) fn target_size(tree: &UiTree, child: WidgetId, ctx: &LayoutCtx<'_>) -> Vec2 {
    let preferred = tree.preferred_size(child, ctx);
    tree.core(child).resolve_size(preferred)
}

/// The container's own extent: fixed size where set, else its current size.
pub(crate) fn container_size(tree: &UiTree, widget: WidgetId) -> Vec2 {
    let core = tree.core(widget);
    core.resolve_size(core.size())
}

/// Assigns geometry to `child` and lays out its subtree.
pub(crate) fn place(tree: &mut UiTree, child: WidgetId, position: Vec2, size: Vec2, ctx: &LayoutCtx<'_>) {
    let core = tree.core_mut(child);
    core.set_position(position);
    core.set_size(size);
    tree.perform_layout(child, ctx);
}

#[cfg(test)]
pub(crate) mod testing {
    use tessera_engine::coords::Vec2;

    use super::LayoutCtx;
    use crate::tree::UiTree;
    use crate::widget::{WidgetBehavior, WidgetCore, WidgetId};

    /// Leaf with a constant preferred size.
    pub(crate) struct Leaf(pub Vec2);

    impl WidgetBehavior for Leaf {
        fn preferred_size(&self, _core: &WidgetCore, _ctx: &LayoutCtx<'_>) -> Option<Vec2> {
            Some(self.0)
        }
    }

    /// Container reporting a title header.
    pub(crate) struct Titled(pub f32);

    impl WidgetBehavior for Titled {
        fn header_height(&self, _core: &WidgetCore) -> f32 {
            self.0
        }
    }

    /// Group caption with a constant preferred size.
    pub(crate) struct Caption(pub &'static str, pub Vec2);

    impl WidgetBehavior for Caption {
        fn preferred_size(&self, _core: &WidgetCore, _ctx: &LayoutCtx<'_>) -> Option<Vec2> {
            Some(self.1)
        }

        fn caption(&self) -> Option<&str> {
            Some(self.0)
        }
    }

    pub(crate) fn leaf(tree: &mut UiTree, parent: WidgetId, w: f32, h: f32) -> WidgetId {
        tree.insert(Some(parent), Leaf(Vec2::new(w, h)))
    }

    pub(crate) fn geometry(tree: &UiTree, id: WidgetId) -> (Vec2, Vec2) {
        let core = tree.core(id);
        (core.position(), core.size())
    }
}
