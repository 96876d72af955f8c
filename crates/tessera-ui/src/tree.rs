//! The retained widget tree.
//!
//! Widgets live in a generational arena owned by [`UiTree`]. The tree owns every
//! widget; parent/child links are ids, so a child's parent is a back-reference
//! and never an owner. Removing a widget releases its whole subtree.
//!
//! Children are ordered: insertion order is z-order. Layout and theme
//! propagation walk children front to back; hit-testing and input routing walk
//! them back to front, so the last-added (topmost drawn) child wins.

use std::fmt;

use slotmap::SlotMap;
use tessera_engine::coords::Vec2;

use crate::focus::FocusPath;
use crate::layout::{Layout, LayoutCtx};
use crate::painter::Painter;
use crate::shared::Shared;
use crate::theme::Theme;
use crate::widget::{WidgetBehavior, WidgetCore, WidgetId};
use crate::widgets::Screen;

// ── TreeError ─────────────────────────────────────────────────────────────

/// Error returned by the non-panicking tree edits (`try_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The widget is not among the parent's children.
    NotAChild { parent: WidgetId, child: WidgetId },
    /// An insertion or removal index past the end of the children list.
    IndexOutOfBounds { index: usize, len: usize },
    /// Attaching would make a widget its own ancestor.
    Cycle { parent: WidgetId, child: WidgetId },
    /// The id no longer refers to a live widget.
    StaleWidget(WidgetId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NotAChild { parent, child } => {
                write!(f, "widget {child:?} is not a child of {parent:?}")
            }
            TreeError::IndexOutOfBounds { index, len } => {
                write!(f, "child index {index} out of bounds for {len} children")
            }
            TreeError::Cycle { parent, child } => {
                write!(f, "attaching {child:?} under {parent:?} would create a cycle")
            }
            TreeError::StaleWidget(id) => write!(f, "widget {id:?} no longer exists"),
        }
    }
}

impl std::error::Error for TreeError {}

// ── UiTree ────────────────────────────────────────────────────────────────

pub(crate) struct Node {
    pub(crate) core: WidgetCore,
    pub(crate) behavior: Box<dyn WidgetBehavior>,
}

/// Arena of widgets rooted at a [`Screen`].
///
/// The screen root plays the canvas role: it is the only widget focus requests
/// can be resolved against.
///
/// Structural contract violations (bad index, removing a non-child, stale ids
/// passed to accessors) panic. The `try_*` variants report them as
/// [`TreeError`] instead.
pub struct UiTree {
    pub(crate) nodes: SlotMap<WidgetId, Node>,
    root: WidgetId,
    focus: FocusPath,
}

impl UiTree {
    /// Creates a tree whose screen root covers `size`, using the default theme.
    pub fn new(size: Vec2) -> Self {
        Self::with_theme(size, Shared::new(Theme::default()))
    }

    pub fn with_theme(size: Vec2, theme: Shared<Theme>) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut core = WidgetCore::new(theme);
        core.set_size(size);
        core.set_name("screen");
        let root = nodes.insert(Node { core, behavior: Box::new(Screen::new()) });
        Self { nodes, root, focus: FocusPath::new() }
    }

    // ── access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Number of live widgets, the root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root cannot be removed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if `id` refers to a live widget.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// # Panics
    /// Panics if `id` is stale.
    #[inline]
    pub fn core(&self, id: WidgetId) -> &WidgetCore {
        &self.nodes[id].core
    }

    /// # Panics
    /// Panics if `id` is stale.
    #[inline]
    pub fn core_mut(&mut self, id: WidgetId) -> &mut WidgetCore {
        &mut self.nodes[id].core
    }

    #[inline]
    pub fn get_core(&self, id: WidgetId) -> Option<&WidgetCore> {
        self.nodes.get(id).map(|n| &n.core)
    }

    #[inline]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.core(id).children()
    }

    #[inline]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.core(id).parent()
    }

    /// The behavior of `id` as its concrete type.
    pub fn behavior<T: WidgetBehavior>(&self, id: WidgetId) -> Option<&T> {
        let node = self.nodes.get(id)?;
        (*node.behavior).as_any().downcast_ref::<T>()
    }

    pub fn behavior_mut<T: WidgetBehavior>(&mut self, id: WidgetId) -> Option<&mut T> {
        let node = self.nodes.get_mut(id)?;
        (*node.behavior).as_any_mut().downcast_mut::<T>()
    }

    /// Header height the layouts must leave free (titled dialogs).
    pub fn header_height(&self, id: WidgetId) -> f32 {
        let node = &self.nodes[id];
        node.behavior.header_height(&node.core)
    }

    /// Group caption of `id` (labels), if any.
    pub fn caption(&self, id: WidgetId) -> Option<&str> {
        self.nodes[id].behavior.caption()
    }

    // ── structure ─────────────────────────────────────────────────────────

    /// Constructs a widget. With a parent it is appended as the last child and
    /// takes the parent's theme; without one it stays detached until added.
    ///
    /// # Panics
    /// Panics if `parent` is stale.
    pub fn insert(&mut self, parent: Option<WidgetId>, behavior: impl WidgetBehavior) -> WidgetId {
        match self.try_insert(parent, behavior) {
            Ok(id) => id,
            Err(e) => panic!("insert: {e}"),
        }
    }

    /// Non-panicking [`insert`](Self::insert). A stale parent leaves the tree untouched.
    pub fn try_insert(&mut self, parent: Option<WidgetId>, behavior: impl WidgetBehavior) -> Result<WidgetId, TreeError> {
        if let Some(parent) = parent.filter(|&p| !self.contains(p)) {
            return Err(TreeError::StaleWidget(parent));
        }

        let theme = self.core(self.root).theme.clone();
        let layout = behavior.default_layout();
        let mut core = WidgetCore::new(theme);
        core.layout = layout;
        let id = self.nodes.insert(Node { core, behavior: Box::new(behavior) });
        if let Some(parent) = parent {
            self.push_child(parent, id);
        }
        Ok(id)
    }

    /// Appends `child` to `parent`'s children.
    pub fn push_child(&mut self, parent: WidgetId, child: WidgetId) {
        let index = self.core(parent).child_count();
        self.add_child(parent, index, child);
    }

    /// Inserts `child` at `index` in `parent`'s children.
    ///
    /// A child that already has a parent is moved. The child (and its subtree)
    /// takes `parent`'s theme.
    ///
    /// # Panics
    /// Panics if `index > child_count`, or if `child` is `parent` or one of its
    /// ancestors.
    pub fn add_child(&mut self, parent: WidgetId, index: usize, child: WidgetId) {
        if let Err(e) = self.try_add_child(parent, index, child) {
            panic!("add_child: {e}");
        }
    }

    /// Non-panicking [`add_child`](Self::add_child).
    pub fn try_add_child(&mut self, parent: WidgetId, index: usize, child: WidgetId) -> Result<(), TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::StaleWidget(parent));
        }
        if !self.contains(child) {
            return Err(TreeError::StaleWidget(child));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }

        let len = self.core(parent).child_count();
        let same_parent = self.parent(child) == Some(parent);
        // Moving within the same parent frees one slot first.
        let max = if same_parent { len - 1 } else { len };
        if index > max {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }

        self.detach(child);
        let core = self.core_mut(parent);
        core.children.insert(index, child);
        self.core_mut(child).parent = Some(parent);

        let theme = self.core(parent).theme.clone();
        self.propagate_theme(child, &theme);

        log::debug!("attached {child:?} to {parent:?} at {index}");
        Ok(())
    }

    /// Removes `child` from `parent` and releases its subtree.
    ///
    /// # Panics
    /// Panics if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) {
        if let Err(e) = self.try_remove_child(parent, child) {
            panic!("remove_child: {e}");
        }
    }

    /// Non-panicking [`remove_child`](Self::remove_child). On error nothing changes.
    pub fn try_remove_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        let core = self.get_core(parent).ok_or(TreeError::StaleWidget(parent))?;
        let index = core
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(TreeError::NotAChild { parent, child })?;
        self.remove_child_at(parent, index);
        Ok(())
    }

    /// Removes the child at `index` and releases its subtree.
    ///
    /// # Panics
    /// Panics if `index >= child_count`.
    pub fn remove_child_at(&mut self, parent: WidgetId, index: usize) {
        let len = self.core(parent).child_count();
        assert!(index < len, "remove_child_at: {}", TreeError::IndexOutOfBounds { index, len });

        let child = self.core_mut(parent).children.remove(index);
        self.core_mut(child).parent = None;
        self.release(child);
        log::debug!("removed {child:?} from {parent:?}");
    }

    /// Removes `id` from its parent (if any) and releases its subtree.
    ///
    /// # Panics
    /// Panics on the screen root.
    pub fn dispose(&mut self, id: WidgetId) {
        assert!(id != self.root, "dispose: the screen root cannot be disposed");
        match self.parent(id) {
            Some(parent) => self.remove_child(parent, id),
            None => self.release(id),
        }
    }

    /// True if `ancestor` is on the parent chain of `id` (excluding `id` itself).
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut cur = self.parent(id);
        while let Some(w) = cur {
            if w == ancestor {
                return true;
            }
            cur = self.parent(w);
        }
        false
    }

    /// Unlinks `child` from its parent without releasing it.
    fn detach(&mut self, child: WidgetId) {
        if let Some(old) = self.core_mut(child).parent.take() {
            self.core_mut(old).children.retain(|&c| c != child);
        }
    }

    /// Frees `id` and all its descendants.
    fn release(&mut self, id: WidgetId) {
        let mut stack = vec![id];
        let mut released = Vec::new();
        while let Some(w) = stack.pop() {
            if let Some(node) = self.nodes.remove(w) {
                stack.extend(node.core.children.iter().copied());
                released.push(w);
            }
        }

        if released.iter().any(|&w| self.focus.contains(w)) {
            self.clear_focus();
        }
        log::trace!("released {} widget(s)", released.len());
    }

    /// Raises `id` to the top of its siblings' z-order.
    pub fn move_to_front(&mut self, id: WidgetId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let children = &mut self.core_mut(parent).children;
        if children.last() == Some(&id) {
            return;
        }
        children.retain(|&c| c != id);
        children.push(id);
        log::debug!("moved {id:?} to front");
    }

    /// Centers `id` inside its parent.
    pub fn center(&mut self, id: WidgetId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let available = self.core(parent).size();
        let core = self.core_mut(id);
        let position = (available - core.size()) / 2.0;
        core.set_position(position);
    }

    // ── theme ─────────────────────────────────────────────────────────────

    /// Sets the theme of `id` and every descendant.
    ///
    /// A no-op when `id` already holds this exact theme object. Otherwise the
    /// whole subtree is visited, including descendants that already hold the
    /// theme, and `on_theme_changed` runs only where the theme actually changed.
    pub fn set_theme(&mut self, id: WidgetId, theme: Shared<Theme>) {
        if self.core(id).theme == theme {
            return;
        }
        self.propagate_theme(id, &theme);
    }

    fn propagate_theme(&mut self, id: WidgetId, theme: &Shared<Theme>) {
        let mut stack = vec![id];
        while let Some(w) = stack.pop() {
            let node = &mut self.nodes[w];
            if node.core.theme != *theme {
                node.core.theme = theme.clone();
                node.behavior.on_theme_changed(&mut node.core);
            }
            stack.extend(node.core.children.iter().rev().copied());
        }
    }

    // ── layout ────────────────────────────────────────────────────────────

    /// Attaches a new layout to `id` and returns the shared handle.
    pub fn set_layout<L: Layout + 'static>(&mut self, id: WidgetId, layout: L) -> Shared<dyn Layout> {
        let layout = Shared::new(layout).into_dyn();
        self.set_shared_layout(id, layout.clone());
        layout
    }

    /// Attaches an existing (possibly shared) layout to `id`.
    pub fn set_shared_layout(&mut self, id: WidgetId, layout: Shared<dyn Layout>) {
        self.core_mut(id).layout = Some(layout);
    }

    /// Detaches and returns the layout of `id`.
    pub fn clear_layout(&mut self, id: WidgetId) -> Option<Shared<dyn Layout>> {
        self.core_mut(id).layout.take()
    }

    /// The size `id` would like: the behavior's content size, else its layout's
    /// preferred size, else its current size.
    pub fn preferred_size(&self, id: WidgetId, ctx: &LayoutCtx<'_>) -> Vec2 {
        let node = &self.nodes[id];
        if let Some(size) = node.behavior.preferred_size(&node.core, ctx) {
            return size;
        }
        match &node.core.layout {
            Some(layout) => layout.preferred_size(self, id, ctx),
            None => node.core.size(),
        }
    }

    /// Lays out the children of `id`, recursively.
    ///
    /// With a layout attached this delegates to it. Otherwise every visible child
    /// is sized to its fixed-or-preferred size (clamped to its min/max) and laid
    /// out in turn; positions are left alone.
    pub fn perform_layout(&mut self, id: WidgetId, ctx: &LayoutCtx<'_>) {
        if let Some(layout) = self.core(id).layout.clone() {
            log::trace!("layout pass on {id:?}");
            layout.perform_layout(self, id, ctx);
            return;
        }

        let children = self.core(id).children.clone();
        for child in children {
            if !self.core(child).visible() {
                continue;
            }
            let preferred = self.preferred_size(child, ctx);
            let core = self.core_mut(child);
            let size = core.clamp_size(core.resolve_size(preferred));
            core.set_size(size);
            self.perform_layout(child, ctx);
        }
    }

    // ── geometry / hit-testing ────────────────────────────────────────────

    /// Position of `id` in screen space.
    pub fn abs_position(&self, id: WidgetId) -> Vec2 {
        let core = self.core(id);
        match core.parent() {
            Some(parent) => self.abs_position(parent) + core.position(),
            None => core.position(),
        }
    }

    /// Screen-space origin of the space `id`'s position is expressed in.
    pub(crate) fn parent_origin(&self, id: WidgetId) -> Vec2 {
        self.parent(id).map(|p| self.abs_position(p)).unwrap_or_default()
    }

    /// Deepest widget under `point`, searching the subtree of `id`.
    ///
    /// `point` is in the space of `id`'s parent. Children are searched last to
    /// first, so the topmost of overlapping siblings wins. Returns `id` itself if
    /// no visible child contains the point, or `None` if `id` does not either.
    pub fn find_widget(&self, id: WidgetId, point: Vec2) -> Option<WidgetId> {
        let core = self.core(id);
        let local = point - core.position();
        for &child in core.children.iter().rev() {
            let c = self.core(child);
            if c.visible() && c.contains(local) {
                return self.find_widget(child, local);
            }
        }
        core.contains(point).then_some(id)
    }

    /// [`find_widget`](Self::find_widget) from the screen root, in screen space.
    #[inline]
    pub fn widget_at(&self, point: Vec2) -> Option<WidgetId> {
        self.find_widget(self.root, point)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Draws the whole tree.
    pub fn draw(&self, painter: &mut Painter<'_>) {
        if self.core(self.root).visible() {
            self.draw_widget(self.root, painter);
        }
    }

    /// Draws `id`, then its visible children in its local space.
    pub fn draw_widget(&self, id: WidgetId, painter: &mut Painter<'_>) {
        let node = &self.nodes[id];
        node.behavior.draw(&node.core, painter);
        if node.core.children.is_empty() {
            return;
        }
        let draw_children = |p: &mut Painter<'_>| {
            p.with_translation(node.core.position(), |p| {
                for &child in &node.core.children {
                    if self.core(child).visible() {
                        self.draw_widget(child, p);
                    }
                }
            });
        };
        if node.behavior.clips_children() {
            painter.with_clip(node.core.rect(), draw_children);
        } else {
            draw_children(painter);
        }
    }

    // ── focus ─────────────────────────────────────────────────────────────

    /// The focused leaf, if any.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    #[inline]
    pub fn focus_path(&self) -> &FocusPath {
        &self.focus
    }

    /// Moves keyboard focus to `id`.
    ///
    /// # Panics
    /// Panics if `id` is not attached (through its ancestors) to the screen root.
    pub fn request_focus(&mut self, id: WidgetId) {
        let mut top = id;
        while let Some(parent) = self.parent(top) {
            top = parent;
        }
        assert!(top == self.root, "request_focus: {id:?} is not attached to the screen");
        self.update_focus(id);
    }

    /// Replaces the focus path with `id` and its ancestors.
    ///
    /// The old path gets `on_focus_lost`, then the new one gets
    /// `on_focus_gained` from the root down.
    pub fn update_focus(&mut self, id: WidgetId) {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(w) = cur {
            path.push(w);
            cur = self.parent(w);
        }

        let old = self.focus.replace(path.clone());
        self.notify_focus_lost(old);

        for &w in path.iter().rev() {
            let node = &mut self.nodes[w];
            node.core.focused = true;
            node.behavior.on_focus_gained(&mut node.core);
        }
        log::debug!("focus -> {id:?}");
    }

    /// Drops keyboard focus entirely.
    pub fn clear_focus(&mut self) {
        let old = self.focus.take();
        self.notify_focus_lost(old);
    }

    fn notify_focus_lost(&mut self, path: Vec<WidgetId>) {
        for w in path {
            let Some(node) = self.nodes.get_mut(w) else {
                continue;
            };
            if node.core.focused {
                node.core.focused = false;
                node.behavior.on_focus_lost(&mut node.core);
            }
        }
    }
}
