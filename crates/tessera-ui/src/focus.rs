//! Keyboard focus path.
//!
//! Focus is not a single widget but a path: the focused leaf and every ancestor
//! up to the screen root all carry `focused = true`. [`FocusPath`] remembers the
//! current path so the next focus change can notify exactly those widgets.
//!
//! Transfers go through [`crate::UiTree::update_focus`]:
//! 1. every widget on the old path gets `on_focus_lost`
//! 2. every widget on the new path gets `on_focus_gained`, root first

use crate::widget::WidgetId;

/// The focused widget followed by its ancestors, leaf first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FocusPath {
    path: Vec<WidgetId>,
}

impl FocusPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused leaf, if any.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.path.first().copied()
    }

    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.path.contains(&id)
    }

    /// Leaf first, root last.
    #[inline]
    pub fn as_slice(&self) -> &[WidgetId] {
        &self.path
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Installs a new path and returns the old one.
    pub(crate) fn replace(&mut self, path: Vec<WidgetId>) -> Vec<WidgetId> {
        std::mem::replace(&mut self.path, path)
    }

    /// Clears the path and returns what it held.
    pub(crate) fn take(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.path)
    }
}
