use crate::input::Input;
use crate::widget::WidgetId;

pub use tessera_engine::input::{Key, Modifiers, MouseButton};

/// Result returned by the input hooks of [`crate::widget::WidgetBehavior`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled. Stop routing to siblings / parents.
    Consumed,
    /// Event was not handled. Keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }

    /// `Consumed` if either side is.
    #[inline]
    pub fn or(self, other: EventResult) -> EventResult {
        if self.is_consumed() || other.is_consumed() {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

impl From<bool> for EventResult {
    #[inline]
    fn from(handled: bool) -> Self {
        if handled { EventResult::Consumed } else { EventResult::Ignored }
    }
}

/// Per-dispatch context handed to every input hook.
///
/// Hooks get read access to the frame's [`Input`] (including the drag
/// selection, which is interior-mutable) and can leave requests that the tree
/// applies once the whole dispatch pass is over:
/// - [`request_focus`](Self::request_focus): first request of the pass wins
/// - [`move_to_front`](Self::move_to_front): last request of the pass wins
pub struct EventCtx<'a> {
    input: &'a Input,
    current: WidgetId,
    focus_request: Option<WidgetId>,
    raise_request: Option<WidgetId>,
}

impl<'a> EventCtx<'a> {
    pub(crate) fn new(input: &'a Input, root: WidgetId) -> Self {
        Self { input, current: root, focus_request: None, raise_request: None }
    }

    /// The frame's input snapshot.
    #[inline]
    pub fn input(&self) -> &'a Input {
        self.input
    }

    /// The widget whose hook is currently running.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.current
    }

    /// Makes `id` the current widget; returns the previous one.
    #[inline]
    pub(crate) fn enter(&mut self, id: WidgetId) -> WidgetId {
        std::mem::replace(&mut self.current, id)
    }

    /// Asks for keyboard focus on the current widget.
    #[inline]
    pub fn request_focus(&mut self) {
        self.focus_request.get_or_insert(self.current);
    }

    /// Asks for the current widget to be raised above its siblings.
    #[inline]
    pub fn move_to_front(&mut self) {
        self.raise_request = Some(self.current);
    }

    /// Consumes the context, returning `(focus, raise)` requests.
    pub(crate) fn into_requests(self) -> (Option<WidgetId>, Option<WidgetId>) {
        (self.focus_request, self.raise_request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_is_consumed_if_either_is() {
        use EventResult::*;
        assert_eq!(Ignored.or(Ignored), Ignored);
        assert_eq!(Ignored.or(Consumed), Consumed);
        assert_eq!(Consumed.or(Ignored), Consumed);
    }

    #[test]
    fn from_bool() {
        assert!(EventResult::from(true).is_consumed());
        assert!(!EventResult::from(false).is_consumed());
    }
}
