//! One frame of input routing through the tree.
//!
//! Order within a frame:
//! 1. mouse move (entered/exited synthesised per child)
//! 2. button presses, by containment, topmost first
//! 3. drags, delivered straight to the selected widget
//! 4. button releases, selected widget first
//! 5. scroll, keys and typed text, by containment at the mouse position
//!
//! Focus and raise requests left in the [`EventCtx`] are applied at the end.

use tessera_engine::coords::Vec2;

use crate::event::{EventCtx, EventResult, MouseButton};
use crate::input::{ButtonState, Input};
use crate::tree::UiTree;
use crate::widget::{WidgetBehavior, WidgetCore, WidgetId};

impl UiTree {
    /// Routes one frame of `input`. Returns true if any hook consumed an event.
    pub fn dispatch(&mut self, input: &Input) -> bool {
        let root = self.root();
        let mut ctx = EventCtx::new(input, root);
        let pos = input.mouse_pos();
        let delta = input.mouse_delta();
        let mut handled = EventResult::Ignored;

        // A selection left behind by a removed widget would block new grabs.
        self.selection_owner(input);

        if delta != Vec2::zero() {
            handled = handled.or(self.route_move(root, &mut ctx, pos, delta));
        }

        for button in input.buttons_in(ButtonState::Pressed) {
            handled = handled.or(self.route(root, &mut ctx, pos, &mut |b, core, ctx, p| {
                let result = b.on_mouse_button_pressed(core, ctx, p, button);
                if !result.is_consumed() && button == MouseButton::Left && !core.focused() && core.children().is_empty() {
                    ctx.request_focus();
                }
                result
            }));
        }

        if delta != Vec2::zero() {
            handled = handled.or(self.dispatch_drag(&mut ctx, input, delta));
        }

        for button in input.buttons_in(ButtonState::Released) {
            let mut result = EventResult::Ignored;
            if let Some(owner) = self.selection_owner(input) {
                let local = pos - self.parent_origin(owner);
                result = self.deliver(owner, &mut ctx, |b, core, ctx| {
                    b.on_mouse_button_released(core, ctx, local, button)
                });
            }
            if !result.is_consumed() {
                result = self.route(root, &mut ctx, pos, &mut |b, core, ctx, p| {
                    b.on_mouse_button_released(core, ctx, p, button)
                });
            }
            handled = handled.or(result);
        }

        let scroll = input.scroll_delta();
        if scroll != Vec2::zero() {
            handled = handled.or(self.route(root, &mut ctx, pos, &mut |b, core, ctx, p| {
                b.on_mouse_scroll(core, ctx, p, scroll)
            }));
        }

        let modifiers = input.modifiers();
        for &key in input.keys_pressed() {
            handled = handled.or(self.route(root, &mut ctx, pos, &mut |b, core, ctx, _| {
                b.on_key_pressed(core, ctx, key, modifiers)
            }));
        }
        for &key in input.keys_released() {
            handled = handled.or(self.route(root, &mut ctx, pos, &mut |b, core, ctx, _| {
                b.on_key_released(core, ctx, key, modifiers)
            }));
        }
        for text in input.text() {
            handled = handled.or(self.route(root, &mut ctx, pos, &mut |b, core, ctx, _| {
                b.on_character_input(core, ctx, text)
            }));
        }

        let (focus, raise) = ctx.into_requests();
        if let Some(id) = raise.filter(|&id| self.contains(id)) {
            self.move_to_front(id);
        }
        if let Some(id) = focus.filter(|&id| self.contains(id)) {
            self.request_focus(id);
        }

        handled.is_consumed()
    }

    /// Containment routing: children last to first, then `id` itself.
    ///
    /// `pos` is in `id`'s parent space. The first consumer stops the walk.
    fn route<F>(&mut self, id: WidgetId, ctx: &mut EventCtx<'_>, pos: Vec2, hook: &mut F) -> EventResult
    where
        F: FnMut(&mut dyn WidgetBehavior, &mut WidgetCore, &mut EventCtx<'_>, Vec2) -> EventResult,
    {
        let local = pos - self.core(id).position();
        let children = self.core(id).children().to_vec();
        for &child in children.iter().rev() {
            let core = self.core(child);
            if !core.visible() || !core.contains(local) {
                continue;
            }
            if self.route(child, ctx, local, hook).is_consumed() {
                return EventResult::Consumed;
            }
        }

        self.deliver(id, ctx, |b, core, ctx| hook(b, core, ctx, pos))
    }

    /// Mouse move: children touched by the old or new position get the move,
    /// those crossed get entered/exited first. Results are ORed, then `id`'s
    /// own hook runs.
    fn route_move(&mut self, id: WidgetId, ctx: &mut EventCtx<'_>, pos: Vec2, delta: Vec2) -> EventResult {
        let local = pos - self.core(id).position();
        let children = self.core(id).children().to_vec();
        let mut result = EventResult::Ignored;

        for &child in children.iter().rev() {
            let core = self.core(child);
            if !core.visible() {
                continue;
            }
            let now = core.contains(local);
            let before = core.contains(local - delta);
            if now != before {
                self.notify_hover(child, ctx, now);
            }
            if now || before {
                result = result.or(self.route_move(child, ctx, local, delta));
            }
        }

        let own = self.deliver(id, ctx, |b, core, ctx| b.on_mouse_move(core, ctx, pos, delta));
        result.or(own)
    }

    fn notify_hover(&mut self, id: WidgetId, ctx: &mut EventCtx<'_>, entered: bool) {
        self.deliver(id, ctx, |b, core, ctx| {
            core.mouse_focus = entered;
            if entered {
                b.on_mouse_entered(core, ctx);
            } else {
                b.on_mouse_exited(core, ctx);
            }
            EventResult::Ignored
        });
    }

    /// Drag deltas go straight to the selected widget, once per held button.
    fn dispatch_drag(&mut self, ctx: &mut EventCtx<'_>, input: &Input, delta: Vec2) -> EventResult {
        let Some(owner) = self.selection_owner(input) else {
            return EventResult::Ignored;
        };

        let local = input.mouse_pos() - self.parent_origin(owner);
        let mut result = EventResult::Ignored;
        for button in input.buttons_in(ButtonState::Held) {
            result = result.or(self.deliver(owner, ctx, |b, core, ctx| {
                b.on_mouse_drag(core, ctx, local, delta, button)
            }));
        }
        result
    }

    /// The live selected widget. A selection that no longer resolves is dropped.
    fn selection_owner(&self, input: &Input) -> Option<WidgetId> {
        let raw = input.selection()?;
        let id = WidgetId::from_u64(raw);
        if self.contains(id) {
            Some(id)
        } else {
            log::warn!("dropping stale selection {raw:#x}");
            input.clear_selection();
            None
        }
    }

    /// Runs one hook on `id` with the context pointed at it.
    fn deliver(
        &mut self,
        id: WidgetId,
        ctx: &mut EventCtx<'_>,
        hook: impl FnOnce(&mut dyn WidgetBehavior, &mut WidgetCore, &mut EventCtx<'_>) -> EventResult,
    ) -> EventResult {
        let node = &mut self.nodes[id];
        let prev = ctx.enter(id);
        let result = hook(node.behavior.as_mut(), &mut node.core, ctx);
        ctx.enter(prev);
        result
    }
}
