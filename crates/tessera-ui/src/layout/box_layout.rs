use tessera_engine::coords::Vec2;

use super::{Alignment, Layout, LayoutCtx, Orientation, container_size, place, target_size, visible_children};
use crate::tree::UiTree;
use crate::widget::WidgetId;

/// Stacks visible children along one axis.
///
/// Children are separated by `spacing` and kept `margin` away from the container
/// edges. On the perpendicular axis each child is placed according to the
/// layout's [`Alignment`].
///
/// A titled container (non-zero header height) keeps its header free: vertical
/// stacks start below it, horizontal rows are shifted down by it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxLayout {
    orientation: Orientation,
    alignment: Alignment,
    margin: f32,
    spacing: f32,
}

impl BoxLayout {
    pub fn new(orientation: Orientation, alignment: Alignment, margin: f32, spacing: f32) -> Self {
        Self { orientation, alignment, margin, spacing }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    #[inline]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
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
}

impl Default for BoxLayout {
    fn default() -> Self {
        Self::new(Orientation::Horizontal, Alignment::Center, 0.0, 0.0)
    }
}

impl Layout for BoxLayout {
    fn preferred_size(&self, tree: &UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) -> Vec2 {
        let axis = self.orientation.axis();
        let other = axis.other();
        let m = self.margin;

        let mut size = Vec2::splat(2.0 * m);
        let mut y_offset = 0.0;
        let header = tree.header_height(widget);
        if header > 0.0 {
            match self.orientation {
                Orientation::Vertical => size.y += header - m / 2.0,
                Orientation::Horizontal => y_offset = header,
            }
        }

        let mut first = true;
        for child in visible_children(tree, widget) {
            if !first {
                *size.axis_mut(axis) += self.spacing;
            }
            first = false;

            let target = target_size(tree, child, ctx);
            *size.axis_mut(axis) += target.get(axis);
            size.set(other, size.get(other).max(target.get(other) + 2.0 * m));
        }

        size.y += y_offset;
        size
    }

    fn perform_layout(&self, tree: &mut UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) {
        let axis = self.orientation.axis();
        let other = axis.other();
        let m = self.margin;

        let mut container = container_size(tree, widget);
        let mut position = m;
        let mut y_offset = 0.0;
        let header = tree.header_height(widget);
        if header > 0.0 {
            match self.orientation {
                Orientation::Vertical => position += header - m / 2.0,
                Orientation::Horizontal => {
                    y_offset = header;
                    container.y -= header;
                }
            }
        }

        let available = container.get(other);
        let mut first = true;
        for child in visible_children(tree, widget) {
            if !first {
                position += self.spacing;
            }
            first = false;

            let fixed = tree.core(child).fixed_size();
            let mut target = target_size(tree, child, ctx);

            let offset = match self.alignment {
                Alignment::Minimum => m,
                Alignment::Center => (available - target.get(other)) / 2.0,
                Alignment::Maximum => available - target.get(other) - m,
                Alignment::Fill => {
                    let fill = if fixed.get(other) != 0.0 { fixed.get(other) } else { available - 2.0 * m };
                    target.set(other, fill);
                    m
                }
            };

            let mut pos = Vec2::new(0.0, y_offset);
            *pos.axis_mut(axis) += position;
            *pos.axis_mut(other) += offset;
            position += target.get(axis);

            place(tree, child, pos, target, ctx);
        }
    }
}
