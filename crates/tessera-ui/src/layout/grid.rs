use tessera_engine::coords::{Axis, Vec2};

use super::{Alignment, Layout, LayoutCtx, Orientation, container_size, place, target_size, visible_children};
use crate::tree::UiTree;
use crate::widget::WidgetId;

/// Wrapping grid with a fixed number of cells along the primary axis.
///
/// Visible children fill the grid in reading order: with a horizontal
/// orientation `resolution` is the column count and children fill rows left to
/// right; vertically it is the row count and children fill columns top to
/// bottom.
///
/// Every column is as wide as its widest child and every row as tall as its
/// tallest. Leftover container space is spread evenly over the tracks, the
/// integer remainder going one pixel at a time to the first tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    orientation: Orientation,
    resolution: usize,
    margin: f32,
    spacing: Vec2,
    default_alignment: [Alignment; 2],
    /// Per-track overrides, indexed by axis then track.
    alignment: [Vec<Alignment>; 2],
}

impl GridLayout {
    /// # Panics
    /// Panics if `resolution` is zero.
    pub fn new(orientation: Orientation, resolution: usize, alignment: Alignment, margin: f32, spacing: f32) -> Self {
        assert!(resolution > 0, "GridLayout: resolution must be at least 1");
        Self {
            orientation,
            resolution,
            margin,
            spacing: Vec2::splat(spacing),
            default_alignment: [alignment; 2],
            alignment: [Vec::new(), Vec::new()],
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// # Panics
    /// Panics if `resolution` is zero.
    pub fn set_resolution(&mut self, resolution: usize) {
        assert!(resolution > 0, "GridLayout: resolution must be at least 1");
        self.resolution = resolution;
    }

    #[inline]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: f32) {
        self.margin = margin;
    }

    #[inline]
    pub fn spacing(&self, axis: Axis) -> f32 {
        self.spacing.get(axis)
    }

    /// Same spacing on both axes.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = Vec2::splat(spacing);
    }

    pub fn set_axis_spacing(&mut self, axis: Axis, spacing: f32) {
        self.spacing.set(axis, spacing);
    }

    /// Alignment of the `item`-th track on `axis`: the override if there is one,
    /// otherwise the axis default.
    pub fn alignment(&self, axis: Axis, item: usize) -> Alignment {
        self.alignment[axis.index()]
            .get(item)
            .copied()
            .unwrap_or(self.default_alignment[axis.index()])
    }

    /// Default horizontal alignment inside every column.
    pub fn set_col_alignment(&mut self, alignment: Alignment) {
        self.default_alignment[Axis::X.index()] = alignment;
    }

    /// Default vertical alignment inside every row.
    pub fn set_row_alignment(&mut self, alignment: Alignment) {
        self.default_alignment[Axis::Y.index()] = alignment;
    }

    /// Per-column overrides; columns past the end use the default.
    pub fn set_col_alignments(&mut self, alignments: Vec<Alignment>) {
        self.alignment[Axis::X.index()] = alignments;
    }

    /// Per-row overrides; rows past the end use the default.
    pub fn set_row_alignments(&mut self, alignments: Vec<Alignment>) {
        self.alignment[Axis::Y.index()] = alignments;
    }

    /// Extra height reserved for a title header, if the container has one.
    fn header_extra(&self, tree: &UiTree, widget: WidgetId) -> f32 {
        let header = tree.header_height(widget);
        if header > 0.0 { header - self.margin / 2.0 } else { 0.0 }
    }

    /// Minimum track sizes: `[columns, rows]`, each the largest target size of
    /// the children in that track.
    pub fn compute_layout(&self, tree: &UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) -> [Vec<f32>; 2] {
        let axis1 = self.orientation.axis();
        let axis2 = axis1.other();
        let children = visible_children(tree, widget);

        let dim1 = self.resolution;
        let dim2 = children.len().div_ceil(dim1);

        let mut grid: [Vec<f32>; 2] = [Vec::new(), Vec::new()];
        grid[axis1.index()] = vec![0.0; dim1];
        grid[axis2.index()] = vec![0.0; dim2];

        for (k, &child) in children.iter().enumerate() {
            let (i1, i2) = (k % dim1, k / dim1);
            let target = target_size(tree, child, ctx);

            let t1 = &mut grid[axis1.index()][i1];
            *t1 = t1.max(target.get(axis1));
            let t2 = &mut grid[axis2.index()][i2];
            *t2 = t2.max(target.get(axis2));
        }
        grid
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(Orientation::Horizontal, 2, Alignment::Center, 0.0, 0.0)
    }
}

impl Layout for GridLayout {
    fn preferred_size(&self, tree: &UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) -> Vec2 {
        let grid = self.compute_layout(tree, widget, ctx);

        let mut size = Vec2::zero();
        for axis in Axis::BOTH {
            let tracks = &grid[axis.index()];
            let gaps = tracks.len().saturating_sub(1) as f32;
            size.set(axis, 2.0 * self.margin + tracks.iter().sum::<f32>() + gaps * self.spacing(axis));
        }
        size.y += self.header_extra(tree, widget);
        size
    }

    fn perform_layout(&self, tree: &mut UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) {
        let container = container_size(tree, widget);
        let mut grid = self.compute_layout(tree, widget, ctx);
        let extra = Vec2::new(0.0, self.header_extra(tree, widget));

        // Stretch tracks to the container.
        for axis in Axis::BOTH {
            let tracks = &mut grid[axis.index()];
            let n = tracks.len();
            if n == 0 {
                continue;
            }

            let used = 2.0 * self.margin
                + extra.get(axis)
                + tracks.iter().sum::<f32>()
                + (n - 1) as f32 * self.spacing(axis);
            let gap = (container.get(axis) - used).floor();
            if gap <= 0.0 {
                continue;
            }

            let g = (gap / n as f32).floor();
            let rest = (gap - g * n as f32) as usize;
            for (i, track) in tracks.iter_mut().enumerate() {
                *track += g;
                if i < rest {
                    *track += 1.0;
                }
            }
        }

        let axis1 = self.orientation.axis();
        let axis2 = axis1.other();
        let dim1 = grid[axis1.index()].len();
        let dim2 = grid[axis2.index()].len();
        let children = visible_children(tree, widget);

        let start = extra + Vec2::splat(self.margin);
        let mut pos2 = start.get(axis2);
        for i2 in 0..dim2 {
            let mut pos1 = start.get(axis1);
            for i1 in 0..dim1 {
                let Some(&child) = children.get(i2 * dim1 + i1) else {
                    return;
                };

                let fixed = tree.core(child).fixed_size();
                let mut target = target_size(tree, child, ctx);
                let mut item_pos = Vec2::zero();
                item_pos.set(axis1, pos1);
                item_pos.set(axis2, pos2);

                for (axis, item) in [(axis1, i1), (axis2, i2)] {
                    let cell = grid[axis.index()][item];
                    match self.alignment(axis, item) {
                        Alignment::Minimum => {}
                        Alignment::Center => *item_pos.axis_mut(axis) += (cell - target.get(axis)) / 2.0,
                        Alignment::Maximum => *item_pos.axis_mut(axis) += cell - target.get(axis),
                        Alignment::Fill => {
                            let fill = if fixed.get(axis) != 0.0 { fixed.get(axis) } else { cell };
                            target.set(axis, fill);
                        }
                    }
                }

                place(tree, child, item_pos, target, ctx);
                pos1 += grid[axis1.index()][i1] + self.spacing(axis1);
            }
            pos2 += grid[axis2.index()][i2] + self.spacing(axis2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::testing::{Titled, geometry, leaf};
    use crate::widgets::Panel;
    use tessera_engine::text::FontSystem;

    /// Two columns; children sized (10,10), (20,5), (5,30).
    fn three_in_two_columns(tree: &mut UiTree, layout: GridLayout) -> (WidgetId, [WidgetId; 3]) {
        let root = tree.root();
        let c = tree.insert(Some(root), Panel::new());
        tree.set_layout(c, layout);
        let kids = [leaf(tree, c, 10.0, 10.0), leaf(tree, c, 20.0, 5.0), leaf(tree, c, 5.0, 30.0)];
        (c, kids)
    }

    #[test]
    fn tracks_take_largest_child() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts);
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let layout = GridLayout::new(Orientation::Horizontal, 2, Alignment::Minimum, 0.0, 2.0);
        let (c, _) = three_in_two_columns(&mut tree, layout.clone());

        let [cols, rows] = layout.compute_layout(&tree, c, &ctx);
        assert_eq!(cols, vec![10.0, 20.0]);
        assert_eq!(rows, vec![10.0, 30.0]);
        assert_eq!(tree.preferred_size(c, &ctx), Vec2::new(32.0, 42.0));
    }

    #[test]
    fn vertical_orientation_fills_columns_first() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts);
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let layout = GridLayout::new(Orientation::Vertical, 2, Alignment::Minimum, 0.0, 0.0);
        let (c, kids) = three_in_two_columns(&mut tree, layout.clone());

        let [cols, rows] = layout.compute_layout(&tree, c, &ctx);
        assert_eq!(cols, vec![20.0, 5.0]);
        assert_eq!(rows, vec![30.0, 5.0]);

        tree.core_mut(c).set_size(Vec2::new(25.0, 35.0));
        tree.perform_layout(c, &ctx);
        assert_eq!(tree.core(kids[1]).position(), Vec2::new(0.0, 30.0));
        assert_eq!(tree.core(kids[2]).position(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn leftover_space_is_split_with_remainder_first() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts);
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let layout = GridLayout::new(Orientation::Horizontal, 2, Alignment::Fill, 0.0, 2.0);
        let (c, kids) = three_in_two_columns(&mut tree, layout);

        // Width 35 leaves a gap of 3 over 2 columns: 1 each plus 1 for the first.
        tree.core_mut(c).set_size(Vec2::new(35.0, 42.0));
        tree.perform_layout(c, &ctx);
        assert_eq!(geometry(&tree, kids[0]), (Vec2::new(0.0, 0.0), Vec2::new(12.0, 10.0)));
        assert_eq!(geometry(&tree, kids[1]), (Vec2::new(14.0, 0.0), Vec2::new(21.0, 10.0)));
        assert_eq!(geometry(&tree, kids[2]), (Vec2::new(0.0, 12.0), Vec2::new(12.0, 30.0)));
    }

    #[test]
    fn center_alignment_within_cells() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts);
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let layout = GridLayout::new(Orientation::Horizontal, 2, Alignment::Center, 0.0, 2.0);
        let (c, kids) = three_in_two_columns(&mut tree, layout);

        // Width 40 leaves 8: columns become 14 and 24.
        tree.core_mut(c).set_size(Vec2::new(40.0, 42.0));
        tree.perform_layout(c, &ctx);
        assert_eq!(tree.core(kids[0]).position(), Vec2::new(2.0, 0.0));
        assert_eq!(tree.core(kids[1]).position(), Vec2::new(18.0, 2.5));
    }

    #[test]
    fn per_track_overrides_fall_back_to_default() {
        let mut layout = GridLayout::new(Orientation::Horizontal, 3, Alignment::Center, 0.0, 0.0);
        layout.set_col_alignments(vec![Alignment::Maximum, Alignment::Fill]);
        layout.set_row_alignment(Alignment::Minimum);

        assert_eq!(layout.alignment(Axis::X, 0), Alignment::Maximum);
        assert_eq!(layout.alignment(Axis::X, 1), Alignment::Fill);
        assert_eq!(layout.alignment(Axis::X, 2), Alignment::Center);
        assert_eq!(layout.alignment(Axis::Y, 7), Alignment::Minimum);
    }

    #[test]
    fn titled_container_reserves_header() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts);
        let mut tree = UiTree::new(Vec2::new(800.0, 600.0));
        let root = tree.root();
        let c = tree.insert(Some(root), Titled(30.0));
        tree.set_layout(c, GridLayout::new(Orientation::Horizontal, 1, Alignment::Minimum, 4.0, 0.0));
        let a = leaf(&mut tree, c, 10.0, 10.0);

        assert_eq!(tree.preferred_size(c, &ctx), Vec2::new(18.0, 46.0));
        tree.core_mut(c).set_size(Vec2::new(18.0, 46.0));
        tree.perform_layout(c, &ctx);
        assert_eq!(tree.core(a).position(), Vec2::new(4.0, 32.0));
    }

    #[test]
    #[should_panic(expected = "resolution must be at least 1")]
    fn zero_resolution_panics() {
        GridLayout::new(Orientation::Horizontal, 0, Alignment::Center, 0.0, 0.0);
    }
}
