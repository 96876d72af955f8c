use slotmap::SecondaryMap;
use tessera_engine::coords::{Axis, Vec2};

use super::{Alignment, Layout, LayoutCtx, container_size, place, target_size, visible_children};
use crate::tree::UiTree;
use crate::widget::WidgetId;

// ── Anchor ────────────────────────────────────────────────────────────────

/// Placement of one widget in an [`AdvancedGridLayout`]: its first cell, how
/// many cells it spans and how it sits inside them. Indexed `[x, y]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Anchor {
    pub pos: [usize; 2],
    pub size: [usize; 2],
    pub align: [Alignment; 2],
}

impl Anchor {
    /// Single cell at column `x`, row `y`, filling it.
    pub fn new(x: usize, y: usize) -> Self {
        Self::span(x, y, 1, 1)
    }

    /// `w` columns by `h` rows starting at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if `w` or `h` is zero.
    pub fn span(x: usize, y: usize, w: usize, h: usize) -> Self {
        assert!(w > 0 && h > 0, "Anchor: a widget must span at least one cell");
        Self {
            pos: [x, y],
            size: [w, h],
            align: [Alignment::Fill; 2],
        }
    }

    pub fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.align = [horizontal, vertical];
        self
    }
}

// ── AdvancedGridLayout ────────────────────────────────────────────────────

/// Grid with explicit column and row tracks.
///
/// Each track has a base size (zero = sized to its contents) and a stretch
/// factor. Every visible child must be registered with an [`Anchor`]; a widget
/// can span several tracks, in which case the extra space it needs is shared
/// between the spanned tracks in proportion to their stretch. Space left over
/// in the container is handed out the same way.
///
/// Anchors are keyed by [`WidgetId`], so register them once the children exist
/// and before the layout is attached.
#[derive(Debug, Clone, Default)]
pub struct AdvancedGridLayout {
    cols: Vec<f32>,
    rows: Vec<f32>,
    col_stretch: Vec<f32>,
    row_stretch: Vec<f32>,
    anchors: SecondaryMap<WidgetId, Anchor>,
    margin: f32,
}

impl AdvancedGridLayout {
    /// Tracks start with zero stretch.
    pub fn new(cols: Vec<f32>, rows: Vec<f32>, margin: f32) -> Self {
        Self {
            col_stretch: vec![0.0; cols.len()],
            row_stretch: vec![0.0; rows.len()],
            cols,
            rows,
            anchors: SecondaryMap::new(),
            margin,
        }
    }

    #[inline]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: f32) {
        self.margin = margin;
    }

    #[inline]
    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn append_row(&mut self, size: f32, stretch: f32) {
        self.rows.push(size);
        self.row_stretch.push(stretch);
    }

    pub fn append_col(&mut self, size: f32, stretch: f32) {
        self.cols.push(size);
        self.col_stretch.push(stretch);
    }

    /// # Panics
    /// Panics if `index` is not a row.
    pub fn set_row_stretch(&mut self, index: usize, stretch: f32) {
        self.row_stretch[index] = stretch;
    }

    /// # Panics
    /// Panics if `index` is not a column.
    pub fn set_col_stretch(&mut self, index: usize, stretch: f32) {
        self.col_stretch[index] = stretch;
    }

    pub fn set_anchor(&mut self, widget: WidgetId, anchor: Anchor) {
        self.anchors.insert(widget, anchor);
    }

    pub fn with_anchor(mut self, widget: WidgetId, anchor: Anchor) -> Self {
        self.set_anchor(widget, anchor);
        self
    }

    /// # Panics
    /// Panics if `widget` was never registered.
    pub fn anchor(&self, widget: WidgetId) -> Anchor {
        match self.anchors.get(widget) {
            Some(anchor) => *anchor,
            None => panic!("AdvancedGridLayout: widget {widget:?} was not registered with the grid layout"),
        }
    }

    fn tracks(&self, axis: Axis) -> (&[f32], &[f32]) {
        match axis {
            Axis::X => (&self.cols, &self.col_stretch),
            Axis::Y => (&self.rows, &self.row_stretch),
        }
    }

    fn header_extra(&self, tree: &UiTree, widget: WidgetId) -> f32 {
        let header = tree.header_height(widget);
        if header > 0.0 { header - self.margin / 2.0 } else { 0.0 }
    }

    /// Final track sizes `[columns, rows]` for the children of `widget`.
    ///
    /// Per axis, single-cell widgets first grow the auto-sized tracks they sit
    /// in; spanning widgets then grow their tracks by stretch. Finally any room
    /// left in the container is spread by stretch.
    ///
    /// # Panics
    /// Panics if a child has no anchor, an anchor reaches past the last track,
    /// or a spanning widget needs more room but its tracks have no stretch.
    pub fn compute_layout(&self, tree: &UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) -> [Vec<f32>; 2] {
        let mut container = container_size(tree, widget) - Vec2::splat(2.0 * self.margin);
        container.y -= self.header_extra(tree, widget);

        let items: Vec<(Anchor, Vec2)> = visible_children(tree, widget)
            .into_iter()
            .map(|child| (self.anchor(child), target_size(tree, child, ctx)))
            .collect();

        let mut grid: [Vec<f32>; 2] = [Vec::new(), Vec::new()];
        for axis in Axis::BOTH {
            let (sizes, stretch) = self.tracks(axis);
            let mut tracks = sizes.to_vec();

            for single_cell_phase in [true, false] {
                for (anchor, target) in &items {
                    let pos = anchor.pos[axis.index()];
                    let span = anchor.size[axis.index()];
                    if (span == 1) != single_cell_phase {
                        continue;
                    }
                    assert!(
                        pos + span <= tracks.len(),
                        "AdvancedGridLayout: widget is out of bounds ({axis:?} cells {pos}..{} of {})",
                        pos + span,
                        tracks.len()
                    );

                    let target = target.get(axis);
                    let mut current = 0.0;
                    let mut total_stretch = 0.0;
                    for i in pos..pos + span {
                        if sizes[i] == 0.0 && span == 1 {
                            tracks[i] = tracks[i].max(target);
                        }
                        current += tracks[i];
                        total_stretch += stretch[i];
                    }
                    if target <= current {
                        continue;
                    }

                    assert!(total_stretch != 0.0, "AdvancedGridLayout: no space to place widget");
                    let amount = (target - current) / total_stretch;
                    for i in pos..pos + span {
                        tracks[i] += (amount * stretch[i]).round();
                    }
                }
            }

            let current: f32 = tracks.iter().sum();
            let total_stretch: f32 = stretch.iter().sum();
            let available = container.get(axis);
            if current < available && total_stretch != 0.0 {
                let amount = (available - current) / total_stretch;
                for (track, s) in tracks.iter_mut().zip(stretch) {
                    *track += (amount * s).round();
                }
            }

            grid[axis.index()] = tracks;
        }
        grid
    }
}

impl Layout for AdvancedGridLayout {
    fn preferred_size(&self, tree: &UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) -> Vec2 {
        let [cols, rows] = self.compute_layout(tree, widget, ctx);
        let size = Vec2::new(cols.iter().sum(), rows.iter().sum());
        size + Vec2::new(2.0 * self.margin, 2.0 * self.margin + self.header_extra(tree, widget))
    }

    fn perform_layout(&self, tree: &mut UiTree, widget: WidgetId, ctx: &LayoutCtx<'_>) {
        let mut grid = self.compute_layout(tree, widget, ctx);

        // Track sizes to cumulative offsets, starting past the margin (and header).
        let header = tree.header_height(widget);
        let y_start = if header > 0.0 { header + self.margin / 2.0 } else { self.margin };
        grid[Axis::X.index()].insert(0, self.margin);
        grid[Axis::Y.index()].insert(0, y_start);
        for offsets in &mut grid {
            for i in 1..offsets.len() {
                offsets[i] += offsets[i - 1];
            }
        }

        for child in visible_children(tree, widget) {
            let anchor = self.anchor(child);
            let fixed = tree.core(child).fixed_size();
            let mut target = target_size(tree, child, ctx);
            let mut pos = Vec2::zero();

            for axis in Axis::BOTH {
                let offsets = &grid[axis.index()];
                let first = anchor.pos[axis.index()];
                let mut item = offsets[first];
                let cell = offsets[first + anchor.size[axis.index()]] - item;

                match anchor.align[axis.index()] {
                    Alignment::Minimum => {}
                    Alignment::Center => item += (cell - target.get(axis)) / 2.0,
                    Alignment::Maximum => item += cell - target.get(axis),
                    Alignment::Fill => {
                        let fill = if fixed.get(axis) != 0.0 { fixed.get(axis) } else { cell };
                        target.set(axis, fill);
                    }
                }
                pos.set(axis, item);
            }

            place(tree, child, pos, target, ctx);
        }
    }
}
