use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// A widget's bounds are `Rect::from_origin_size(position, size)` in its parent's space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::from_origin_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Bottom-right corner.
    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// True when either side is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open: the top and left edges are inside, the bottom and right are not.
    /// An empty rect contains nothing.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    #[inline]
    pub fn translate(self, offset: Vec2) -> Rect {
        Rect::from_origin_size(self.origin + offset, self.size)
    }

    /// Grows the rect by `amount` on every side (shrinks for negative amounts).
    #[inline]
    pub fn expand(self, amount: f32) -> Rect {
        Rect::from_origin_size(self.origin - Vec2::splat(amount), self.size + Vec2::splat(2.0 * amount))
    }

    /// Overlap of two rects, `None` when they only touch or are apart.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let lo = self.origin.max(other.origin);
        let hi = self.max().min(other.max());
        let size = hi - lo;
        (size.x > 0.0 && size.y > 0.0).then(|| Rect::from_origin_size(lo, size))
    }
}
