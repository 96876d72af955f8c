/// Per-corner radii for a rounded rectangle (logical pixels).
///
/// Order is top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    #[inline]
    pub const fn all(r: f32) -> Self {
        Self::new(r, r, r, r)
    }

    /// Rounds only the top corners (dialog headers).
    #[inline]
    pub const fn top(r: f32) -> Self {
        Self::new(r, r, 0.0, 0.0)
    }

    /// Limits every radius to `[0, max]`.
    ///
    /// Pass half of the shorter rect side so opposite corners never overlap.
    #[inline]
    pub fn clamped(self, max: f32) -> Self {
        let max = max.max(0.0);
        Self::new(
            self.top_left.clamp(0.0, max),
            self.top_right.clamp(0.0, max),
            self.bottom_right.clamp(0.0, max),
            self.bottom_left.clamp(0.0, max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_limits_and_floors() {
        let r = CornerRadii::new(-2.0, 4.0, 12.0, 6.0).clamped(5.0);
        assert_eq!(r, CornerRadii::new(0.0, 4.0, 5.0, 5.0));
    }

    #[test]
    fn top_leaves_bottom_square() {
        let r = CornerRadii::top(3.0);
        assert_eq!(r.bottom_left, 0.0);
        assert_eq!(r.bottom_right, 0.0);
        assert_eq!(r.top_left, 3.0);
    }
}
