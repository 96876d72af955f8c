use crate::coords::Vec2;

use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

/// A single gradient stop. `t` is expected in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient in the same coordinate space as the geometry it fills.
///
/// The draw stream translates `start`/`end` together with the shape, so widgets
/// can build gradients in their local space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self { start, end, stops, spread }
    }

    /// Two-stop top-to-bottom gradient between `y0` and `y1` at column `x`.
    ///
    /// Button and dialog header fills use this.
    pub fn vertical(x: f32, y0: f32, y1: f32, top: Color, bottom: Color) -> Self {
        Self::new(
            Vec2::new(x, y0),
            Vec2::new(x, y1),
            vec![ColorStop::new(0.0, top), ColorStop::new(1.0, bottom)],
            SpreadMode::Pad,
        )
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && self.start != self.end
    }

    /// Same gradient moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self { start: self.start + offset, end: self.end + offset, ..self.clone() }
    }
}
