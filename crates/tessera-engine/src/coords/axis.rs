/// One of the two layout axes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both axes, X first.
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    /// The perpendicular axis.
    #[inline]
    pub const fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// `0` for X, `1` for Y. Handy for per-axis arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}
