/// Stacking layer of a draw item. Higher layers paint over lower ones.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(layer: i32) -> Self {
        Self(layer)
    }
}

/// Paint order of a draw item: by layer, then by submission order within a layer.
///
/// Field order matters: the derived `Ord` compares `z` first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_beats_submission_order() {
        let early_top = SortKey::new(ZIndex::new(2), 0);
        let late_bottom = SortKey::new(ZIndex::new(1), 9);
        assert!(late_bottom < early_top);
        assert!(SortKey::new(ZIndex::new(1), 3) < SortKey::new(ZIndex::new(1), 4));
    }
}
