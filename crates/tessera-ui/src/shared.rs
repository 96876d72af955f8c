//! Shared ownership for objects referenced by many widgets.
//!
//! Themes and layouts are attached to several widgets at once. [`Shared`] keeps
//! them alive until the last holder lets go and then drops them exactly once.
//!
//! The count is not atomic. `Shared` is neither `Send` nor `Sync`, so the tree it
//! lives in stays on the thread that built it.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Reference-counted handle with identity semantics.
///
/// - `new` starts the count at 1 (the creator is the first owner).
/// - `clone` adds an owner, dropping one removes it.
/// - Moving a handle leaves the count alone.
/// - Assigning over a handle releases the old referent and keeps the new one.
/// - `==` compares addresses, never values.
///
/// There is no null handle: an unset slot is `Option<Shared<T>>`, so a deref
/// always reaches a live value.
pub struct Shared<T: ?Sized>(Rc<T>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(value))
    }
}

impl<T: ?Sized> Shared<T> {
    /// Wraps an existing `Rc` without changing its count.
    #[inline]
    pub fn from_rc(rc: Rc<T>) -> Self {
        Self(rc)
    }

    /// Unwraps into the underlying `Rc` without changing the count.
    #[inline]
    pub fn into_rc(this: Self) -> Rc<T> {
        this.0
    }

    /// Number of live handles to the referent, including this one.
    #[inline]
    pub fn ref_count(this: &Self) -> usize {
        Rc::strong_count(&this.0)
    }

    /// True if both handles point at the same object.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&a.0), Rc::as_ptr(&b.0))
    }

    /// Mutable access, only while this is the sole handle.
    #[inline]
    pub fn get_mut(this: &mut Self) -> Option<&mut T> {
        Rc::get_mut(&mut this.0)
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Shared<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> PartialEq for Shared<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Shared::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Eq for Shared<T> {}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ?Sized> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("ptr", &Rc::as_ptr(&self.0).cast::<()>())
            .field("refs", &Shared::ref_count(self))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts how many times it has been dropped.
    struct Tracked<'a> {
        drops: &'a Cell<usize>,
        value: i32,
    }

    impl Drop for Tracked<'_> {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn count_tracks_live_handles() {
        let drops = Cell::new(0);
        let a = Shared::new(Tracked { drops: &drops, value: 1 });
        assert_eq!(Shared::ref_count(&a), 1);

        let b = a.clone();
        let c = b.clone();
        assert_eq!(Shared::ref_count(&a), 3);

        drop(b);
        assert_eq!(Shared::ref_count(&a), 2);

        // Moving does not touch the count.
        let moved = c;
        assert_eq!(Shared::ref_count(&moved), 2);

        drop(moved);
        assert_eq!(Shared::ref_count(&a), 1);
        assert_eq!(drops.get(), 0);

        drop(a);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn reassignment_releases_previous_referent() {
        let drops = Cell::new(0);
        let mut slot = Shared::new(Tracked { drops: &drops, value: 1 });
        let other = Shared::new(Tracked { drops: &drops, value: 2 });
        assert_eq!(slot.value, 1);

        slot = other.clone();
        assert_eq!(drops.get(), 1);
        assert_eq!(slot.value, 2);
        assert_eq!(Shared::ref_count(&other), 2);

        drop(slot);
        drop(other);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn interleaved_owners_drop_exactly_once() {
        let drops = Cell::new(0);
        let root = Shared::new(Tracked { drops: &drops, value: 7 });
        let mut owners: Vec<Shared<Tracked<'_>>> = Vec::new();

        for step in 0..32 {
            if step % 3 == 2 {
                owners.pop();
            } else {
                owners.push(root.clone());
            }
            assert_eq!(Shared::ref_count(&root), 1 + owners.len());
        }

        owners.clear();
        drop(root);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn equality_is_identity() {
        let a = Shared::new(5);
        let b = Shared::new(5);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn get_mut_requires_unique_owner() {
        let mut a = Shared::new(1);
        *Shared::get_mut(&mut a).unwrap() = 2;

        let b = a.clone();
        assert!(Shared::get_mut(&mut a).is_none());
        drop(b);
        assert_eq!(*a, 2);
        assert!(Shared::get_mut(&mut a).is_some());
    }
}
