//! A single cell of the ring.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

/// Storage for one element plus the flag telling whether it is live.
///
/// The flag is set only after the element is fully written, and cleared only
/// after it has been moved out, so a thread that observes `true` with
/// `Acquire` may read the value and a thread that observes `false` may
/// overwrite the storage.
pub struct Slot<T> {
    occupied: AtomicBool,
    value: UnsafeCell<MaybeUninit<T>>,
}

impl<T> Slot<T> {
    #[inline]
    pub(crate) fn new() -> Slot<T> {
        Slot {
            occupied: AtomicBool::new(false),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        self.occupied.load(Ordering::Acquire)
    }

    /// Writes `element` and publishes it.
    ///
    /// The caller must own the slot exclusively and the slot must be vacant.
    #[inline]
    pub(crate) unsafe fn write(&self, element: T) {
        debug_assert!(!self.occupied.load(Ordering::Relaxed));
        (*self.value.get()).write(element);
        self.occupied.store(true, Ordering::Release);
    }

    /// Moves the element out and marks the slot vacant.
    ///
    /// The caller must own the slot exclusively and the slot must be occupied.
    #[inline]
    pub(crate) unsafe fn take(&self) -> T {
        debug_assert!(self.occupied.load(Ordering::Relaxed));
        let element = ptr::read((*self.value.get()).as_ptr());
        self.occupied.store(false, Ordering::Release);
        element
    }

    /// Drops the element in place if there is one.
    #[inline]
    pub(crate) fn clear(&mut self) {
        let occupied = self.occupied.get_mut();
        if *occupied {
            *occupied = false;
            unsafe {
                ptr::drop_in_place(self.value.get_mut().as_mut_ptr());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Slot;
    use std::cell::Cell;

    struct Bump<'a>(&'a Cell<i32>);

    impl<'a> Drop for Bump<'a> {
        fn drop(&mut self) {
            let n = self.0.get();
            self.0.set(n + 1);
        }
    }

    #[test]
    fn test_write_take() {
        let slot = Slot::new();
        assert!(!slot.is_occupied());
        unsafe {
            slot.write(String::from("seven"));
        }
        assert!(slot.is_occupied());
        assert_eq!(unsafe { slot.take() }, "seven");
        assert!(!slot.is_occupied());
    }

    #[test]
    fn test_clear() {
        let flag = &Cell::new(0);

        let mut slot = Slot::new();
        slot.clear();
        assert_eq!(flag.get(), 0);

        unsafe {
            slot.write(Bump(flag));
        }
        slot.clear();
        assert_eq!(flag.get(), 1);
        assert!(!slot.is_occupied());

        // vacant again, nothing left to drop
        slot.clear();
        assert_eq!(flag.get(), 1);
    }

    #[test]
    fn test_slot_never_drops_on_its_own() {
        let flag = &Cell::new(0);
        {
            let slot = Slot::new();
            unsafe {
                slot.write(Bump(flag));
            }
        }
        assert_eq!(flag.get(), 0);
    }
}
