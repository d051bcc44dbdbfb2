//! Fixed-size arrays.

use slot::Slot;

/// Trait for fixed size arrays usable as the backing store of an
/// `ArrayQueue`.
///
/// The array itself is never built; it only names the element type and the
/// number of slots. The queue keeps one `Slot` per array element.
pub unsafe trait Array {
    /// The array’s element type
    type Item;

    #[doc(hidden)]
    /// The slot storage matching this array's length.
    type Slots: AsRef<[Slot<Self::Item>]> + AsMut<[Slot<Self::Item>]>;

    /// Returns number of element the array can hold
    fn capacity() -> usize;

    #[doc(hidden)]
    /// Returns a fresh slot storage with every slot vacant.
    fn new_slots() -> Self::Slots;
}

unsafe impl<T, const N: usize> Array for [T; N] {
    type Item = T;
    type Slots = [Slot<T>; N];

    #[inline(always)]
    fn capacity() -> usize {
        N
    }

    #[inline]
    fn new_slots() -> Self::Slots {
        ::std::array::from_fn(|_| Slot::new())
    }
}

#[cfg(feature = "use_generic_array")]
mod generic_impl {
    use super::Array;
    use generic_array::sequence::GenericSequence;
    use generic_array::typenum::Unsigned;
    use generic_array::{ArrayLength, GenericArray};
    use slot::Slot;

    unsafe impl<T, N> Array for GenericArray<T, N>
    where
        N: ArrayLength,
    {
        type Item = T;
        type Slots = GenericArray<Slot<T>, N>;

        #[inline(always)]
        fn capacity() -> usize {
            N::to_usize()
        }

        #[inline]
        fn new_slots() -> Self::Slots {
            GenericArray::generate(|_| Slot::new())
        }
    }
}
