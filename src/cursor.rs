//! The read/write cursor pair and its packing into one atomic word.
//!
//! Each side of the cursor is a *stamp*: the slot index in the low bits and a
//! lap counter above it. A stamp takes half a `usize`, so both sides fit in a
//! single `AtomicUsize` and are always loaded and swapped together.

const HALF_BITS: u32 = usize::BITS / 2;
const STAMP_MASK: usize = (1 << HALF_BITS) - 1;

/// Largest number of slots a ring may have; keeps at least four lap bits, so
/// a stale cursor snapshot is only mistaken for a fresh one after 16 laps.
pub const MAX_SLOTS: usize = 1 << (HALF_BITS - 4);

/// A consistent snapshot of both stamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub read: usize,
    pub write: usize,
}

impl Cursor {
    #[inline]
    pub fn pack(self) -> usize {
        debug_assert!(self.read <= STAMP_MASK);
        debug_assert!(self.write <= STAMP_MASK);
        (self.read << HALF_BITS) | self.write
    }

    #[inline]
    pub fn unpack(word: usize) -> Cursor {
        Cursor {
            read: word >> HALF_BITS,
            write: word & STAMP_MASK,
        }
    }
}

/// Stamp arithmetic for a ring of `len` slots.
#[derive(Clone, Copy, Debug)]
pub struct Laps {
    len: usize,
    one_lap: usize,
}

impl Laps {
    pub fn new(len: usize) -> Laps {
        assert!(len > 0, "backing array must have at least one slot");
        assert!(len <= MAX_SLOTS,
                "backing array of {} slots exceeds the limit of {}",
                len,
                MAX_SLOTS);
        Laps {
            len,
            one_lap: len.next_power_of_two(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn index(&self, stamp: usize) -> usize {
        stamp & (self.one_lap - 1)
    }

    /// The stamp one slot past `stamp`, wrapping to index 0 of the next lap.
    #[inline]
    pub fn next(&self, stamp: usize) -> usize {
        if self.index(stamp) + 1 < self.len {
            stamp + 1
        } else {
            (stamp & !(self.one_lap - 1)).wrapping_add(self.one_lap) & STAMP_MASK
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let cursor = Cursor { read: 3, write: 17 };
        assert_eq!(Cursor::unpack(cursor.pack()), cursor);

        let cursor = Cursor { read: STAMP_MASK, write: 0 };
        assert_eq!(Cursor::unpack(cursor.pack()), cursor);

        let cursor = Cursor { read: 0, write: STAMP_MASK };
        assert_eq!(Cursor::unpack(cursor.pack()), cursor);
        assert_eq!(Cursor::unpack(0), Cursor { read: 0, write: 0 });
    }

    #[test]
    fn test_next_within_lap() {
        let laps = Laps::new(5);
        assert_eq!(laps.next(0), 1);
        assert_eq!(laps.next(3), 4);
        assert_eq!(laps.index(4), 4);
    }

    #[test]
    fn test_next_wraps_to_new_lap() {
        // 5 slots round up to a lap of 8
        let laps = Laps::new(5);
        let wrapped = laps.next(4);
        assert_eq!(wrapped, 8);
        assert_eq!(laps.index(wrapped), 0);
        assert_eq!(laps.next(8 + 4), 16);
    }

    #[test]
    fn test_single_slot() {
        let laps = Laps::new(1);
        assert_eq!(laps.index(0), 0);
        assert_eq!(laps.next(0), 1);
        assert_eq!(laps.index(1), 0);
    }

    #[test]
    fn test_lap_counter_wraps_in_half_word() {
        let laps = Laps::new(4);
        let last = STAMP_MASK & !3;
        assert_eq!(laps.index(last + 3), 3);
        assert_eq!(laps.next(last + 3), 0);
    }

    #[test]
    fn test_index_visits_every_slot() {
        let laps = Laps::new(7);
        let mut stamp = 0;
        for round in 0..3 {
            for i in 0..7 {
                assert_eq!(laps.index(stamp), i, "round {}", round);
                stamp = laps.next(stamp);
            }
        }
    }

    #[test]
    fn test_largest_ring_counts_sixteen_laps() {
        let laps = Laps::new(MAX_SLOTS);
        let last = MAX_SLOTS - 1;
        for lap in 0..15 {
            let wrapped = laps.next(lap * MAX_SLOTS + last);
            assert_eq!(wrapped, (lap + 1) * MAX_SLOTS);
            assert_eq!(laps.index(wrapped), 0);
        }
        assert_eq!(laps.next(15 * MAX_SLOTS + last), 0);
    }

    #[test]
    #[should_panic]
    fn test_too_many_slots() {
        Laps::new(MAX_SLOTS + 1);
    }

    #[test]
    #[should_panic]
    fn test_zero_slots() {
        Laps::new(0);
    }
}
