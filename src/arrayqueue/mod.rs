use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

use array::Array;
use cursor::{Cursor, Laps};
use error::PushError;
use slot::Slot;
use utils::count;

mod trait_impls;

/// `ArrayQueue` is a fixed capacity ring buffer shared by any number of
/// producer and consumer threads.
///
/// It can be stored directly on the stack if needed; every slot lives inline
/// in the queue value.
///
/// Both [`try_push`] and [`try_pop`] take `&self`, never block and never
/// retry: each performs one compare-and-swap on the cursor and gives up if it
/// loses. A refusal means "try again later", whether the queue was full
/// (or empty) or another thread got there first.
///
/// # Capacity
///
/// Note that the `capacity()` is always `backed_array.len() - 1`.
/// [Read more]
///
/// [`try_push`]: #method.try_push
/// [`try_pop`]: #method.try_pop
/// [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
pub struct ArrayQueue<A: Array> {
    cursor: CachePadded<AtomicUsize>,
    laps: Laps,
    slots: A::Slots,
}

impl<A: Array> ArrayQueue<A> {
    /// Creates an empty `ArrayQueue`.
    ///
    /// # Panics
    ///
    /// Panics if the backing array has no slots, or more than
    /// `2^(usize::BITS / 2 - 4)` slots (`2^28` on 64-bit targets, `2^12` on
    /// 32-bit targets).
    ///
    /// # Examples
    ///
    /// ```
    /// use arrayqueue::ArrayQueue;
    ///
    /// let queue: ArrayQueue<[usize; 3]> = ArrayQueue::new();
    /// assert_eq!(queue.capacity(), 2);
    /// ```
    pub fn new() -> ArrayQueue<A> {
        ArrayQueue {
            cursor: CachePadded::new(AtomicUsize::new(Cursor { read: 0, write: 0 }.pack())),
            laps: Laps::new(A::capacity()),
            slots: A::new_slots(),
        }
    }

    /// Return the capacity of the `ArrayQueue`.
    ///
    /// # Capacity
    ///
    /// Note that the `capacity()` is always `backed_array.len() - 1`.
    /// [Read more]
    ///
    /// # Examples
    ///
    /// ```
    /// use arrayqueue::ArrayQueue;
    ///
    /// let queue: ArrayQueue<[usize; 4]> = ArrayQueue::new();
    /// assert_eq!(queue.capacity(), 3);
    /// ```
    ///
    /// [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
    #[inline]
    pub fn capacity(&self) -> usize {
        self.laps.len() - 1
    }

    /// Returns the number of elements in the `ArrayQueue`.
    ///
    /// Computed from a single snapshot of the cursor; with other threads
    /// active the value may be stale by the time it is returned. Slots that
    /// are reserved but still being written or read count as held.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrayqueue::ArrayQueue;
    ///
    /// let queue: ArrayQueue<[_; 4]> = ArrayQueue::new();
    /// queue.try_push(1).unwrap();
    /// queue.try_push(2).unwrap();
    /// assert_eq!(queue.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        let current = self.load();
        count(self.laps.index(current.read),
              self.laps.index(current.write),
              self.laps.len())
    }

    /// Returns true if the buffer contains no elements
    ///
    /// # Examples
    ///
    /// ```
    /// use arrayqueue::ArrayQueue;
    ///
    /// let queue: ArrayQueue<[_; 4]> = ArrayQueue::new();
    /// assert!(queue.is_empty());
    /// queue.try_push(1).unwrap();
    /// assert!(!queue.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        let current = self.load();
        self.laps.index(current.read) == self.laps.index(current.write)
    }

    /// Returns true if the buffer is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrayqueue::ArrayQueue;
    ///
    /// let queue: ArrayQueue<[_; 3]> = ArrayQueue::new();
    /// queue.try_push(1).unwrap();
    /// assert!(!queue.is_full());
    /// queue.try_push(2).unwrap();
    /// assert!(queue.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        let current = self.load();
        self.laps.index(self.laps.next(current.write)) == self.laps.index(current.read)
    }

    /// Tries to append an element to the back of the queue.
    ///
    /// Returns `Err` carrying the element back if the queue was full, or if
    /// another producer reserved the slot first. The push is not retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrayqueue::ArrayQueue;
    ///
    /// let queue: ArrayQueue<[_; 3]> = ArrayQueue::new();
    ///
    /// assert!(queue.try_push(1).is_ok());
    /// assert!(queue.try_push(2).is_ok());
    ///
    /// let overflow = queue.try_push(3);
    /// assert_eq!(overflow.unwrap_err().element, 3);
    /// ```
    pub fn try_push(&self, element: A::Item) -> Result<(), PushError<A::Item>> {
        let (current, next) = match self.reserve_write() {
            Some(pair) => pair,
            None => return Err(PushError::new(element)),
        };
        if !self.advance(current, next) {
            return Err(PushError::new(element));
        }
        unsafe {
            self.slot(current.write).write(element);
        }
        Ok(())
    }

    /// Tries to append an element built by `f` to the back of the queue.
    ///
    /// `f` is only called when the queue has room at the moment of the call,
    /// and it runs before the slot is reserved: if `f` panics the queue is left
    /// untouched. If another producer reserves the slot while `f` runs, the
    /// built element is dropped and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrayqueue::ArrayQueue;
    ///
    /// let queue: ArrayQueue<[Vec<i32>; 2]> = ArrayQueue::new();
    ///
    /// assert!(queue.try_push_with(|| vec![1, 2, 3]));
    /// assert!(!queue.try_push_with(|| unreachable!()));
    /// assert_eq!(queue.try_pop(), Some(vec![1, 2, 3]));
    /// ```
    pub fn try_push_with<F>(&self, f: F) -> bool
        where F: FnOnce() -> A::Item
    {
        let (current, next) = match self.reserve_write() {
            Some(pair) => pair,
            None => return false,
        };
        let element = f();
        if !self.advance(current, next) {
            return false;
        }
        unsafe {
            self.slot(current.write).write(element);
        }
        true
    }

    /// Tries to remove the first element from the queue.
    ///
    /// Returns `None` if the queue was empty, if the front element is still
    /// being written by its producer, or if another consumer took it first.
    /// The pop is not retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrayqueue::ArrayQueue;
    ///
    /// let queue: ArrayQueue<[_; 3]> = ArrayQueue::new();
    /// assert_eq!(queue.try_pop(), None);
    ///
    /// queue.try_push(1).unwrap();
    /// queue.try_push(2).unwrap();
    ///
    /// assert_eq!(queue.try_pop(), Some(1));
    /// assert_eq!(queue.try_pop(), Some(2));
    /// ```
    pub fn try_pop(&self) -> Option<A::Item> {
        let current = self.load();
        if self.laps.index(current.read) == self.laps.index(current.write) {
            return None;
        }
        let slot = self.slot(current.read);
        // reserved by a producer that has not published yet
        if !slot.is_occupied() {
            return None;
        }
        let next = Cursor {
            read: self.laps.next(current.read),
            write: current.write,
        };
        if !self.advance(current, next) {
            return None;
        }
        unsafe { Some(slot.take()) }
    }
}

impl<A: Array> ArrayQueue<A> {
    #[inline]
    fn load(&self) -> Cursor {
        Cursor::unpack(self.cursor.load(Ordering::Acquire))
    }

    /// Moves the cursor from `current` to `next` if no other thread moved it
    /// since `current` was loaded.
    #[inline]
    fn advance(&self, current: Cursor, next: Cursor) -> bool {
        self.cursor
            .compare_exchange(current.pack(),
                              next.pack(),
                              Ordering::AcqRel,
                              Ordering::Acquire)
            .is_ok()
    }

    #[inline]
    fn slot(&self, stamp: usize) -> &Slot<A::Item> {
        &self.slots.as_ref()[self.laps.index(stamp)]
    }

    /// Snapshot of the cursor and the cursor a producer would swap in, or
    /// `None` if there is no room.
    ///
    /// A slot is only handed out once the consumer from the previous lap has
    /// finished moving its element out.
    #[inline]
    fn reserve_write(&self) -> Option<(Cursor, Cursor)> {
        let current = self.load();
        let next_write = self.laps.next(current.write);
        if self.laps.index(next_write) == self.laps.index(current.read) {
            return None;
        }
        if self.slot(current.write).is_occupied() {
            return None;
        }
        Some((current,
              Cursor {
                  read: current.read,
                  write: next_write,
              }))
    }

    /// Drops every element between the read and write cursors.
    ///
    /// Exclusive access guarantees no operation is in flight.
    fn clear(&mut self) {
        let laps = self.laps;
        let current = Cursor::unpack(*self.cursor.get_mut());
        let slots = self.slots.as_mut();
        let mut read = current.read;
        while laps.index(read) != laps.index(current.write) {
            slots[laps.index(read)].clear();
            read = laps.next(read);
        }
        *self.cursor.get_mut() = Cursor {
            read: current.write,
            write: current.write,
        }
        .pack();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_refused_when_overtaken() {
        let queue: ArrayQueue<[i32; 3]> = ArrayQueue::new();

        // another producer takes the slot while the element is being built
        assert!(!queue.try_push_with(|| {
            queue.try_push(9).unwrap();
            8
        }));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.try_pop(), Some(9));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn pop_waits_for_publish() {
        let queue: ArrayQueue<[i32; 3]> = ArrayQueue::new();

        let current = queue.load();
        let next = Cursor {
            read: current.read,
            write: queue.laps.next(current.write),
        };
        assert!(queue.advance(current, next));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.try_pop(), None);

        unsafe {
            queue.slot(current.write).write(5);
        }
        assert_eq!(queue.try_pop(), Some(5));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn push_waits_for_slow_consumer() {
        let queue: ArrayQueue<[i32; 3]> = ArrayQueue::new();
        queue.try_push(1).unwrap();
        queue.try_push(2).unwrap();

        // a consumer reserves the front slot but has not moved 1 out yet
        let current = queue.load();
        let next = Cursor {
            read: queue.laps.next(current.read),
            write: current.write,
        };
        assert!(queue.advance(current, next));

        queue.try_push(3).unwrap();
        assert_eq!(queue.try_pop(), Some(2));

        // the write cursor is back on the slot still holding 1
        assert!(!queue.is_full());
        assert_eq!(queue.try_push(4).unwrap_err().element, 4);
        assert!(!queue.try_push_with(|| unreachable!()));

        assert_eq!(unsafe { queue.slot(current.read).take() }, 1);
        assert_eq!(queue.try_push(4), Ok(()));
        assert_eq!(queue.try_pop(), Some(3));
        assert_eq!(queue.try_pop(), Some(4));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn pop_refused_after_losing_race() {
        let queue: ArrayQueue<[i32; 3]> = ArrayQueue::new();
        queue.try_push(1).unwrap();

        let stale = queue.load();
        assert_eq!(queue.try_pop(), Some(1));
        let next = Cursor {
            read: queue.laps.next(stale.read),
            write: stale.write,
        };
        assert!(!queue.advance(stale, next));
        assert!(queue.is_empty());
    }
}
