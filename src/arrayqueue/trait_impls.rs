use std::fmt;

use super::ArrayQueue;
use array::Array;

unsafe impl<A: Array> Send for ArrayQueue<A> where A::Item: Send {}

// Slot storage is only touched by the thread whose CAS reserved it.
unsafe impl<A: Array> Sync for ArrayQueue<A> where A::Item: Send {}

impl<A: Array> Drop for ArrayQueue<A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<A: Array> Default for ArrayQueue<A> {
    #[inline]
    fn default() -> ArrayQueue<A> {
        ArrayQueue::new()
    }
}

impl<A: Array> fmt::Debug for ArrayQueue<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ArrayQueue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}
