//! Error types.

#[cfg(feature = "std")]
use std::error::Error;
use std::fmt;

/// Error value indicating that a push was refused.
///
/// The queue was full, or another producer reserved the same slot first.
/// The two causes are not told apart; either way the caller may retry later.
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd)]
pub struct PushError<T = ()> {
    /// The element that could not be pushed.
    pub element: T,
}

impl<T> PushError<T> {
    /// Create a new `PushError` carrying `element`.
    #[inline]
    pub fn new(element: T) -> PushError<T> {
        PushError { element }
    }

    /// Returns the element that could not be pushed.
    #[inline]
    pub fn into_inner(self) -> T {
        self.element
    }
}

const PUSHERROR: &'static str = "queue full or contended";

#[cfg(feature = "std")]
impl<T> Error for PushError<T> {}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", PUSHERROR)
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", "PushError", PUSHERROR)
    }
}
