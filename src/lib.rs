//! A lock-free queue with fixed capacity, shared by many producers and many
//! consumers.
//!
//! It can be stored directly on the stack if needed.
//!
//! Inserting and removing are `O(1)`, take `&self`, and never block: each call
//! performs a single compare-and-swap on a packed read/write cursor and gives
//! up if another thread moved the cursor first. Backoff and retry policy is
//! left to the caller.
//!
//! This crate is inspired by [**bluss/arrayvec**]
//! [**bluss/arrayvec**]: https://github.com/bluss/arrayvec
//!
//! # Feature Flags
//! The **arrayqueue** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd
//!
//!
//! - `use_generic_array`
//!   - Optional
//!   - Requires Rust stable channel
//!   - Depend on generic-array and allow using it just like a fixed
//!     size array for ArrayQueue storage.
//!
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! arrayqueue = "0.1"
//! ```
//!
//! Next, add this to your crate root:
//!
//! ```
//! extern crate arrayqueue;
//! ```
//!
//! Currently arrayqueue by default links to the standard library, but if you would
//! instead like to use arrayqueue in a `#![no_std]` situation or crate you can
//! request this via:
//!
//! ```toml
//! [dependencies]
//! arrayqueue = { version = "0.1", default-features = false }
//! ```
//!
//! # Capacity
//!
//! Note that the `capacity()` is always `backed_array.len() - 1`.
//! [Read more]
//!
//! [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
//!
//! # Examples
//! ```
//! extern crate arrayqueue;
//!
//! use arrayqueue::ArrayQueue;
//!
//! fn main() {
//!     let queue: ArrayQueue<[_; 8]> = ArrayQueue::new();
//!     assert_eq!(queue.capacity(), 7);
//!     assert_eq!(queue.len(), 0);
//!
//!     queue.try_push(1).unwrap();
//!     queue.try_push(2).unwrap();
//!     assert_eq!(queue.len(), 2);
//!
//!     assert_eq!(queue.try_pop(), Some(1));
//!     assert_eq!(queue.try_pop(), Some(2));
//!     assert_eq!(queue.try_pop(), None);
//! }
//! ```
//!
//! # Sharing between threads
//! ```
//! extern crate arrayqueue;
//! extern crate crossbeam_utils;
//!
//! use arrayqueue::ArrayQueue;
//! use crossbeam_utils::Backoff;
//! use std::thread;
//!
//! fn main() {
//!     let queue: ArrayQueue<[u32; 16]> = ArrayQueue::new();
//!
//!     thread::scope(|s| {
//!         s.spawn(|| {
//!             for i in 0..100 {
//!                 let backoff = Backoff::new();
//!                 let mut element = i;
//!                 while let Err(err) = queue.try_push(element) {
//!                     element = err.element;
//!                     backoff.snooze();
//!                 }
//!             }
//!         });
//!
//!         let mut sum = 0;
//!         let mut received = 0;
//!         let backoff = Backoff::new();
//!         while received < 100 {
//!             match queue.try_pop() {
//!                 Some(i) => {
//!                     sum += i;
//!                     received += 1;
//!                 }
//!                 None => backoff.snooze(),
//!             }
//!         }
//!         assert_eq!(sum, 4950);
//!     });
//! }
//! ```

#![cfg_attr(not(any(feature="std", test)), no_std)]

#![deny(missing_docs)]

#[cfg(not(any(feature="std", test)))]
extern crate core as std;

extern crate crossbeam_utils;
#[cfg(feature = "use_generic_array")]
extern crate generic_array;

mod array;
mod arrayqueue;
mod cursor;
mod slot;
mod utils;
pub mod error;

pub use array::Array;
pub use arrayqueue::ArrayQueue;
pub use error::PushError;
#[doc(hidden)]
pub use slot::Slot;
