#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A fixed-capacity bump arena and the allocator seam that lets containers use it.
//!
//! The core functionality includes:
//! - [`Arena`] - Owns one contiguous, fixed-alignment buffer and a cursor into it
//! - [`ArenaAllocator`] - A copyable view over an [`Arena`], handed to containers
//! - [`Global`] - The global heap behind the same [`Allocator`] interface
//! - [`ArenaCapacity`] - Sizes an arena for an expected number of container elements
//!
//! Allocation advances the cursor. Deallocation rolls the cursor back only when the freed
//! block is the most recent one (stack discipline). Anything else freed from the arena stays
//! unused until the arena itself is dropped. When a request does not fit, it is served by the
//! global heap instead and returned to the heap when deallocated.
//!
//! This matches the allocation pattern of node-based containers that are filled and emptied
//! in order, which is the case the arena is meant to demonstrate. It is not a general purpose
//! allocator for arbitrary allocation and free order.
//!
//! This package is not meant for use in production, serving only as a benchmarking tool.
//!
//! # Example
//!
//! ```
//! use std::alloc::Layout;
//!
//! use bump_arena::{Allocator, Arena};
//!
//! let arena = Arena::new(1024, 16);
//! let allocator = arena.allocator();
//!
//! let layout = Layout::new::<[u64; 4]>();
//! let first = allocator.allocate(layout);
//!
//! // Freeing the most recent block makes its memory available again.
//! // SAFETY: `first` was allocated by this allocator with this layout.
//! unsafe { allocator.deallocate(first, layout) };
//!
//! let second = allocator.allocate(layout);
//! assert_eq!(first, second);
//! # // SAFETY: `second` was allocated by this allocator with this layout.
//! # unsafe { allocator.deallocate(second, layout) };
//! ```

mod allocator;
mod arena;
mod capacity;

pub use allocator::*;
pub use arena::*;
pub use capacity::*;
