use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use crate::allocator::{dangling_for, heap_allocate, heap_deallocate};
use crate::{Allocator, ArenaCapacity};

/// A fixed-capacity memory buffer that serves allocations by advancing a cursor.
///
/// The buffer is allocated once, when the arena is created, and released once, when the arena
/// is dropped. It is never resized.
///
/// Containers do not use the arena directly. Instead, they are given an [`ArenaAllocator`]
/// obtained from [`allocator()`](Self::allocator), which borrows the arena and therefore cannot
/// outlive it. Any number of allocator copies may exist at the same time; they all share the
/// single cursor of the arena.
///
/// # Reuse
///
/// Only the most recently allocated block can be reused: deallocating it moves the cursor back
/// to where the block started. Deallocating any other arena block does nothing and the memory
/// stays unavailable until the arena is dropped.
///
/// # Exhaustion
///
/// Requests that do not fit into the remaining space, or that need stricter alignment than the
/// arena provides, are served by the global heap. Deallocating such a block returns it to the
/// heap. Callers cannot observe which source served a request other than via [`owns()`][1].
///
/// # Thread safety
///
/// The arena is single-threaded. It is neither [`Send`] nor [`Sync`].
///
/// # Examples
///
/// ```
/// use std::alloc::Layout;
///
/// use bump_arena::{Allocator, Arena};
///
/// let arena = Arena::new(64, 8);
/// let allocator = arena.allocator();
///
/// let layout = Layout::new::<u64>();
/// let ptr = allocator.allocate(layout);
///
/// assert!(arena.owns(ptr));
/// assert_eq!(arena.used(), 8);
///
/// // SAFETY: The block was allocated from this arena with this layout.
/// unsafe { allocator.deallocate(ptr, layout) };
/// assert_eq!(arena.used(), 0);
/// ```
///
/// [1]: Self::owns
#[derive(Debug)]
pub struct Arena {
    /// Start of the buffer. Dangling if the buffer is zero-sized.
    buffer: NonNull<u8>,

    /// Size and alignment of the buffer. The size is a multiple of the alignment.
    buffer_layout: Layout,

    /// Offset of the first free byte. Always a multiple of the buffer alignment.
    cursor: Cell<usize>,
}

impl Arena {
    /// Creates an arena with a buffer of at least `capacity` bytes, aligned to `align`.
    ///
    /// The capacity is rounded up to a multiple of `align`. A zero capacity allocates nothing,
    /// in which case every request is served by the global heap.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two or if the rounded capacity exceeds `isize::MAX`.
    #[must_use]
    pub fn new(capacity: usize, align: usize) -> Self {
        let buffer_layout = Layout::from_size_align(capacity, align)
            .expect("arena alignment must be a power of two and the capacity must fit in isize")
            .pad_to_align();

        let buffer = if buffer_layout.size() == 0 {
            NonNull::dangling()
        } else {
            heap_allocate(buffer_layout)
        };

        Self {
            buffer,
            buffer_layout,
            cursor: Cell::new(0),
        }
    }

    /// Creates an arena sized by an [`ArenaCapacity`] calculation.
    #[must_use]
    pub fn with_capacity(capacity: ArenaCapacity) -> Self {
        Self::new(capacity.bytes(), capacity.align())
    }

    /// Returns an allocator that serves requests from this arena.
    #[must_use]
    pub fn allocator(&self) -> ArenaAllocator<'_> {
        ArenaAllocator { arena: self }
    }

    /// Size of the buffer in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer_layout.size()
    }

    /// Alignment of the buffer and granularity of all blocks carved from it.
    #[must_use]
    pub fn align(&self) -> usize {
        self.buffer_layout.align()
    }

    /// Number of bytes between the start of the buffer and the cursor.
    ///
    /// This includes blocks that were deallocated out of order and are therefore not reusable.
    #[must_use]
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Number of bytes still available behind the cursor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        // Cannot underflow, the cursor never moves past the end of the buffer.
        self.capacity().wrapping_sub(self.cursor.get())
    }

    /// Whether `ptr` points into the buffer of this arena.
    ///
    /// Blocks served by the heap fallback are never owned by the arena.
    #[must_use]
    pub fn owns<T>(&self, ptr: NonNull<T>) -> bool {
        self.offset_of(ptr.cast()).is_some()
    }

    fn allocate(&self, layout: Layout) -> NonNull<u8> {
        if layout.size() == 0 {
            return dangling_for(layout);
        }

        self.try_bump(layout).unwrap_or_else(|| heap_allocate(layout))
    }

    /// # Safety
    ///
    /// `ptr` must have been returned by [`allocate()`](Self::allocate) on this arena with the
    /// same `layout` and must not have been deallocated already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        let Some(offset) = self.offset_of(ptr) else {
            // SAFETY: The block is not in our buffer, so it came from the heap fallback with
            // this layout, as guaranteed by the caller.
            unsafe {
                heap_deallocate(ptr, layout);
            }
            return;
        };

        let block_size = self
            .block_size(layout)
            .expect("block size was already calculated successfully when the block was allocated");

        // Only the top of the stack can be reclaimed. Cannot overflow because the block lies
        // within the buffer.
        if offset.wrapping_add(block_size) == self.cursor.get() {
            self.cursor.set(offset);
        }
    }

    fn try_bump(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.align() > self.align() {
            return None;
        }

        let block_size = self.block_size(layout)?;
        let start = self.cursor.get();
        let end = start.checked_add(block_size)?;

        if end > self.capacity() {
            return None;
        }

        self.cursor.set(end);

        // SAFETY: `start < end <= capacity`, so the offset stays inside the buffer allocation.
        Some(unsafe { self.buffer.add(start) })
    }

    /// Size of the block carved from the buffer for `layout`. Rounding up to the buffer
    /// alignment keeps the cursor aligned for every subsequent request.
    fn block_size(&self, layout: Layout) -> Option<usize> {
        layout.size().checked_next_multiple_of(self.align())
    }

    fn offset_of(&self, ptr: NonNull<u8>) -> Option<usize> {
        let offset = ptr.addr().get().checked_sub(self.buffer.addr().get())?;

        (offset < self.capacity()).then_some(offset)
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        // SAFETY: The buffer was allocated by `heap_allocate()` with this layout in `new()`.
        // Zero-sized buffers are ignored by `heap_deallocate()`.
        unsafe {
            heap_deallocate(self.buffer, self.buffer_layout);
        }
    }
}

/// An [`Allocator`] that serves requests from an [`Arena`].
///
/// This is a lightweight handle: copying it does not copy or reset the arena. All copies share
/// the arena cursor, so memory allocated through one copy may be deallocated through another.
///
/// # Examples
///
/// ```
/// use bump_arena::{Allocator, Arena};
///
/// let arena = Arena::new(256, 8);
/// let a = arena.allocator();
/// let b = a;
///
/// let block = a.allocate_array::<u32>(4);
/// assert_eq!(arena.used(), 16);
///
/// // SAFETY: The block was allocated by a copy of `b` for 4 values of `u32`.
/// unsafe { b.deallocate_array(block, 4) };
/// assert_eq!(arena.used(), 0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ArenaAllocator<'a> {
    arena: &'a Arena,
}

impl<'a> ArenaAllocator<'a> {
    /// The arena this allocator serves requests from.
    #[must_use]
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }
}

// SAFETY: Arena blocks are carved from a live buffer that outlives the allocator (enforced by
// the borrow) and are never handed out twice while allocated, because the cursor only moves
// back over the most recent block after that block has been deallocated. Heap fallback blocks
// come straight from the global heap.
unsafe impl Allocator for ArenaAllocator<'_> {
    #[inline]
    fn allocate(&self, layout: Layout) -> NonNull<u8> {
        self.arena.allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarding the caller's guarantees. All copies share the same arena.
        unsafe {
            self.arena.deallocate(ptr, layout);
        }
    }
}
