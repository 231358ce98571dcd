use std::alloc::{self, Layout};
use std::fmt::Debug;
use std::ptr::{self, NonNull};

/// A source of memory blocks that containers can be parameterized with.
///
/// Allocation never reports failure to the caller. An implementation either returns a valid
/// block or terminates the process via [`handle_alloc_error`](std::alloc::handle_alloc_error).
///
/// Copies of an allocator are interchangeable: memory allocated through one copy may be
/// deallocated through any other copy.
///
/// # Safety
///
/// Implementations must return memory that is valid for reads and writes of `layout.size()`
/// bytes and aligned to `layout.align()`, and that remains valid and unaliased until it is
/// passed to [`deallocate()`](Self::deallocate) on the same allocator or one of its copies.
pub unsafe trait Allocator: Copy + Debug {
    /// Allocates a block of memory matching `layout`.
    ///
    /// Zero-sized layouts yield a dangling, well-aligned pointer that must not be dereferenced.
    fn allocate(&self, layout: Layout) -> NonNull<u8>;

    /// Returns a block of memory to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by [`allocate()`](Self::allocate) on this allocator or one
    /// of its copies, with the same `layout`, and must not have been deallocated already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Allocates uninitialized storage for `count` values of type `T`.
    fn allocate_array<T>(&self, count: usize) -> NonNull<T> {
        self.allocate(array_layout::<T>(count)).cast()
    }

    /// Returns storage for `count` values of type `T` to the allocator.
    ///
    /// The values themselves are not dropped.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by [`allocate_array()`](Self::allocate_array) on this
    /// allocator or one of its copies with the same `count`, and must not have been
    /// deallocated already.
    unsafe fn deallocate_array<T>(&self, ptr: NonNull<T>, count: usize) {
        // SAFETY: Forwarding the caller's guarantees, the layout is derived identically.
        unsafe {
            self.deallocate(ptr.cast(), array_layout::<T>(count));
        }
    }
}

fn array_layout<T>(count: usize) -> Layout {
    Layout::array::<T>(count)
        .expect("array layout overflow means the request exceeds the size of virtual memory")
}

/// The global heap, exposed through the [`Allocator`] interface.
///
/// # Examples
///
/// ```
/// use bump_arena::{Allocator, Global};
///
/// let block = Global.allocate_array::<u64>(8);
///
/// // SAFETY: The block was allocated by `Global` for 8 values of `u64`.
/// unsafe { Global.deallocate_array(block, 8) };
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[allow(
    clippy::exhaustive_structs,
    reason = "unit marker type, constructed directly by callers"
)]
pub struct Global;

// SAFETY: We forward to the global allocator, which upholds the block validity contract.
unsafe impl Allocator for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> NonNull<u8> {
        heap_allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarding the caller's guarantee that the block came from `heap_allocate()`.
        unsafe {
            heap_deallocate(ptr, layout);
        }
    }
}

/// Allocates from the global heap, terminating the process if the heap is exhausted.
#[inline]
pub(crate) fn heap_allocate(layout: Layout) -> NonNull<u8> {
    if layout.size() == 0 {
        return dangling_for(layout);
    }

    // SAFETY: The layout has a non-zero size, as checked above.
    let ptr = unsafe { alloc::alloc(layout) };

    NonNull::new(ptr).unwrap_or_else(|| alloc::handle_alloc_error(layout))
}

/// Returns a block obtained from [`heap_allocate()`] to the global heap.
///
/// # Safety
///
/// `ptr` must have been returned by [`heap_allocate()`] with the same `layout`.
#[inline]
pub(crate) unsafe fn heap_deallocate(ptr: NonNull<u8>, layout: Layout) {
    if layout.size() == 0 {
        return;
    }

    // SAFETY: The caller guarantees the block came from the global heap with this layout.
    unsafe {
        alloc::dealloc(ptr.as_ptr(), layout);
    }
}

/// A non-null pointer that satisfies the alignment of `layout` but points to no memory.
#[inline]
pub(crate) fn dangling_for(layout: Layout) -> NonNull<u8> {
    NonNull::new(ptr::without_provenance_mut(layout.align()))
        .expect("Layout guarantees a non-zero power-of-two alignment")
}
