/// Size and alignment of an arena that is expected to hold a known number of container
/// elements.
///
/// Each element is assumed to occupy `size_of::<T>()` bytes plus a per-element
/// `node_overhead` that depends on the container (e.g. two link pointers for a doubly-linked
/// list node, zero for contiguous storage). The arena gets room for [`HEADROOM`][1] extra
/// elements beyond the expected count, so that operations which grow a pre-filled container
/// by a bounded amount are still served from the arena.
///
/// If the real per-element cost of a container differs from the declared overhead, the arena
/// is either oversized or runs out early and falls back to the heap. Neither is an error, but
/// it shifts what a benchmark measures.
///
/// # Examples
///
/// ```
/// use bump_arena::{Arena, ArenaCapacity};
///
/// // A linked list of 100 u64 values, two link pointers per node.
/// let capacity = ArenaCapacity::for_elements::<u64>(2 * size_of::<usize>(), 100);
/// let arena = Arena::with_capacity(capacity);
///
/// assert!(arena.capacity() >= 100 * (8 + 2 * size_of::<usize>()));
/// ```
///
/// [1]: Self::HEADROOM
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArenaCapacity {
    bytes: usize,
    align: usize,
}

impl ArenaCapacity {
    /// Number of elements the arena can hold beyond the expected count.
    pub const HEADROOM: usize = 1000;

    /// Creates a capacity with an explicit byte size and alignment.
    #[must_use]
    pub const fn new(bytes: usize, align: usize) -> Self {
        Self { bytes, align }
    }

    /// Calculates the capacity for `count` elements of type `T`, each carrying
    /// `node_overhead` bytes of container bookkeeping.
    ///
    /// The alignment is that of `T` or of a machine word, whichever is larger.
    ///
    /// # Panics
    ///
    /// Panics if the calculation overflows `usize`, which would mean the arena cannot exist in
    /// virtual memory.
    #[must_use]
    pub fn for_elements<T>(node_overhead: usize, count: usize) -> Self {
        let align = align_of::<T>().max(align_of::<usize>());

        let element_bytes = size_of::<T>()
            .checked_add(node_overhead)
            .and_then(|size| size.checked_next_multiple_of(align))
            .expect("element size overflow means the element cannot exist in virtual memory");

        let bytes = count
            .checked_add(Self::HEADROOM)
            .and_then(|elements| elements.checked_mul(element_bytes))
            .expect("arena size overflow means the arena cannot exist in virtual memory");

        Self { bytes, align }
    }

    /// Capacity of the arena in bytes.
    #[must_use]
    pub const fn bytes(&self) -> usize {
        self.bytes
    }

    /// Alignment of the arena buffer.
    #[must_use]
    pub const fn align(&self) -> usize {
        self.align
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn for_elements_includes_overhead_and_headroom() {
        let capacity = ArenaCapacity::for_elements::<u64>(16, 10);

        assert_eq!(capacity.bytes(), 24 * (10 + ArenaCapacity::HEADROOM));
        assert_eq!(capacity.align(), align_of::<usize>().max(8));
    }

    #[test]
    fn for_elements_rounds_element_size_to_alignment() {
        let capacity = ArenaCapacity::for_elements::<[u8; 3]>(0, 0);

        assert_eq!(capacity.align(), align_of::<usize>());
        assert_eq!(
            capacity.bytes(),
            align_of::<usize>() * ArenaCapacity::HEADROOM
        );
    }

    #[test]
    fn for_elements_respects_large_alignment() {
        #[repr(align(64))]
        struct Aligned(#[allow(dead_code, reason = "only the layout matters")] u8);

        let capacity = ArenaCapacity::for_elements::<Aligned>(16, 1);

        assert_eq!(capacity.align(), 64);
        assert_eq!(capacity.bytes(), 128 * (1 + ArenaCapacity::HEADROOM));
    }

    #[test]
    #[should_panic]
    fn for_elements_panics_on_overflow() {
        _ = ArenaCapacity::for_elements::<u64>(0, usize::MAX);
    }
}
