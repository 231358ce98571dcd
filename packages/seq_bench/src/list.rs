use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use bump_arena::{Allocator, Global};

use crate::Sequence;

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    prev: Link<T>,
    next: Link<T>,
    value: T,
}

/// A doubly-linked list whose nodes come from an [`Allocator`].
///
/// Every element lives in its own node allocation, which makes this the container whose cost
/// depends most on the allocator. [`clear()`](Self::clear) releases nodes from the back, so
/// with an arena allocator the memory is reclaimed only when the nodes were allocated in list
/// order, as they are when the list is filled from the back. Nodes of a list filled from the
/// front are released in allocation order instead and stay unusable until the arena drops.
///
/// # Examples
///
/// ```
/// use bump_arena::{Arena, ArenaCapacity};
/// use seq_bench::{List, NODE_OVERHEAD};
///
/// let arena = Arena::with_capacity(ArenaCapacity::for_elements::<u64>(NODE_OVERHEAD, 3));
/// let mut list = List::new_in(arena.allocator());
///
/// list.push_back(1_u64);
/// list.push_back(2);
/// list.push_back(3);
///
/// assert!(list.iter().copied().eq([1, 2, 3]));
/// assert!(arena.used() > 0);
///
/// list.clear();
/// assert_eq!(arena.used(), 0);
/// ```
pub struct List<T, A: Allocator = Global> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    allocator: A,

    // We own values of type T and drop them.
    _owns: PhantomData<T>,
}

/// Bytes of bookkeeping each list node carries on top of its element.
pub const NODE_OVERHEAD: usize = 2 * size_of::<Option<NonNull<()>>>();

impl<T> List<T> {
    /// Creates an empty list that allocates its nodes from the global heap.
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> List<T, A> {
    /// Creates an empty list that allocates its nodes from `allocator`.
    #[must_use]
    pub fn new_in(allocator: A) -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            allocator,
            _owns: PhantomData,
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The allocator that provides the nodes.
    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// The first element, if any.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        // SAFETY: Linked nodes are initialized and live as long as the borrow of the list.
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// The last element, if any.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        // SAFETY: Linked nodes are initialized and live as long as the borrow of the list.
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Iterates over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head,
            remaining: self.len,
            _list: PhantomData,
        }
    }

    /// Appends a value.
    pub fn push_back(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Appends a value that `make` writes directly into the new node.
    pub fn emplace_back(&mut self, make: impl FnOnce() -> T) {
        let node = self.new_node(make);

        // SAFETY: The node is fresh and unlinked, `None` means "after the tail".
        unsafe {
            self.link_before(None, node);
        }
    }

    /// Prepends a value.
    pub fn push_front(&mut self, value: T) {
        self.emplace_front(|| value);
    }

    /// Prepends a value that `make` writes directly into the new node.
    pub fn emplace_front(&mut self, make: impl FnOnce() -> T) {
        let node = self.new_node(make);

        // SAFETY: The node is fresh and unlinked, the head is a node of this list.
        unsafe {
            self.link_before(self.head, node);
        }
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.head?;

        // SAFETY: The head is a linked node of this list.
        Some(unsafe { self.unlink(node) })
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        let node = self.tail?;

        // SAFETY: The tail is a linked node of this list.
        Some(unsafe { self.unlink(node) })
    }

    /// Inserts `value` before the first element matching `predicate`, or at the back if none
    /// matches.
    pub fn insert_before_first(&mut self, predicate: impl FnMut(&T) -> bool, value: T) {
        let position = self.find(predicate);
        let node = self.new_node(|| value);

        // SAFETY: The node is fresh and unlinked, `position` is a node of this list or `None`.
        unsafe {
            self.link_before(position, node);
        }
    }

    /// Removes and returns the first element matching `predicate`.
    pub fn remove_first(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        let node = self.find(predicate)?;

        // SAFETY: `find()` only returns linked nodes of this list.
        Some(unsafe { self.unlink(node) })
    }

    /// Sorts the list in ascending order by relinking nodes. The sort is stable.
    ///
    /// No element is moved or reallocated, only the links between nodes change.
    #[expect(
        clippy::multiple_unsafe_ops_per_block,
        reason = "relinking touches several nodes under one invariant"
    )]
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        if self.len < 2 {
            return;
        }

        // SAFETY: The chain from the head is exactly `len` linked nodes ending in `None`.
        let head = unsafe { merge_sort(self.head, self.len) };

        // The sort only maintains forward links, so restore the backward ones.
        let mut prev = None;
        let mut cursor = head;

        while let Some(node) = cursor {
            // SAFETY: Every node in the sorted chain is a live node of this list.
            unsafe {
                (*node.as_ptr()).prev = prev;
                prev = cursor;
                cursor = (*node.as_ptr()).next;
            }
        }

        self.head = head;
        self.tail = prev;
    }

    /// Removes all elements.
    ///
    /// Nodes are released from the back, in reverse order of how a list filled from the back
    /// allocated them.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
    }

    fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Link<T> {
        let mut cursor = self.head;

        while let Some(node) = cursor {
            // SAFETY: Linked nodes are initialized and live as long as the borrow of the list.
            let node_ref = unsafe { node.as_ref() };

            if predicate(&node_ref.value) {
                return Some(node);
            }

            cursor = node_ref.next;
        }

        None
    }

    fn new_node(&self, make: impl FnOnce() -> T) -> NonNull<Node<T>> {
        let node = self.allocator.allocate_array::<Node<T>>(1);

        // SAFETY: The allocator returned storage for one node, which we now initialize.
        // If `make` panics, the storage leaks but nothing reads it.
        unsafe {
            node.write(Node {
                prev: None,
                next: None,
                value: make(),
            });
        }

        node
    }

    /// Links `node` in front of `next`, or at the back if `next` is `None`.
    ///
    /// # Safety
    ///
    /// `node` must be initialized and not linked into any list. `next` must be `None` or a
    /// linked node of this list.
    #[expect(
        clippy::multiple_unsafe_ops_per_block,
        reason = "relinking touches several nodes under one invariant"
    )]
    unsafe fn link_before(&mut self, next: Link<T>, node: NonNull<Node<T>>) {
        // SAFETY: The caller guarantees `next` is a linked node of this list.
        let prev = next.map_or(self.tail, |next| unsafe { (*next.as_ptr()).prev });

        // SAFETY: The caller guarantees `node` is initialized, and we have exclusive access
        // to all nodes of this list through `&mut self`.
        unsafe {
            (*node.as_ptr()).prev = prev;
            (*node.as_ptr()).next = next;

            match prev {
                Some(prev) => (*prev.as_ptr()).next = Some(node),
                None => self.head = Some(node),
            }

            match next {
                Some(next) => (*next.as_ptr()).prev = Some(node),
                None => self.tail = Some(node),
            }
        }

        self.len = self
            .len
            .checked_add(1)
            .expect("a list cannot hold more nodes than there are bytes of memory");
    }

    /// Unlinks `node`, frees its storage and returns the value it held.
    ///
    /// # Safety
    ///
    /// `node` must be a linked node of this list.
    #[expect(
        clippy::multiple_unsafe_ops_per_block,
        reason = "relinking touches several nodes under one invariant"
    )]
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        // SAFETY: The caller guarantees the node is linked, hence initialized. Reading moves
        // the value out, after which the storage is only deallocated, never read again.
        let Node { prev, next, value } = unsafe { node.read() };

        // SAFETY: Neighbors are linked nodes of this list, to which we have exclusive access.
        unsafe {
            match prev {
                Some(prev) => (*prev.as_ptr()).next = next,
                None => self.head = next,
            }

            match next {
                Some(next) => (*next.as_ptr()).prev = prev,
                None => self.tail = prev,
            }
        }

        // SAFETY: Every node was allocated by `new_node()` through this allocator as a
        // single-element array.
        unsafe {
            self.allocator.deallocate_array(node, 1);
        }

        self.len = self
            .len
            .checked_sub(1)
            .expect("a linked node exists, so the list cannot be empty");

        value
    }
}

impl<T, A: Allocator> Drop for List<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug, A: Allocator> Debug for List<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A: Allocator> Extend<T> for List<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`List`], front to back.
pub struct Iter<'a, T> {
    next: Link<T>,
    remaining: usize,
    _list: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;

        // SAFETY: The iterator borrows the list, so its nodes stay linked and initialized
        // for `'a`.
        let node_ref: &'a Node<T> = unsafe { node.as_ref() };

        self.next = node_ref.next;
        self.remaining = self.remaining.saturating_sub(1);

        Some(&node_ref.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<T, A: Allocator> Sequence<T> for List<T, A> {
    type Iter<'a>
        = Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        Self::iter(self)
    }

    #[inline]
    fn push_back(&mut self, value: T) {
        Self::push_back(self, value);
    }

    #[inline]
    fn emplace_back(&mut self, make: impl FnOnce() -> T) {
        Self::emplace_back(self, make);
    }

    #[inline]
    fn push_front(&mut self, value: T) {
        Self::push_front(self, value);
    }

    #[inline]
    fn emplace_front(&mut self, make: impl FnOnce() -> T) {
        Self::emplace_front(self, make);
    }

    fn extend_back(&mut self, values: impl IntoIterator<Item = T>) {
        Extend::extend(self, values);
    }

    fn insert_where(&mut self, predicate: impl FnMut(&T) -> bool, value: T) {
        self.insert_before_first(predicate, value);
    }

    fn remove_where(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.remove_first(predicate)
    }

    fn sort(&mut self)
    where
        T: Ord,
    {
        Self::sort(self);
    }

    fn release(&mut self) {
        self.clear();
    }
}

/// Sorts a chain of `len` nodes linked through `next`, returning the new head.
///
/// # Safety
///
/// `head` must start a chain of exactly `len` live nodes whose last `next` is `None`, with no
/// other access to those nodes for the duration of the call.
#[expect(
    clippy::multiple_unsafe_ops_per_block,
    reason = "relinking touches several nodes under one invariant"
)]
unsafe fn merge_sort<T: Ord>(head: Link<T>, len: usize) -> Link<T> {
    if len < 2 {
        return head;
    }

    #[expect(
        clippy::integer_division,
        reason = "rounding down is the intended split"
    )]
    let left_len = len / 2;

    let mut left_last = head.expect("a chain of two or more nodes has a head");

    for _ in 1..left_len {
        // SAFETY: The first `left_len` nodes exist because `left_len < len`.
        left_last = unsafe { (*left_last.as_ptr()).next }
            .expect("the chain is longer than its left half");
    }

    // SAFETY: `left_last` is a live node of the chain. Detaching its successor splits the
    // chain into two `None`-terminated halves.
    let right = unsafe { (*left_last.as_ptr()).next.take() };

    // SAFETY: Both halves satisfy the chain requirements with their respective lengths.
    unsafe {
        let left = merge_sort(head, left_len);
        let right = merge_sort(right, len.wrapping_sub(left_len));

        merge(left, right)
    }
}

/// Merges two sorted `None`-terminated chains, preferring `left` among equal elements.
///
/// # Safety
///
/// Both chains must consist of live nodes with no other access for the duration of the call.
#[expect(
    clippy::multiple_unsafe_ops_per_block,
    reason = "relinking touches several nodes under one invariant"
)]
unsafe fn merge<T: Ord>(mut left: Link<T>, mut right: Link<T>) -> Link<T> {
    let mut head: Link<T> = None;
    let mut tail: Link<T> = None;

    let rest = loop {
        let (Some(l), Some(r)) = (left, right) else {
            break left.or(right);
        };

        // SAFETY: Both nodes are live members of the chains we were given.
        let taken = unsafe {
            if (*r.as_ptr()).value < (*l.as_ptr()).value {
                right = (*r.as_ptr()).next;
                r
            } else {
                left = (*l.as_ptr()).next;
                l
            }
        };

        match tail {
            // SAFETY: `tail` is a node we already placed in the merged chain.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(taken) },
            None => head = Some(taken),
        }

        tail = Some(taken);
    };

    match tail {
        // SAFETY: `tail` is a node we already placed in the merged chain.
        Some(tail) => unsafe { (*tail.as_ptr()).next = rest },
        None => head = rest,
    }

    head
}
