//! Container kinds and the allocation strategies they can be combined with.
//!
//! A benchmark series is named by a (container kind, allocation strategy) pair. Pairs that make
//! no sense are simply not implemented, so they cannot be named.

use std::collections::VecDeque;

use bump_arena::{Arena, ArenaAllocator, ArenaCapacity};

use crate::{List, NODE_OVERHEAD, Sequence, Value};

/// Decides where a container obtains its memory during one trial.
///
/// Each trial creates a fresh scope, builds the container against it and drops both before the
/// next trial, so no allocator state carries over between trials.
pub trait AllocStrategy {
    /// Allocation state that lives for one trial.
    type Scope;

    /// Creates the allocation state for a trial expected to hold elements fitting `capacity`.
    fn new_scope(capacity: ArenaCapacity) -> Self::Scope;
}

/// Containers allocate from the global heap.
#[derive(Debug)]
#[allow(
    clippy::exhaustive_structs,
    reason = "type-level marker, never constructed"
)]
pub struct Heap;

impl AllocStrategy for Heap {
    type Scope = ();

    fn new_scope(_capacity: ArenaCapacity) -> Self::Scope {}
}

/// Containers allocate from a bump arena sized for the trial.
#[derive(Debug)]
#[allow(
    clippy::exhaustive_structs,
    reason = "type-level marker, never constructed"
)]
pub struct Linear;

impl AllocStrategy for Linear {
    type Scope = Arena;

    fn new_scope(capacity: ArenaCapacity) -> Self::Scope {
        Arena::with_capacity(capacity)
    }
}

/// A container layout that can be built under allocation strategy `S`.
pub trait ContainerKind<S: AllocStrategy> {
    /// Bytes of per-element bookkeeping the container adds, used for sizing arenas.
    const NODE_OVERHEAD: usize;

    /// The container type, borrowing from the allocation scope for `'s`.
    type Container<'s, T: Value>: Sequence<T>
    where
        S::Scope: 's;

    /// Creates an empty container that allocates according to `scope`.
    fn create<T: Value>(scope: &S::Scope) -> Self::Container<'_, T>;
}

/// Contiguous growable storage.
#[derive(Debug)]
#[allow(
    clippy::exhaustive_structs,
    reason = "type-level marker, never constructed"
)]
pub struct VecKind;

impl ContainerKind<Heap> for VecKind {
    const NODE_OVERHEAD: usize = 0;

    type Container<'s, T: Value> = Vec<T>;

    fn create<T: Value>(_scope: &()) -> Self::Container<'_, T> {
        Vec::new()
    }
}

/// Double-ended queue on a growable ring buffer.
#[derive(Debug)]
#[allow(
    clippy::exhaustive_structs,
    reason = "type-level marker, never constructed"
)]
pub struct DequeKind;

impl ContainerKind<Heap> for DequeKind {
    const NODE_OVERHEAD: usize = 0;

    type Container<'s, T: Value> = VecDeque<T>;

    fn create<T: Value>(_scope: &()) -> Self::Container<'_, T> {
        VecDeque::new()
    }
}

/// Doubly-linked list with one allocation per element.
#[derive(Debug)]
#[allow(
    clippy::exhaustive_structs,
    reason = "type-level marker, never constructed"
)]
pub struct ListKind;

impl ContainerKind<Heap> for ListKind {
    const NODE_OVERHEAD: usize = NODE_OVERHEAD;

    type Container<'s, T: Value> = List<T>;

    fn create<T: Value>(_scope: &()) -> Self::Container<'_, T> {
        List::new()
    }
}

impl ContainerKind<Linear> for ListKind {
    const NODE_OVERHEAD: usize = NODE_OVERHEAD;

    type Container<'s, T: Value> = List<T, ArenaAllocator<'s>>;

    fn create<T: Value>(scope: &Arena) -> Self::Container<'_, T> {
        List::new_in(scope.allocator())
    }
}
