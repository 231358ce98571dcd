//! Compile-time classification of benchmark element types.
//!
//! Every element type declares a [`ValueClass`] describing how it behaves when containers copy,
//! move and destroy it. The predicates in this module combine that declaration with what the
//! compiler knows about the type (size, drop glue) and are all `const fn`, so the catalog can
//! assert its own classification at compile time and the benchmark families can select work
//! per type without any runtime cost.

use std::fmt::Debug;
use std::mem;

/// How an element type behaves when a container relocates it.
///
/// Moves in Rust are bitwise and cannot fail, so this is declared metadata. It records the
/// guarantee the type advertises, which decides which classification predicates it satisfies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Movability {
    /// Relocation is declared to never fail.
    Infallible,

    /// Relocation is supported, without a declared no-failure guarantee.
    Fallible,

    /// The type does not offer relocation, only copying.
    CopyOnly,
}

/// Declared behavior of an element type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ValueClass {
    plain: bool,
    copyable: bool,
    movability: Movability,
}

impl ValueClass {
    /// Plain bytes: trivially copyable, no destructor, no invariants.
    pub const PLAIN: Self = Self {
        plain: true,
        copyable: true,
        movability: Movability::Infallible,
    };

    /// A type with owned resources or a meaningful destructor.
    #[must_use]
    pub const fn non_trivial(movability: Movability) -> Self {
        Self {
            plain: false,
            copyable: true,
            movability,
        }
    }

    /// Whether values are plain bytes.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.plain
    }

    /// Whether values can be duplicated.
    #[must_use]
    pub const fn is_copyable(&self) -> bool {
        self.copyable
    }

    /// The declared relocation guarantee.
    #[must_use]
    pub const fn movability(&self) -> Movability {
        self.movability
    }
}

/// An element type that the benchmark families can store in containers.
///
/// Every value carries an integer key. Ordering and equality are defined by the key, which lets
/// operations build, look up and sort elements of any size in the same way.
pub trait Value: Clone + Default + Ord + Debug + 'static {
    /// Declared behavior of this type.
    const CLASS: ValueClass;

    /// Creates a value carrying `key`.
    fn from_key(key: usize) -> Self;

    /// The key this value carries.
    fn key(&self) -> usize;
}

/// Plain type with no destructor whose size is exactly `size` bytes.
#[must_use]
pub const fn is_trivial_of_size<T: Value>(size: usize) -> bool {
    T::CLASS.is_plain() && !mem::needs_drop::<T>() && size_of::<T>() == size
}

/// Non-plain type whose size is exactly `size` bytes.
#[must_use]
pub const fn is_non_trivial_of_size<T: Value>(size: usize) -> bool {
    !T::CLASS.is_plain() && size_of::<T>() == size
}

/// Non-plain type that declares relocation never fails.
#[must_use]
pub const fn is_non_trivial_nothrow_movable<T: Value>() -> bool {
    !T::CLASS.is_plain() && matches!(T::CLASS.movability(), Movability::Infallible)
}

/// Non-plain type that relocates without declaring the no-failure guarantee.
#[must_use]
pub const fn is_non_trivial_non_nothrow_movable<T: Value>() -> bool {
    !T::CLASS.is_plain() && matches!(T::CLASS.movability(), Movability::Fallible)
}

/// Non-plain type that can only be copied.
#[must_use]
pub const fn is_non_trivial_non_movable<T: Value>() -> bool {
    !T::CLASS.is_plain()
        && T::CLASS.is_copyable()
        && matches!(T::CLASS.movability(), Movability::CopyOnly)
}

/// Type no larger than a machine word.
///
/// Front insertion into contiguous storage shifts every element, so it is only measured for
/// small types.
#[must_use]
pub const fn is_small<T>() -> bool {
    size_of::<T>() <= size_of::<usize>()
}
