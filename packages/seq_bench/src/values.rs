//! The catalog of element types that every benchmark family is run against.

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hint::black_box;

use static_assertions::{assert_impl_all, const_assert};

use crate::{
    Movability, Value, ValueClass, is_non_trivial_non_nothrow_movable,
    is_non_trivial_nothrow_movable, is_non_trivial_of_size, is_small, is_trivial_of_size,
};

const KEY_BYTES: usize = size_of::<usize>();

/// Plain bytes of a fixed size. The key occupies the leading bytes.
#[derive(Clone, Copy)]
#[repr(C, align(8))]
pub struct Trivial<const SIZE: usize> {
    bytes: [u8; SIZE],
}

impl<const SIZE: usize> Value for Trivial<SIZE> {
    const CLASS: ValueClass = ValueClass::PLAIN;

    fn from_key(key: usize) -> Self {
        let mut bytes = [0; SIZE];

        if let Some(head) = bytes.first_chunk_mut::<KEY_BYTES>() {
            *head = key.to_ne_bytes();
        }

        Self { bytes }
    }

    fn key(&self) -> usize {
        self.bytes
            .first_chunk::<KEY_BYTES>()
            .map_or(0, |head| usize::from_ne_bytes(*head))
    }
}

impl<const SIZE: usize> Default for Trivial<SIZE> {
    fn default() -> Self {
        Self { bytes: [0; SIZE] }
    }
}

impl<const SIZE: usize> PartialEq for Trivial<SIZE> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<const SIZE: usize> Eq for Trivial<SIZE> {}

impl<const SIZE: usize> PartialOrd for Trivial<SIZE> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const SIZE: usize> Ord for Trivial<SIZE> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl<const SIZE: usize> Debug for Trivial<SIZE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trivial")
            .field("key", &self.key())
            .finish_non_exhaustive()
    }
}

/// 8 bytes of plain data.
pub type TrivialSmall = Trivial<8>;
/// 32 bytes of plain data.
pub type TrivialMedium = Trivial<32>;
/// 128 bytes of plain data.
pub type TrivialLarge = Trivial<128>;
/// 1 KiB of plain data.
pub type TrivialHuge = Trivial<1024>;
/// 4 KiB of plain data.
pub type TrivialMonster = Trivial<4096>;

// Long enough that no small-string optimization could keep it inline.
const LONG_TEXT: &str = "some pretty long string to make sure it is not stored inline";

/// Owns a heap string. Declares relocation without a no-failure guarantee.
#[derive(Clone, Debug)]
pub struct NonTrivialStringMovable {
    data: String,
    key: usize,
}

impl NonTrivialStringMovable {
    /// The owned text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.data
    }
}

impl Value for NonTrivialStringMovable {
    const CLASS: ValueClass = ValueClass::non_trivial(Movability::Fallible);

    fn from_key(key: usize) -> Self {
        Self {
            data: LONG_TEXT.to_owned(),
            key,
        }
    }

    fn key(&self) -> usize {
        self.key
    }
}

impl Default for NonTrivialStringMovable {
    fn default() -> Self {
        Self::from_key(0)
    }
}

impl PartialEq for NonTrivialStringMovable {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NonTrivialStringMovable {}

impl PartialOrd for NonTrivialStringMovable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NonTrivialStringMovable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Owns a heap string. Declares that relocation never fails.
#[derive(Clone, Debug)]
pub struct NonTrivialStringMovableNoExcept {
    data: String,
    key: usize,
}

impl NonTrivialStringMovableNoExcept {
    /// The owned text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.data
    }
}

impl Value for NonTrivialStringMovableNoExcept {
    const CLASS: ValueClass = ValueClass::non_trivial(Movability::Infallible);

    fn from_key(key: usize) -> Self {
        Self {
            data: LONG_TEXT.to_owned(),
            key,
        }
    }

    fn key(&self) -> usize {
        self.key
    }
}

impl Default for NonTrivialStringMovableNoExcept {
    fn default() -> Self {
        Self::from_key(0)
    }
}

impl PartialEq for NonTrivialStringMovableNoExcept {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NonTrivialStringMovableNoExcept {}

impl PartialOrd for NonTrivialStringMovableNoExcept {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NonTrivialStringMovableNoExcept {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Fixed-size bytes with a destructor that touches the payload.
#[derive(Clone)]
#[repr(C, align(8))]
pub struct NonTrivialArray<const SIZE: usize> {
    bytes: [u8; SIZE],
}

impl<const SIZE: usize> Value for NonTrivialArray<SIZE> {
    const CLASS: ValueClass = ValueClass::non_trivial(Movability::Infallible);

    fn from_key(key: usize) -> Self {
        let mut bytes = [0; SIZE];

        if let Some(head) = bytes.first_chunk_mut::<KEY_BYTES>() {
            *head = key.to_ne_bytes();
        }

        Self { bytes }
    }

    fn key(&self) -> usize {
        self.bytes
            .first_chunk::<KEY_BYTES>()
            .map_or(0, |head| usize::from_ne_bytes(*head))
    }
}

impl<const SIZE: usize> Drop for NonTrivialArray<SIZE> {
    fn drop(&mut self) {
        self.bytes.fill(0);
        black_box(&mut self.bytes);
    }
}

impl<const SIZE: usize> Default for NonTrivialArray<SIZE> {
    fn default() -> Self {
        Self { bytes: [0; SIZE] }
    }
}

impl<const SIZE: usize> PartialEq for NonTrivialArray<SIZE> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<const SIZE: usize> Eq for NonTrivialArray<SIZE> {}

impl<const SIZE: usize> PartialOrd for NonTrivialArray<SIZE> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const SIZE: usize> Ord for NonTrivialArray<SIZE> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl<const SIZE: usize> Debug for NonTrivialArray<SIZE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonTrivialArray")
            .field("key", &self.key())
            .finish_non_exhaustive()
    }
}

/// 32 bytes with a destructor.
pub type NonTrivialArrayMedium = NonTrivialArray<32>;

const_assert!(is_trivial_of_size::<TrivialSmall>(8));
const_assert!(is_trivial_of_size::<TrivialMedium>(32));
const_assert!(is_trivial_of_size::<TrivialLarge>(128));
const_assert!(is_trivial_of_size::<TrivialHuge>(1024));
const_assert!(is_trivial_of_size::<TrivialMonster>(4096));
const_assert!(is_non_trivial_non_nothrow_movable::<NonTrivialStringMovable>());
const_assert!(is_non_trivial_nothrow_movable::<NonTrivialStringMovableNoExcept>());
const_assert!(is_non_trivial_of_size::<NonTrivialArrayMedium>(32));
const_assert!(is_small::<TrivialSmall>());
const_assert!(!is_small::<TrivialMedium>());

assert_impl_all!(TrivialSmall: Copy, Send, Sync);
assert_impl_all!(TrivialMedium: Copy);
assert_impl_all!(TrivialLarge: Copy);
assert_impl_all!(TrivialHuge: Copy);
assert_impl_all!(TrivialMonster: Copy);

/// Receives each catalog type in turn.
///
/// Types are not values, so walking the catalog is expressed as a visitor with a generic
/// method that is instantiated once per type.
pub trait TypeVisitor {
    /// Called once for each type in the catalog.
    fn visit<T: Value>(&mut self);
}

/// Presents every catalog type to `visitor`, in catalog order.
pub fn visit_catalog(visitor: &mut impl TypeVisitor) {
    visitor.visit::<TrivialSmall>();
    visitor.visit::<TrivialMedium>();
    visitor.visit::<TrivialLarge>();
    visitor.visit::<TrivialHuge>();
    visitor.visit::<TrivialMonster>();
    visitor.visit::<NonTrivialStringMovable>();
    visitor.visit::<NonTrivialStringMovableNoExcept>();
    visitor.visit::<NonTrivialArrayMedium>();
}
