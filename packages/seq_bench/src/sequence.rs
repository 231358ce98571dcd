use std::collections::VecDeque;

/// The operations a benchmark performs on a sequence container.
///
/// This is the seam that lets one benchmark body drive contiguous storage, a ring buffer and a
/// linked list alike. Implementations use the natural algorithm of their layout: positional
/// insertion shifts elements in contiguous storage but relinks nodes in a list, sorting is
/// in place for contiguous storage but a node merge sort for a list, and so on. Those
/// differences are exactly what the benchmarks measure.
pub trait Sequence<T> {
    /// Iterator over shared references to the elements, front to back.
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the container holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the elements, front to back.
    fn iter(&self) -> Self::Iter<'_>;

    /// Appends a value.
    fn push_back(&mut self, value: T);

    /// Appends a value that is constructed in place by `make`.
    fn emplace_back(&mut self, make: impl FnOnce() -> T);

    /// Prepends a value.
    fn push_front(&mut self, value: T);

    /// Prepends a value that is constructed in place by `make`.
    fn emplace_front(&mut self, make: impl FnOnce() -> T);

    /// Appends every value produced by `values`, in order.
    fn extend_back(&mut self, values: impl IntoIterator<Item = T>);

    /// Prepares room for `additional` more elements, if the layout has a notion of capacity.
    fn reserve(&mut self, _additional: usize) {}

    /// Whether any element matches `predicate`.
    fn contains_where(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.iter().any(predicate)
    }

    /// Inserts `value` before the first element matching `predicate`, or at the back if none
    /// matches.
    fn insert_where(&mut self, predicate: impl FnMut(&T) -> bool, value: T);

    /// Removes and returns the first element matching `predicate`.
    fn remove_where(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T>;

    /// Sorts the elements in ascending order.
    fn sort(&mut self)
    where
        T: Ord;

    /// Drops every element and gives back the storage the container holds.
    fn release(&mut self);
}

impl<T> Sequence<T> for Vec<T> {
    type Iter<'a>
        = std::slice::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter()
    }

    #[inline]
    fn push_back(&mut self, value: T) {
        Vec::push(self, value);
    }

    #[inline]
    fn emplace_back(&mut self, make: impl FnOnce() -> T) {
        Vec::push(self, make());
    }

    #[inline]
    fn push_front(&mut self, value: T) {
        Vec::insert(self, 0, value);
    }

    #[inline]
    fn emplace_front(&mut self, make: impl FnOnce() -> T) {
        Vec::insert(self, 0, make());
    }

    fn extend_back(&mut self, values: impl IntoIterator<Item = T>) {
        Extend::extend(self, values);
    }

    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional);
    }

    fn insert_where(&mut self, predicate: impl FnMut(&T) -> bool, value: T) {
        let index = self
            .as_slice()
            .iter()
            .position(predicate)
            .unwrap_or(Vec::len(self));

        Vec::insert(self, index, value);
    }

    fn remove_where(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        let index = self.as_slice().iter().position(predicate)?;

        Some(Vec::remove(self, index))
    }

    fn sort(&mut self)
    where
        T: Ord,
    {
        self.as_mut_slice().sort_unstable();
    }

    fn release(&mut self) {
        *self = Self::new();
    }
}

impl<T> Sequence<T> for VecDeque<T> {
    type Iter<'a>
        = std::collections::vec_deque::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        VecDeque::iter(self)
    }

    #[inline]
    fn push_back(&mut self, value: T) {
        VecDeque::push_back(self, value);
    }

    #[inline]
    fn emplace_back(&mut self, make: impl FnOnce() -> T) {
        VecDeque::push_back(self, make());
    }

    #[inline]
    fn push_front(&mut self, value: T) {
        VecDeque::push_front(self, value);
    }

    #[inline]
    fn emplace_front(&mut self, make: impl FnOnce() -> T) {
        VecDeque::push_front(self, make());
    }

    fn extend_back(&mut self, values: impl IntoIterator<Item = T>) {
        Extend::extend(self, values);
    }

    fn insert_where(&mut self, predicate: impl FnMut(&T) -> bool, value: T) {
        let index = VecDeque::iter(self)
            .position(predicate)
            .unwrap_or(VecDeque::len(self));

        VecDeque::insert(self, index, value);
    }

    fn remove_where(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        let index = VecDeque::iter(self).position(predicate)?;

        VecDeque::remove(self, index)
    }

    fn sort(&mut self)
    where
        T: Ord,
    {
        self.make_contiguous().sort_unstable();
    }

    fn release(&mut self) {
        *self = Self::new();
    }
}
