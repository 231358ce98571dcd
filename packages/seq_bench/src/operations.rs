use std::hint::black_box;

use rand::Rng;

use crate::{Sequence, Value};

/// How many random insertions or removals one [`Operation::RandomInsert`] or
/// [`Operation::RandomRemove`] performs, independent of the container size.
pub const RANDOM_OPERATIONS: usize = 1000;

/// One unit of measured work applied to a container of nominal size `N`.
///
/// Operations are combined into a [`Chain`][crate::Chain] and applied in order. Each one is
/// written once against [`Sequence`] and works with every container layout.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Operation {
    /// Does nothing.
    NoOp,

    /// Reserves room for `N` elements, where the layout supports it.
    Reserve,

    /// Appends `N` values with ascending keys, one at a time.
    FillBack,

    /// Appends `N` values with ascending keys through one bulk extension.
    FillBackExtend,

    /// Appends `N` default values, each constructed in place.
    EmplaceBack,

    /// Prepends `N` values with ascending keys.
    FillFront,

    /// Prepends `N` default values, each constructed in place.
    EmplaceFront,

    /// Scans the container `N` times for a key it does not hold.
    LinearSearch,

    /// Inserts [`RANDOM_OPERATIONS`] values, each before the first element with the same
    /// random key.
    RandomInsert,

    /// Removes the first element with a random key, [`RANDOM_OPERATIONS`] times.
    RandomRemove,

    /// Sorts the container.
    Sort,

    /// Drops every element and releases the storage.
    Destroy,

    /// Inserts `N` values with random keys, each before the first larger element, keeping an
    /// ascending container ascending.
    RandomSortedInsert,
}

impl Operation {
    /// Applies the operation to `container`, treating `size` as the nominal size `N`.
    pub fn apply<T: Value, C: Sequence<T>>(self, container: &mut C, size: usize) {
        match self {
            Self::NoOp => {}
            Self::Reserve => container.reserve(size),
            Self::FillBack => fill_back(container, size),
            Self::FillBackExtend => container.extend_back((0..size).map(T::from_key)),
            Self::EmplaceBack => {
                for _ in 0..size {
                    container.emplace_back(T::default);
                }
            }
            Self::FillFront => {
                for key in 0..size {
                    container.push_front(T::from_key(key));
                }
            }
            Self::EmplaceFront => {
                for _ in 0..size {
                    container.emplace_front(T::default);
                }
            }
            Self::LinearSearch => linear_search(container, size),
            Self::RandomInsert => random_insert(container, size),
            Self::RandomRemove => random_remove(container, size),
            Self::Sort => container.sort(),
            Self::Destroy => container.release(),
            Self::RandomSortedInsert => random_sorted_insert(container, size),
        }
    }
}

fn fill_back<T: Value>(container: &mut impl Sequence<T>, size: usize) {
    for key in 0..size {
        container.push_back(T::from_key(key));
    }
}

fn linear_search<T: Value>(container: &mut impl Sequence<T>, size: usize) {
    // Keys of a filled container are 0..size, so this one is never found.
    let absent = size;

    for _ in 0..size {
        black_box(container.contains_where(|value| value.key() == absent));
    }
}

fn random_insert<T: Value>(container: &mut impl Sequence<T>, size: usize) {
    let mut rng = rand::rng();
    let bound = size.max(1);

    for _ in 0..RANDOM_OPERATIONS {
        let key = rng.random_range(0..bound);
        container.insert_where(|value| value.key() == key, T::from_key(key));
    }
}

fn random_remove<T: Value>(container: &mut impl Sequence<T>, size: usize) {
    let mut rng = rand::rng();
    let bound = size.max(1);

    for _ in 0..RANDOM_OPERATIONS {
        let key = rng.random_range(0..bound);
        drop(black_box(container.remove_where(|value| value.key() == key)));
    }
}

fn random_sorted_insert<T: Value>(container: &mut impl Sequence<T>, size: usize) {
    let mut rng = rand::rng();
    let bound = size.max(1);

    for _ in 0..size {
        let key = rng.random_range(0..bound);
        container.insert_where(|value| value.key() > key, T::from_key(key));
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{List, TrivialSmall};

    fn keys<C: Sequence<TrivialSmall>>(container: &C) -> Vec<usize> {
        container.iter().map(Value::key).collect()
    }

    fn ascending(size: usize) -> Vec<TrivialSmall> {
        (0..size).map(TrivialSmall::from_key).collect()
    }

    #[test]
    fn fills_produce_expected_order() {
        let mut back: Vec<TrivialSmall> = Vec::new();
        Operation::FillBack.apply(&mut back, 4);
        assert_eq!(keys(&back), [0, 1, 2, 3]);

        let mut extended: List<TrivialSmall> = List::new();
        Operation::FillBackExtend.apply(&mut extended, 4);
        assert_eq!(keys(&extended), [0, 1, 2, 3]);

        let mut front: VecDeque<TrivialSmall> = VecDeque::new();
        Operation::FillFront.apply(&mut front, 4);
        assert_eq!(keys(&front), [3, 2, 1, 0]);
    }

    #[test]
    fn emplacement_adds_default_values() {
        let mut back: Vec<TrivialSmall> = Vec::new();
        Operation::EmplaceBack.apply(&mut back, 3);
        assert_eq!(keys(&back), [0, 0, 0]);

        let mut front: List<TrivialSmall> = List::new();
        Operation::EmplaceFront.apply(&mut front, 2);
        assert_eq!(keys(&front), [0, 0]);
    }

    #[test]
    fn reserve_and_noop_leave_contents_alone() {
        let mut vec = ascending(3);

        Operation::Reserve.apply(&mut vec, 100);
        Operation::NoOp.apply(&mut vec, 100);

        assert!(vec.capacity() >= 100);
        assert_eq!(keys(&vec), [0, 1, 2]);
    }

    #[test]
    fn linear_search_does_not_modify() {
        let mut vec = ascending(10);

        Operation::LinearSearch.apply(&mut vec, 10);

        assert_eq!(keys(&vec), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn random_insert_adds_fixed_number_of_elements() {
        let mut list: List<TrivialSmall> = ascending(50).into_iter().collect();

        Operation::RandomInsert.apply(&mut list, 50);

        assert_eq!(list.len(), 50 + RANDOM_OPERATIONS);
        // Each value goes before an existing equal key, so order is preserved.
        assert!(keys(&list).is_sorted());
    }

    #[test]
    fn random_remove_never_underflows() {
        let mut vec = ascending(10);

        Operation::RandomRemove.apply(&mut vec, 10);

        assert!(vec.is_empty());
    }

    #[test]
    fn random_remove_on_empty_container_is_harmless() {
        let mut deque: VecDeque<TrivialSmall> = VecDeque::new();

        Operation::RandomRemove.apply(&mut deque, 0);

        assert!(deque.is_empty());
    }

    #[test]
    fn sort_orders_shuffled_keys() {
        let mut deque: VecDeque<TrivialSmall> =
            [5, 3, 9, 1].into_iter().map(TrivialSmall::from_key).collect();

        Operation::Sort.apply(&mut deque, 4);

        assert_eq!(keys(&deque), [1, 3, 5, 9]);
    }

    #[test]
    fn destroy_empties_container() {
        let mut list: List<TrivialSmall> = ascending(20).into_iter().collect();

        Operation::Destroy.apply(&mut list, 20);

        assert!(list.is_empty());
    }

    #[test]
    fn random_sorted_insert_keeps_order() {
        let mut vec: Vec<TrivialSmall> = Vec::new();

        Operation::RandomSortedInsert.apply(&mut vec, 200);

        assert_eq!(vec.len(), 200);
        assert!(keys(&vec).is_sorted());
    }
}
