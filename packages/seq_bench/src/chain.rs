use crate::{Operation, Sequence, Value};

/// An ordered composition of operations, measured as one unit.
///
/// # Examples
///
/// ```
/// use seq_bench::{Chain, Operation, TrivialSmall, Value};
///
/// let chain = Chain::new([Operation::Reserve, Operation::FillBack]);
///
/// let mut vec: Vec<TrivialSmall> = Vec::new();
/// chain.run(&mut vec, 3);
///
/// assert_eq!(vec.iter().map(Value::key).collect::<Vec<_>>(), [0, 1, 2]);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Chain {
    operations: Vec<Operation>,
}

impl Chain {
    /// Creates a chain that applies `operations` in order.
    #[must_use]
    pub fn new(operations: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            operations: operations.into_iter().collect(),
        }
    }

    /// The operations, in application order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Applies every operation to `container` in order, with nominal size `size`.
    #[inline]
    pub fn run<T: Value, C: Sequence<T>>(&self, container: &mut C, size: usize) {
        for operation in &self.operations {
            operation.apply(container, size);
        }
    }
}

impl From<Operation> for Chain {
    fn from(operation: Operation) -> Self {
        Self::new([operation])
    }
}

impl FromIterator<Operation> for Chain {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::VecDeque;

    use bump_arena::{Arena, ArenaCapacity};

    use super::*;
    use crate::{Create, Creation, List, NODE_OVERHEAD, TrivialSmall};

    /// Fills two fresh containers the same way, runs `chain` on both and returns their keys.
    fn run_twice<C: Sequence<TrivialSmall>>(
        mut make: impl FnMut() -> C,
        create: Create,
        chain: &Chain,
        size: usize,
    ) -> (Vec<usize>, Vec<usize>) {
        let mut creation = Creation::new(create);
        let mut keys = || {
            let mut container = make();
            creation.fill::<TrivialSmall>(&mut container, size);
            chain.run(&mut container, size);
            creation.clean();
            container.iter().map(Value::key).collect::<Vec<_>>()
        };

        (keys(), keys())
    }

    #[test]
    fn empty_chain_does_nothing() {
        let mut vec = vec![TrivialSmall::from_key(1)];

        Chain::default().run(&mut vec, 10);

        assert_eq!(vec.len(), 1);
    }

    #[test]
    fn operations_apply_in_order() {
        let chain: Chain = [Operation::FillFront, Operation::Sort, Operation::FillBack]
            .into_iter()
            .collect();
        let mut list: List<TrivialSmall> = List::new();

        chain.run(&mut list, 3);

        let keys: Vec<_> = list.iter().map(Value::key).collect();
        assert_eq!(keys, [0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn chain_ending_in_destroy_leaves_nothing() {
        let chain = Chain::new([Operation::FillBack, Operation::Destroy]);
        let mut vec: Vec<TrivialSmall> = Vec::new();

        chain.run(&mut vec, 50);

        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn single_operation_converts_into_chain() {
        assert_eq!(
            Chain::from(Operation::Sort).operations(),
            [Operation::Sort]
        );
    }

    #[test]
    fn same_chain_gives_same_contents_for_every_kind() {
        let size = 200;
        let cases = [
            (Create::FilledShuffled, Chain::from(Operation::Sort)),
            (Create::Empty, Chain::from(Operation::FillBack)),
            (
                Create::FilledAscending,
                Chain::new([Operation::FillFront, Operation::Sort]),
            ),
        ];

        for (create, chain) in &cases {
            let (first, second) = run_twice(Vec::new, *create, chain, size);
            assert_eq!(first, second);

            let (first_deque, second_deque) = run_twice(VecDeque::new, *create, chain, size);
            assert_eq!(first_deque, second_deque);
            assert_eq!(first_deque, first);

            let (first_list, second_list) = run_twice(List::new, *create, chain, size);
            assert_eq!(first_list, second_list);
            assert_eq!(first_list, first);

            let capacity = ArenaCapacity::for_elements::<TrivialSmall>(NODE_OVERHEAD, 2 * size);
            let first_arena = Arena::with_capacity(capacity);
            let second_arena = Arena::with_capacity(capacity);
            let mut arenas = [&first_arena, &second_arena].into_iter();
            let (first_linear, second_linear) = run_twice(
                || List::new_in(arenas.next().expect("two arenas for two runs").allocator()),
                *create,
                chain,
                size,
            );
            assert_eq!(first_linear, second_linear);
            assert_eq!(first_linear, first);
        }
    }
}
