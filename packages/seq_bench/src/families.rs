//! The fixed benchmark plan: which series each family measures, and how.

use std::fmt::{self, Display};
use std::str::FromStr;

use itertools::Itertools;
use tracing::debug;

use crate::{
    Bencher, Chain, Create, DequeKind, Error, Heap, Linear, ListKind, Operation, ReportSink,
    SizeList, TimeUnit, Value, VecKind, is_small, is_trivial_of_size, type_label,
};

/// A named group of benchmark series, reported as one graph per element type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Family {
    /// Appending one element at a time, through several insertion styles.
    FillBack,

    /// Appending default elements constructed in place.
    EmplaceBack,

    /// Prepending one element at a time.
    FillFront,

    /// Prepending default elements constructed in place.
    EmplaceFront,

    /// Repeated full scans for a missing key.
    LinearSearch,

    /// Insertions at random positions of a filled container.
    RandomInsert,

    /// Removals from random positions of a filled container.
    RandomRemove,

    /// Sorting a shuffled container.
    Sort,

    /// Dropping a filled container.
    Destruction,

    /// Growing a container from empty while keeping it sorted.
    NumberCrunching,
}

impl Family {
    /// Every family, in run order.
    pub const ALL: [Self; 10] = [
        Self::FillBack,
        Self::EmplaceBack,
        Self::FillFront,
        Self::EmplaceFront,
        Self::LinearSearch,
        Self::RandomInsert,
        Self::RandomRemove,
        Self::Sort,
        Self::Destruction,
        Self::NumberCrunching,
    ];

    /// The name used in graph titles and to select the family.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FillBack => "fill_back",
            Self::EmplaceBack => "emplace_back",
            Self::FillFront => "fill_front",
            Self::EmplaceFront => "emplace_front",
            Self::LinearSearch => "linear_search",
            Self::RandomInsert => "random_insert",
            Self::RandomRemove => "random_remove",
            Self::Sort => "sort",
            Self::Destruction => "destruction",
            Self::NumberCrunching => "number_crunching",
        }
    }

    /// The unit this family reports in.
    #[must_use]
    pub const fn unit(self) -> TimeUnit {
        match self {
            Self::FillBack
            | Self::EmplaceBack
            | Self::FillFront
            | Self::EmplaceFront
            | Self::LinearSearch
            | Self::Destruction => TimeUnit::Microseconds,
            Self::RandomInsert | Self::RandomRemove | Self::Sort | Self::NumberCrunching => {
                TimeUnit::Milliseconds
            }
        }
    }

    /// The sizes this family measures at, before scaling.
    #[must_use]
    pub const fn sizes(self) -> SizeList {
        match self {
            Self::FillBack | Self::EmplaceBack | Self::Sort | Self::Destruction => {
                SizeList::LARGE
            }
            Self::FillFront
            | Self::EmplaceFront
            | Self::RandomInsert
            | Self::RandomRemove
            | Self::NumberCrunching => SizeList::MEDIUM,
            Self::LinearSearch => SizeList::SMALL,
        }
    }

    /// How containers are filled before the measured work starts.
    #[must_use]
    pub const fn create(self) -> Create {
        match self {
            Self::LinearSearch | Self::RandomInsert | Self::RandomRemove => {
                Create::FilledAscending
            }
            Self::Sort => Create::FilledShuffled,
            Self::Destruction => Create::SmartFilled,
            Self::FillBack
            | Self::EmplaceBack
            | Self::FillFront
            | Self::EmplaceFront
            | Self::NumberCrunching => Create::Empty,
        }
    }

    /// The measured work of the family's standard series.
    #[must_use]
    pub fn chain(self) -> Chain {
        match self {
            Self::FillBack => Chain::from(Operation::FillBack),
            Self::EmplaceBack => Chain::from(Operation::EmplaceBack),
            Self::FillFront => Chain::from(Operation::FillFront),
            Self::EmplaceFront => Chain::from(Operation::EmplaceFront),
            Self::LinearSearch => Chain::from(Operation::LinearSearch),
            Self::RandomInsert => Chain::from(Operation::RandomInsert),
            Self::RandomRemove => Chain::from(Operation::RandomRemove),
            Self::Sort => Chain::from(Operation::Sort),
            Self::Destruction => Chain::from(Operation::Destroy),
            Self::NumberCrunching => Chain::from(Operation::RandomSortedInsert),
        }
    }

    /// Whether the family measures anything for element type `T`.
    ///
    /// Sorted insertion is quadratic, so it is only run for small plain types.
    #[must_use]
    pub const fn applies_to<T: Value>(self) -> bool {
        match self {
            Self::NumberCrunching => is_trivial_of_size::<T>(8) || is_trivial_of_size::<T>(32),
            _ => true,
        }
    }

    /// Registers the graph for `T` and runs every series of the family into it.
    ///
    /// Does nothing, not even register a graph, if the family does not apply to `T`.
    pub fn run<T: Value, R: ReportSink>(self, bencher: &mut Bencher<'_, R>) {
        if !self.applies_to::<T>() {
            debug!(family = self.name(), value_type = %type_label::<T>(), "family skipped");
            return;
        }

        let unit = self.unit();
        let sizes = self.sizes();
        let create = self.create();
        let chain = self.chain();

        bencher.graph::<T>(self.name(), unit);

        let include_vector = match self {
            // Every front insertion shifts the whole vector, affordable only for small types.
            Self::FillFront | Self::EmplaceFront => is_small::<T>(),
            _ => true,
        };

        if include_vector {
            bencher.series::<T, Heap, VecKind>("vector", unit, create, sizes, &chain);
        }

        bencher.series::<T, Heap, ListKind>("list", unit, create, sizes, &chain);
        bencher.series::<T, Heap, DequeKind>("deque", unit, create, sizes, &chain);

        if self == Self::FillBack {
            bencher.series::<T, Heap, VecKind>(
                "vector_reserve",
                unit,
                create,
                sizes,
                &Chain::new([Operation::Reserve, Operation::FillBack]),
            );
        }

        bencher.series::<T, Linear, ListKind>("list_linear", unit, create, sizes, &chain);

        if self == Self::FillBack {
            let extend = Chain::from(Operation::FillBackExtend);

            bencher.series::<T, Heap, VecKind>("vector_inserter", unit, create, sizes, &extend);
            bencher.series::<T, Heap, ListKind>("list_inserter", unit, create, sizes, &extend);
            bencher.series::<T, Heap, DequeKind>("deque_inserter", unit, create, sizes, &extend);
            bencher.series::<T, Linear, ListKind>(
                "list_inserter_linear",
                unit,
                create,
                sizes,
                &extend,
            );
        }
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.name() == s)
            .ok_or_else(|| Error::UnknownFamily {
                name: s.to_owned(),
                expected: Self::ALL.iter().join(", "),
            })
    }
}
