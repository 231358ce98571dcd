use std::fmt::{self, Display};
use std::hint::black_box;
use std::num::NonZero;
use std::time::Duration;

use bump_arena::ArenaCapacity;
use tracing::{debug, trace};

use crate::pal::{Platform, PlatformFacade};
use crate::{
    AllocStrategy, Chain, ContainerKind, Create, Creation, ReportSink, SizeList, Value,
    graph_key, graph_title, type_label,
};

/// Unit in which mean trial durations are reported.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TimeUnit {
    /// Whole microseconds.
    Microseconds,

    /// Whole milliseconds.
    Milliseconds,
}

impl TimeUnit {
    /// The symbol graphs label their values with.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
        }
    }

    /// Whole units in `duration`, rounded down and saturating at `u64::MAX`.
    #[must_use]
    pub fn count(self, duration: Duration) -> u64 {
        let units = match self {
            Self::Microseconds => duration.as_micros(),
            Self::Milliseconds => duration.as_millis(),
        };

        u64::try_from(units).unwrap_or(u64::MAX)
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Knobs that apply to every series of a run.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Settings {
    repetitions: NonZero<u32>,
    scale: NonZero<usize>,
}

impl Settings {
    /// Trials per measured point unless configured otherwise.
    pub const DEFAULT_REPETITIONS: NonZero<u32> = NonZero::new(7).unwrap();

    /// Creates settings with `repetitions` trials per point and every size divided by
    /// `scale`.
    #[must_use]
    pub const fn new(repetitions: NonZero<u32>, scale: NonZero<usize>) -> Self {
        Self { repetitions, scale }
    }

    /// Trials per measured point.
    #[must_use]
    pub const fn repetitions(&self) -> NonZero<u32> {
        self.repetitions
    }

    /// Divisor applied to every container size.
    #[must_use]
    pub const fn scale(&self) -> NonZero<usize> {
        self.scale
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REPETITIONS, NonZero::<usize>::MIN)
    }
}

/// Runs benchmark series and reports their mean durations to a [`ReportSink`].
///
/// A series measures one (element type, container kind, allocation strategy) combination at
/// every size of a [`SizeList`]. Each point is the mean of several independent trials. A trial
/// creates a fresh allocation scope and container, brings the container into its starting
/// state (not measured), runs the chain (measured) and then tears everything down again (not
/// measured).
///
/// # Examples
///
/// ```
/// use seq_bench::{
///     Bencher, Chain, Create, Graphs, Heap, Operation, Settings, SizeList, TimeUnit,
///     TrivialSmall, VecKind,
/// };
///
/// let mut graphs = Graphs::new();
/// let mut bencher = Bencher::new(&mut graphs, Settings::default());
///
/// bencher.graph::<TrivialSmall>("fill_back", TimeUnit::Microseconds);
/// bencher.series::<TrivialSmall, Heap, VecKind>(
///     "vector",
///     TimeUnit::Microseconds,
///     Create::Empty,
///     SizeList::new([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]),
///     &Chain::from(Operation::FillBack),
/// );
///
/// let graph = graphs.find("fill_back___Trivial_8_").unwrap();
/// assert_eq!(graph.find_series("vector").unwrap().points().len(), 10);
/// ```
#[derive(Debug)]
pub struct Bencher<'r, R> {
    sink: &'r mut R,
    settings: Settings,
    platform: PlatformFacade,
}

impl<'r, R: ReportSink> Bencher<'r, R> {
    /// Creates a bencher that reports to `sink`.
    #[must_use]
    pub fn new(sink: &'r mut R, settings: Settings) -> Self {
        Self::with_platform(sink, settings, PlatformFacade::real())
    }

    pub(crate) fn with_platform(
        sink: &'r mut R,
        settings: Settings,
        platform: PlatformFacade,
    ) -> Self {
        Self {
            sink,
            settings,
            platform,
        }
    }

    /// The settings every series uses.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Registers the graph for benchmark family `family` and element type `T`. Series run
    /// afterwards report into it.
    pub fn graph<T: Value>(&mut self, family: &str, unit: TimeUnit) {
        let title = graph_title::<T>(family);
        let key = graph_key(&title);

        debug!(%key, %title, "registering graph");

        self.sink.new_graph(&key, &title, unit.symbol());
    }

    /// Measures `chain` on containers of kind `K` allocating per strategy `S`, holding
    /// elements of type `T`, at every size of `sizes` after scaling.
    ///
    /// Reports one result per size under the label `label`, with the mean trial duration in
    /// `unit` as the value and the size as the x value.
    pub fn series<T, S, K>(
        &mut self,
        label: &str,
        unit: TimeUnit,
        create: Create,
        sizes: SizeList,
        chain: &Chain,
    ) where
        T: Value,
        S: AllocStrategy,
        K: ContainerKind<S>,
    {
        let sizes = sizes.scaled_down(self.settings.scale());
        let repetitions = self.settings.repetitions();
        let mut creation = Creation::new(create);

        debug!(
            label,
            value_type = %type_label::<T>(),
            ?create,
            operations = ?chain.operations(),
            "running series"
        );

        for size in sizes.iter() {
            let total = (0..repetitions.get())
                .map(|_| self.trial::<T, S, K>(&mut creation, size, chain))
                .fold(Duration::ZERO, Duration::saturating_add);

            let mean = total
                .checked_div(repetitions.get())
                .expect("repetition count is non-zero by construction");

            trace!(label, size, ?mean, "measured point");

            self.sink
                .new_result(label, &size.to_string(), unit.count(mean));
        }
    }

    fn trial<T, S, K>(&self, creation: &mut Creation, size: usize, chain: &Chain) -> Duration
    where
        T: Value,
        S: AllocStrategy,
        K: ContainerKind<S>,
    {
        let scope = S::new_scope(ArenaCapacity::for_elements::<T>(K::NODE_OVERHEAD, size));
        let mut container = K::create::<T>(&scope);

        creation.fill::<T>(&mut container, size);

        let start = self.platform.now();
        chain.run::<T, _>(black_box(&mut container), size);
        let end = self.platform.now();

        // The container may borrow from the scope, so it must go first.
        drop(container);
        drop(scope);
        creation.clean();

        end.saturating_duration_since(start)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::pal::FakePlatform;
    use crate::{Graphs, Heap, Linear, ListKind, Operation, TrivialSmall, VecKind};

    const TINY: SizeList = SizeList::new([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

    fn settings(repetitions: u32, scale: usize) -> Settings {
        Settings::new(
            NonZero::new(repetitions).unwrap(),
            NonZero::new(scale).unwrap(),
        )
    }

    #[test]
    fn time_units_truncate() {
        let duration = Duration::from_micros(2_999);

        assert_eq!(TimeUnit::Microseconds.count(duration), 2_999);
        assert_eq!(TimeUnit::Milliseconds.count(duration), 2);
        assert_eq!(TimeUnit::Milliseconds.to_string(), "ms");
    }

    #[test]
    fn default_settings_run_seven_trials_unscaled() {
        let settings = Settings::default();

        assert_eq!(settings.repetitions().get(), 7);
        assert_eq!(settings.scale().get(), 1);
    }

    #[test]
    fn reports_mean_of_trials_per_size() {
        let fake = FakePlatform::new();

        // Two clock reads per trial: start, then end. Durations 10, 20, 30, 40 us.
        fake.queue_steps((1..=4).flat_map(|i| [Duration::ZERO, Duration::from_micros(10 * i)]));

        let mut graphs = Graphs::new();
        let mut bencher =
            Bencher::with_platform(&mut graphs, settings(4, 1), PlatformFacade::fake(fake.clone()));

        bencher.graph::<TrivialSmall>("fill_back", TimeUnit::Microseconds);
        bencher.series::<TrivialSmall, Heap, VecKind>(
            "vector",
            TimeUnit::Microseconds,
            Create::Empty,
            TINY,
            &Chain::from(Operation::FillBack),
        );

        assert_eq!(fake.reads(), 2 * 4 * SizeList::LEN);

        let graph = graphs.find("fill_back___Trivial_8_").unwrap();
        assert_eq!(graph.unit(), "us");

        let points = graph.find_series("vector").unwrap().points();
        assert_eq!(points.len(), SizeList::LEN);

        // The first size consumes the scripted steps, later ones see a frozen clock.
        assert_eq!(points[0].x(), "1");
        assert_eq!(points[0].y(), 25);
        assert_eq!(points[9].x(), "10");
        assert_eq!(points[9].y(), 0);
    }

    fn fill_back_points(settings: Settings, fake: &FakePlatform) -> Graphs {
        let mut graphs = Graphs::new();
        let mut bencher =
            Bencher::with_platform(&mut graphs, settings, PlatformFacade::fake(fake.clone()));

        bencher.graph::<TrivialSmall>("fill_back", TimeUnit::Microseconds);
        bencher.series::<TrivialSmall, Heap, VecKind>(
            "vector",
            TimeUnit::Microseconds,
            Create::Empty,
            TINY,
            &Chain::from(Operation::FillBack),
        );

        graphs
    }

    #[test]
    fn default_settings_average_exactly_seven_trials() {
        let fake = FakePlatform::new();

        // Durations 10, 20, ..., 70 us for the first size, an eighth trial would add 80 us.
        fake.queue_steps((1..=8).flat_map(|i| [Duration::ZERO, Duration::from_micros(10 * i)]));

        let graphs = fill_back_points(Settings::default(), &fake);

        assert_eq!(fake.reads(), 2 * 7 * SizeList::LEN);

        let points = graphs.graphs()[0].series()[0].points();
        assert_eq!(points[0].y(), 40);
    }

    #[test]
    fn repetitions_change_only_the_values() {
        let fake = FakePlatform::new();
        let seven = fill_back_points(Settings::default(), &fake);
        let two = fill_back_points(settings(2, 1), &fake);

        let shape = |graphs: &Graphs| {
            graphs
                .graphs()
                .iter()
                .map(|graph| {
                    let series: Vec<_> = graph
                        .series()
                        .iter()
                        .map(|series| {
                            let xs: Vec<String> =
                                series.points().iter().map(|point| point.x().to_owned()).collect();
                            (series.label().to_owned(), xs)
                        })
                        .collect();
                    (graph.key().to_owned(), graph.title().to_owned(), series)
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(shape(&seven), shape(&two));
        assert_eq!(seven.graphs()[0].series()[0].points().len(), SizeList::LEN);
    }

    #[test]
    fn scale_divides_sizes() {
        let mut graphs = Graphs::new();
        let mut bencher = Bencher::new(&mut graphs, settings(1, 1000));

        bencher.graph::<TrivialSmall>("sort", TimeUnit::Milliseconds);
        bencher.series::<TrivialSmall, Heap, VecKind>(
            "vector",
            TimeUnit::Milliseconds,
            Create::FilledShuffled,
            SizeList::MEDIUM,
            &Chain::from(Operation::Sort),
        );

        let xs: Vec<_> = graphs.graphs()[0].series()[0]
            .points()
            .iter()
            .map(|point| point.x().to_owned())
            .collect();
        assert_eq!(xs, ["10", "20", "30", "40", "50", "60", "70", "80", "90", "100"]);
    }

    #[test]
    fn linear_series_runs_against_an_arena() {
        let mut graphs = Graphs::new();
        let mut bencher = Bencher::new(&mut graphs, settings(2, 1));

        bencher.graph::<TrivialSmall>("random_insert", TimeUnit::Milliseconds);
        bencher.series::<TrivialSmall, Linear, ListKind>(
            "list_linear",
            TimeUnit::Milliseconds,
            Create::FilledAscending,
            TINY,
            &Chain::from(Operation::RandomInsert),
        );

        let series = graphs.graphs()[0].find_series("list_linear").unwrap();
        assert_eq!(series.points().len(), SizeList::LEN);
    }
}
