/// Receives benchmark results as they are produced.
///
/// Results always belong to the graph registered most recently, so a graph must be registered
/// before any result is reported for it.
pub trait ReportSink {
    /// Registers a new graph and makes it the target of subsequent results.
    fn new_graph(&mut self, key: &str, title: &str, unit: &str);

    /// Adds one measurement to the series `series` of the current graph.
    fn new_result(&mut self, series: &str, x: &str, y: u64);
}

/// One measured point of a series.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Point {
    x: String,
    y: u64,
}

impl Point {
    /// The x value, typically the container size.
    #[must_use]
    pub fn x(&self) -> &str {
        &self.x
    }

    /// The measured value, in the unit of the graph.
    #[must_use]
    pub fn y(&self) -> u64 {
        self.y
    }
}

/// The points measured for one series label within a graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Series {
    label: String,
    points: Vec<Point>,
}

impl Series {
    /// The label identifying this series within its graph.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The points, in the order they were reported.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// A titled collection of series sharing a unit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Graph {
    key: String,
    title: String,
    unit: String,
    series: Vec<Series>,
}

impl Graph {
    /// Identifier safe for use in file names and markup.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unit of every y value in the graph.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// The series, in the order they first reported a result.
    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// The series with the given label, if it reported any result.
    #[must_use]
    pub fn find_series(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|series| series.label == label)
    }

    /// Every distinct x value across all series, in first-seen order.
    #[must_use]
    pub fn x_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = Vec::new();

        for point in self.series.iter().flat_map(|series| &series.points) {
            if !values.contains(&point.x.as_str()) {
                values.push(&point.x);
            }
        }

        values
    }
}

/// Collects results into graphs in memory, for rendering once the run completes.
///
/// # Examples
///
/// ```
/// use seq_bench::{Graphs, ReportSink};
///
/// let mut graphs = Graphs::new();
/// graphs.new_graph("sort___Trivial_8_", "sort - Trivial<8>", "ms");
/// graphs.new_result("vector", "1000", 3);
/// graphs.new_result("vector", "2000", 7);
///
/// let graph = graphs.find("sort___Trivial_8_").unwrap();
/// assert_eq!(graph.find_series("vector").unwrap().points().len(), 2);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graphs {
    graphs: Vec<Graph>,
}

impl Graphs {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All graphs, in registration order.
    #[must_use]
    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    /// The graph registered under `key`, if any.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Graph> {
        self.graphs.iter().find(|graph| graph.key == key)
    }

    /// Whether no graph has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl ReportSink for Graphs {
    fn new_graph(&mut self, key: &str, title: &str, unit: &str) {
        self.graphs.push(Graph {
            key: key.to_owned(),
            title: title.to_owned(),
            unit: unit.to_owned(),
            series: Vec::new(),
        });
    }

    fn new_result(&mut self, series: &str, x: &str, y: u64) {
        let graph = self
            .graphs
            .last_mut()
            .expect("a graph must be registered before results are reported for it");

        let point = Point {
            x: x.to_owned(),
            y,
        };

        match graph.series.iter_mut().find(|s| s.label == series) {
            Some(existing) => existing.points.push(point),
            None => graph.series.push(Series {
                label: series.to_owned(),
                points: vec![point],
            }),
        }
    }
}
