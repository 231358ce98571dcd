//! Runs benchmark families through the public entry points at a drastically reduced scale and
//! checks the shape of what gets reported.

use seq_bench::{
    Config, Family, Format, Graphs, ReportSink, Settings, TypeVisitor, Value, is_small,
    is_trivial_of_size, run, run_families, type_label, visit_catalog,
};

/// Divides the largest size lists down to 1..=10 elements.
const SCALE: usize = 100_000;

fn quick_settings() -> Settings {
    Config::default()
        .with_repetitions(1)
        .unwrap()
        .with_scale(SCALE)
        .unwrap()
        .settings()
}

#[test]
fn fill_back_reports_nine_series_per_type() {
    let mut graphs = Graphs::new();
    run_families(&mut graphs, &[Family::FillBack], quick_settings());

    // One graph per catalog type.
    assert_eq!(graphs.graphs().len(), 8);

    for graph in graphs.graphs() {
        assert!(graph.title().starts_with("fill_back - "));
        assert_eq!(graph.unit(), "us");
        assert_eq!(graph.series().len(), 9);

        for series in graph.series() {
            let xs: Vec<&str> = series.points().iter().map(|point| point.x()).collect();
            assert_eq!(xs, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
        }
    }
}

#[test]
fn number_crunching_registers_graphs_only_for_small_plain_types() {
    let mut graphs = Graphs::new();
    run_families(&mut graphs, &[Family::NumberCrunching], quick_settings());

    let titles: Vec<&str> = graphs.graphs().iter().map(|graph| graph.title()).collect();
    assert_eq!(
        titles,
        [
            "number_crunching - Trivial<8>",
            "number_crunching - Trivial<32>"
        ]
    );

    for graph in graphs.graphs() {
        assert_eq!(graph.unit(), "ms");
    }
}

#[test]
fn front_insertion_graphs_include_vector_only_for_small_types() {
    struct Expectation(Vec<(String, bool)>);

    impl TypeVisitor for Expectation {
        fn visit<T: Value>(&mut self) {
            self.0.push((
                format!("fill_front - {}", type_label::<T>()),
                is_small::<T>(),
            ));
        }
    }

    let mut expectation = Expectation(Vec::new());
    visit_catalog(&mut expectation);

    let mut graphs = Graphs::new();
    run_families(&mut graphs, &[Family::FillFront], quick_settings());

    for (title, small) in expectation.0 {
        let graph = graphs
            .graphs()
            .iter()
            .find(|graph| graph.title() == title)
            .unwrap();

        assert_eq!(graph.find_series("vector").is_some(), small, "{title}");
        assert!(graph.find_series("list_linear").is_some(), "{title}");
    }
}

#[test]
fn catalog_contains_both_small_trivial_types() {
    struct CountSmallTrivial(usize);

    impl TypeVisitor for CountSmallTrivial {
        fn visit<T: Value>(&mut self) {
            if is_trivial_of_size::<T>(8) || is_trivial_of_size::<T>(32) {
                self.0 += 1;
            }
        }
    }

    let mut counter = CountSmallTrivial(0);
    visit_catalog(&mut counter);

    assert_eq!(counter.0, 2);
}

#[test]
fn csv_report_through_run() {
    let config = Config::default()
        .with_families([Family::LinearSearch])
        .with_format(Format::Csv)
        .with_repetitions(1)
        .unwrap()
        // Linear search sizes are 1000..10000, this brings them to 1..10.
        .with_scale(1000)
        .unwrap();

    let mut out = Vec::new();
    run(&config, &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    let mut lines = report.lines();
    assert_eq!(lines.next(), Some("graph,series,x,y"));

    // 8 types, each with vector, list, deque and list_linear.
    assert_eq!(lines.clone().count(), 8 * 4 * 10);

    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 4, "{line}");
        assert!(fields[0].starts_with("linear_search - "), "{line}");
        assert!(fields[3].parse::<u64>().is_ok(), "{line}");
    }
}

#[test]
fn custom_sink_sees_graphs_before_their_results() {
    #[derive(Default)]
    struct Recorder {
        graphs: usize,
        results_before_first_graph: usize,
        results: usize,
    }

    impl ReportSink for Recorder {
        fn new_graph(&mut self, _key: &str, _title: &str, _unit: &str) {
            self.graphs += 1;
        }

        fn new_result(&mut self, _series: &str, _x: &str, _y: u64) {
            if self.graphs == 0 {
                self.results_before_first_graph += 1;
            }
            self.results += 1;
        }
    }

    let mut recorder = Recorder::default();
    run_families(&mut recorder, &[Family::Sort], quick_settings());

    assert_eq!(recorder.graphs, 8);
    assert_eq!(recorder.results_before_first_graph, 0);
    assert_eq!(recorder.results, 8 * 4 * 10);
}
