use std::io::Write;

use tracing::info;

use crate::{
    Bencher, Config, Family, Graphs, ReportSink, Result, Settings, TypeVisitor, Value,
    type_label, visit_catalog,
};

/// Runs `families` for every type of the catalog, reporting into `sink`.
pub fn run_families<R: ReportSink>(sink: &mut R, families: &[Family], settings: Settings) {
    let mut bencher = Bencher::new(sink, settings);

    for &family in families {
        info!(family = family.name(), "running benchmark family");

        visit_catalog(&mut FamilyRunner {
            family,
            bencher: &mut bencher,
        });
    }
}

/// Runs everything `config` selects and writes the report to `out`.
///
/// # Errors
///
/// Returns an error if writing the report fails.
pub fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    let mut graphs = Graphs::new();

    run_families(&mut graphs, config.families(), config.settings());

    info!(
        graphs = graphs.graphs().len(),
        format = %config.format(),
        "writing report"
    );

    graphs.output(config.format(), out)
}

struct FamilyRunner<'b, 'r, R> {
    family: Family,
    bencher: &'b mut Bencher<'r, R>,
}

impl<R: ReportSink> TypeVisitor for FamilyRunner<'_, '_, R> {
    fn visit<T: Value>(&mut self) {
        info!(
            family = self.family.name(),
            value_type = %type_label::<T>(),
            "benchmarking element type"
        );

        self.family.run::<T, R>(self.bencher);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn runs_selected_family_for_every_catalog_type() {
        let config = Config::default()
            .with_families([Family::Destruction])
            .with_repetitions(1)
            .unwrap()
            .with_scale(100_000)
            .unwrap()
            .with_format(crate::Format::Csv);

        let mut out = Vec::new();
        run(&config, &mut out).unwrap();

        let report = String::from_utf8(out).unwrap();

        // Header plus 8 types x 4 series x 10 sizes.
        assert_eq!(report.lines().count(), 1 + 8 * 4 * 10);
        assert!(report.contains("destruction - Trivial<4096>,list_linear,1,"));
    }

    #[test]
    fn text_report_keeps_every_point_of_a_heavily_scaled_family() {
        let config = Config::default()
            .with_families([Family::FillFront])
            .with_repetitions(1)
            .unwrap()
            .with_scale(100_000)
            .unwrap();

        let mut out = Vec::new();
        run(&config, &mut out).unwrap();

        let report = String::from_utf8(out).unwrap();
        let first_table: Vec<&str> = report.lines().take_while(|line| !line.is_empty()).collect();

        // Title, header and one row per size.
        assert_eq!(first_table.len(), 2 + 10);
        assert_eq!(first_table[0], "fill_front - Trivial<8> (us)");

        let sizes: Vec<&str> = first_table[2..]
            .iter()
            .filter_map(|row| row.split_whitespace().next())
            .collect();
        assert_eq!(sizes, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
    }
}
