use std::fmt::{self, Display};
use std::io::Write;
use std::str::FromStr;

use itertools::Itertools;

use crate::{Error, Graph, Graphs, Result};

/// How collected graphs are written out.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Format {
    /// Aligned plain-text tables, one per graph.
    #[default]
    Text,

    /// One `graph,series,x,y` record per measurement.
    Csv,

    /// A standalone page drawing every graph as a line chart.
    Html,
}

impl Format {
    /// Every format, in the order they are listed to users.
    pub const ALL: [Self; 3] = [Self::Text, Self::Csv, Self::Html];

    /// The name used to select this format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidFormat {
                value: s.to_owned(),
                expected: Self::ALL.iter().join(", "),
            })
    }
}

impl Graphs {
    /// Writes every graph to `out` in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn output(&self, format: Format, out: &mut impl Write) -> Result<()> {
        match format {
            Format::Text => write_text(self, out)?,
            Format::Csv => write_csv(self, out)?,
            Format::Html => write_html(self, out)?,
        }

        out.flush()?;
        Ok(())
    }
}

fn y_at(graph: &Graph, series_index: usize, x: &str) -> Option<u64> {
    graph
        .series()
        .get(series_index)?
        .points()
        .iter()
        .find(|point| point.x() == x)
        .map(|point| point.y())
}

fn write_text(graphs: &Graphs, out: &mut impl Write) -> std::io::Result<()> {
    for graph in graphs.graphs() {
        writeln!(out, "{} ({})", graph.title(), graph.unit())?;

        let x_values = graph.x_values();
        let x_width = x_values
            .iter()
            .map(|x| x.len())
            .chain([4])
            .max()
            .unwrap_or_default();

        let widths: Vec<usize> = graph
            .series()
            .iter()
            .enumerate()
            .map(|(index, series)| {
                x_values
                    .iter()
                    .filter_map(|x| y_at(graph, index, x))
                    .map(|y| y.to_string().len())
                    .chain([series.label().len()])
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        write!(out, "{:>x_width$}", "size")?;
        for (series, width) in graph.series().iter().zip(widths.iter().copied()) {
            write!(out, "  {:>width$}", series.label())?;
        }
        writeln!(out)?;

        for x in &x_values {
            write!(out, "{x:>x_width$}")?;
            for (index, width) in widths.iter().copied().enumerate() {
                match y_at(graph, index, x) {
                    Some(y) => write!(out, "  {y:>width$}")?,
                    None => write!(out, "  {:>width$}", "-")?,
                }
            }
            writeln!(out)?;
        }

        writeln!(out)?;
    }

    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

fn write_csv(graphs: &Graphs, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "graph,series,x,y")?;

    for graph in graphs.graphs() {
        for series in graph.series() {
            for point in series.points() {
                writeln!(
                    out,
                    "{},{},{},{}",
                    csv_field(graph.title()),
                    csv_field(series.label()),
                    csv_field(point.x()),
                    point.y()
                )?;
            }
        }
    }

    Ok(())
}

fn js_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn write_html(graphs: &Graphs, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Sequence container benchmarks</title>")?;
    writeln!(
        out,
        "<script src=\"https://www.gstatic.com/charts/loader.js\"></script>"
    )?;
    writeln!(out, "<script>")?;
    writeln!(
        out,
        "google.charts.load('current', {{packages: ['corechart']}});"
    )?;
    writeln!(out, "google.charts.setOnLoadCallback(function () {{")?;

    for graph in graphs.graphs() {
        let header = ["'size'".to_owned()]
            .into_iter()
            .chain(graph.series().iter().map(|s| js_string(s.label())))
            .join(", ");

        writeln!(out, "  new google.visualization.LineChart(")?;
        writeln!(out, "    document.getElementById({})", js_string(graph.key()))?;
        writeln!(out, "  ).draw(google.visualization.arrayToDataTable([")?;
        writeln!(out, "    [{header}],")?;

        for x in graph.x_values() {
            let row = [js_string(x)]
                .into_iter()
                .chain((0..graph.series().len()).map(|index| {
                    y_at(graph, index, x).map_or_else(|| "null".to_owned(), |y| y.to_string())
                }))
                .join(", ");

            writeln!(out, "    [{row}],")?;
        }

        writeln!(
            out,
            "  ]), {{title: {}, vAxis: {{title: {}}}, hAxis: {{title: 'size'}}}});",
            js_string(graph.title()),
            js_string(graph.unit())
        )?;
    }

    writeln!(out, "}});")?;
    writeln!(out, "</script>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;

    for graph in graphs.graphs() {
        writeln!(
            out,
            "<div id=\"{}\" style=\"width: 900px; height: 500px\"></div>",
            graph.key()
        )?;
    }

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;

    Ok(())
}
