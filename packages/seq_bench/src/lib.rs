#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Measures how sequence containers behave across element types, memory layouts and
//! allocation strategies.
//!
//! The core functionality includes:
//! - [`Family`] - A named group of benchmark series, reported as one graph per element type
//! - [`Bencher`] - Runs series of timed trials and reports mean durations to a [`ReportSink`]
//! - [`List`] - A doubly linked list that allocates its nodes through a pluggable allocator
//! - [`Sequence`] - The operations every measured container supports
//! - [`Graphs`] - Collects results and writes them as text, CSV or HTML
//!
//! Every family is run for every type of the element catalog (see [`visit_catalog`]). Element
//! types range from small plain values to large types with owned heap data, so the same
//! operations show very different costs depending on how much memory moves per element and
//! how often the allocator is involved.
//!
//! Containers are either backed by the global heap ([`Heap`]) or, for the linked list, by a
//! fresh bump arena per trial ([`Linear`]). The arena makes node allocation a pointer bump,
//! isolating the cost of the list's layout from the cost of the allocator.
//!
//! # Example
//!
//! ```
//! use seq_bench::{Config, Family, Format, run};
//!
//! let config = Config::default()
//!     .with_families([Family::Sort])
//!     .with_format(Format::Csv)
//!     .with_repetitions(1)
//!     .unwrap()
//!     .with_scale(100_000)
//!     .unwrap();
//!
//! let mut report = Vec::new();
//! run(&config, &mut report).unwrap();
//!
//! assert!(String::from_utf8(report).unwrap().starts_with("graph,series,x,y"));
//! ```

mod bencher;
mod chain;
mod classify;
mod config;
mod creation;
mod driver;
mod error;
mod families;
mod graphs;
mod kinds;
mod labels;
mod list;
mod operations;
mod pal;
mod render;
mod sequence;
mod sizes;
mod values;

pub use bencher::*;
pub use chain::*;
pub use classify::*;
pub use config::*;
pub use creation::*;
pub use driver::*;
pub use error::*;
pub use families::*;
pub use graphs::*;
pub use kinds::*;
pub use labels::*;
pub use list::*;
pub use operations::*;
pub use render::Format;
pub use sequence::*;
pub use sizes::*;
pub use values::*;
