use std::num::NonZero;
use std::path::{Path, PathBuf};

use crate::{Error, Family, Format, Result, Settings};

/// Everything that selects what a run measures and where its report goes.
///
/// The default configuration runs every family with the standard settings and writes a text
/// report to standard output.
///
/// # Examples
///
/// ```
/// use seq_bench::{Config, Family, Format};
///
/// let config = Config::default()
///     .with_families([Family::Sort])
///     .with_format(Format::Csv)
///     .with_scale(100)
///     .unwrap();
///
/// assert_eq!(config.families(), [Family::Sort]);
/// assert_eq!(config.settings().scale().get(), 100);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    families: Vec<Family>,
    format: Format,
    output: Option<PathBuf>,
    settings: Settings,
}

impl Config {
    /// Restricts the run to `families`, in the order given, without duplicates.
    ///
    /// An empty selection keeps the current one.
    #[must_use]
    pub fn with_families(mut self, families: impl IntoIterator<Item = Family>) -> Self {
        let mut selected = Vec::new();

        for family in families {
            if !selected.contains(&family) {
                selected.push(family);
            }
        }

        if !selected.is_empty() {
            self.families = selected;
        }

        self
    }

    /// Selects the report format.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Writes the report to the file at `path` instead of standard output.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Sets the number of trials averaged into each point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if `repetitions` is zero.
    pub fn with_repetitions(mut self, repetitions: u32) -> Result<Self> {
        let repetitions = NonZero::new(repetitions).ok_or(Error::InvalidSetting {
            setting: "repetitions",
            requirement: "at least 1",
            value: repetitions.to_string(),
        })?;

        self.settings = Settings::new(repetitions, self.settings.scale());
        Ok(self)
    }

    /// Sets the divisor applied to every container size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if `scale` is zero.
    pub fn with_scale(mut self, scale: usize) -> Result<Self> {
        let scale = NonZero::new(scale).ok_or(Error::InvalidSetting {
            setting: "scale",
            requirement: "at least 1",
            value: scale.to_string(),
        })?;

        self.settings = Settings::new(self.settings.repetitions(), scale);
        Ok(self)
    }

    /// The families to run, in run order.
    #[must_use]
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// The report format.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// The report file, or `None` for standard output.
    #[must_use]
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Settings shared by every series.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            families: Family::ALL.to_vec(),
            format: Format::default(),
            output: None,
            settings: Settings::default(),
        }
    }
}
