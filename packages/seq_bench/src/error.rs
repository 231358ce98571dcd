use thiserror::Error;

/// Errors that can occur when configuring a benchmark run or writing its report.
///
/// Measuring itself cannot fail: the benchmarks either complete or the process aborts on
/// memory exhaustion.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested report format is not one we can produce.
    #[error("invalid report format: '{value}' is not one of {expected}")]
    InvalidFormat {
        /// The format name that was requested.
        value: String,

        /// The format names that are accepted.
        expected: String,
    },

    /// The requested benchmark family does not exist.
    #[error("unknown benchmark family: '{name}' is not one of {expected}")]
    UnknownFamily {
        /// The family name that was requested.
        name: String,

        /// The family names that are accepted.
        expected: String,
    },

    /// A numeric setting is outside the range the benchmarks accept.
    #[error("invalid setting: {setting} must be {requirement}, got {value}")]
    InvalidSetting {
        /// The name of the setting.
        setting: &'static str,

        /// What the setting must satisfy.
        requirement: &'static str,

        /// The value that was provided.
        value: String,
    },

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for benchmark configuration and reporting, returning the
/// crate's [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;
    use std::io;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn invalid_setting_names_setting_and_value() {
        let error = Error::InvalidSetting {
            setting: "repetitions",
            requirement: "at least 1",
            value: "0".to_owned(),
        };

        assert_eq!(
            error.to_string(),
            "invalid setting: repetitions must be at least 1, got 0"
        );
    }

    #[test]
    fn io_errors_convert() {
        let error: Error = io::Error::other("disk full").into();

        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("disk full"));
    }
}
