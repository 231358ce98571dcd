use std::fmt::Debug;
use std::time::Instant;

/// Provides the monotonic clock used to time trials.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// The current instant of the monotonic clock.
    fn now(&self) -> Instant;
}
