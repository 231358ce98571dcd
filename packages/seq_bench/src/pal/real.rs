use std::time::Instant;

use crate::pal::Platform;

/// Reads the operating system's monotonic clock.
#[derive(Clone, Debug)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}
