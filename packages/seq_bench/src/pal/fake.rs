use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::pal::Platform;

#[derive(Debug)]
struct FakePlatformState {
    origin: Instant,
    elapsed: Duration,
    steps: VecDeque<Duration>,
    reads: usize,
}

/// A clock that advances by scripted steps.
///
/// Each read first advances the clock by the next queued step (or not at all once the queue is
/// empty) and then reports the time. Clones share the same clock.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    state: Arc<Mutex<FakePlatformState>>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePlatformState {
                origin: Instant::now(),
                elapsed: Duration::ZERO,
                steps: VecDeque::new(),
                reads: 0,
            })),
        }
    }

    /// Queues steps for upcoming reads, one step per read.
    pub(crate) fn queue_steps(&self, steps: impl IntoIterator<Item = Duration>) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .steps
            .extend(steps);
    }

    /// How many times the clock has been read.
    pub(crate) fn reads(&self) -> usize {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .reads
    }
}

impl Platform for FakePlatform {
    fn now(&self) -> Instant {
        let mut state = self
            .state
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        let step = state.steps.pop_front().unwrap_or_default();
        state.elapsed += step;
        state.reads += 1;

        state.origin + state.elapsed
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn advances_by_queued_steps() {
        let platform = FakePlatform::new();
        platform.queue_steps([Duration::ZERO, Duration::from_millis(5)]);

        let first = platform.now();
        let second = platform.now();
        let third = platform.now();

        assert_eq!(second - first, Duration::from_millis(5));
        assert_eq!(third, second);
        assert_eq!(platform.reads(), 3);
    }

    #[test]
    fn clones_share_the_clock() {
        let platform = FakePlatform::new();
        let clone = platform.clone();

        platform.queue_steps([Duration::from_secs(1)]);
        let start = platform.now();
        clone.queue_steps([Duration::from_secs(2)]);

        assert_eq!(clone.now() - start, Duration::from_secs(2));
        assert_eq!(platform.reads(), 2);
    }
}
