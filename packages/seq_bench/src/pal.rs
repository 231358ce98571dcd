//! Platform abstraction layer for reading the clock.
//!
//! Benchmark trials read the clock through this layer so that tests can substitute a scripted
//! clock and check the aggregation of trial timings exactly.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
