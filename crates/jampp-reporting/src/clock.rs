use std::fmt::Debug;
use std::time::Instant;

/// Source of the current time for token expiry checks
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// The monotonic system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
