//! A time interface that can be replaced by a fake time implementation
//! during testing.
//!
//! The resolver needs to know how much time has passed since a response
//! was received in order to decay the TTLs of its records. It asks a
//! [`Clock`] for an instant when the response arrives and later asks that
//! instant how much time has [`Elapsed`] since.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{self, Duration};

//------------ Clock ---------------------------------------------------------

/// A source of instants.
pub trait Clock: Clone + Debug + Send + Sync + 'static {
    /// The type of instant this clock produces.
    type Instant: Elapsed + 'static;

    /// Records the current time.
    fn now(&self) -> Self::Instant;
}

//------------ Elapsed -------------------------------------------------------

/// An instant that knows how much time has passed since it was created.
pub trait Elapsed: Debug + Send + Sync {
    /// Returns the time that has passed since the instant was created.
    fn elapsed(&self) -> Duration;
}

//------------ SystemClock ---------------------------------------------------

/// A clock using the system’s monotonic time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new clock.
    pub fn new() -> Self {
        SystemClock
    }
}

impl Clock for SystemClock {
    type Instant = time::Instant;

    fn now(&self) -> Self::Instant {
        time::Instant::now()
    }
}

impl Elapsed for time::Instant {
    fn elapsed(&self) -> Duration {
        time::Instant::elapsed(self)
    }
}

//------------ FakeClock -----------------------------------------------------

/// A clock that only moves when told to.
///
/// Clones of a fake clock share their time. Advancing one of them
/// advances all of them as well as all instants they created.
#[derive(Clone, Debug, Default)]
pub struct FakeClock {
    /// The current fake time in nanoseconds.
    now: Arc<AtomicU64>,
}

impl FakeClock {
    /// Creates a new fake clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `adjust`.
    pub fn adjust_time(&self, adjust: Duration) {
        let adjust = u64::try_from(adjust.as_nanos()).unwrap_or(u64::MAX);
        let _ = self.now.fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |now| Some(now.saturating_add(adjust)),
        );
    }

    fn curr_time(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

impl Clock for FakeClock {
    type Instant = FakeInstant;

    fn now(&self) -> Self::Instant {
        FakeInstant {
            start: self.curr_time(),
            clock: self.clone(),
        }
    }
}

//------------ FakeInstant ---------------------------------------------------

/// An instant created by a [`FakeClock`].
#[derive(Clone, Debug)]
pub struct FakeInstant {
    /// The fake time when the instant was created.
    start: u64,

    /// The clock that created it.
    clock: FakeClock,
}

impl Elapsed for FakeInstant {
    fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.clock.curr_time().saturating_sub(self.start))
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fake_clock() {
        let clock = FakeClock::new();
        let first = clock.now();
        assert_eq!(first.elapsed(), Duration::ZERO);

        clock.adjust_time(Duration::from_secs(10));
        let second = clock.clone().now();
        assert_eq!(first.elapsed(), Duration::from_secs(10));
        assert_eq!(second.elapsed(), Duration::ZERO);

        clock.adjust_time(Duration::from_millis(1500));
        assert_eq!(first.elapsed(), Duration::from_millis(11_500));
        assert_eq!(second.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn system_clock() {
        let now = SystemClock::new().now();
        assert!(Elapsed::elapsed(&now) < Duration::from_secs(60));
    }
}
