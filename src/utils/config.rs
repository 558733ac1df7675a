//! Limits for configuration values.

use std::cmp;

//------------ DefMinMax -----------------------------------------------------

/// The default, minimum, and maximum values for a resolver option.
///
/// Values read from configuration files or set by users are clamped into
/// the range before they are used.
#[derive(Clone, Copy, Debug)]
pub struct DefMinMax<T> {
    def: T,
    min: T,
    max: T,
}

impl<T: Copy + Ord> DefMinMax<T> {
    /// Creates a new value.
    pub const fn new(def: T, min: T, max: T) -> Self {
        Self { def, min, max }
    }

    /// Returns the default value.
    pub fn default(self) -> T {
        self.def
    }

    /// Clamps the given value into the permitted range.
    pub fn limit(self, value: T) -> T {
        cmp::max(self.min, cmp::min(self.max, value))
    }
}

//============ Test ==========================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    #[test]
    fn limit() {
        const RETRIES: DefMinMax<u8> = DefMinMax::new(3, 1, 20);
        assert_eq!(RETRIES.limit(0), 1);
        assert_eq!(RETRIES.limit(7), 7);
        assert_eq!(RETRIES.limit(200), 20);
        assert_eq!(RETRIES.default(), 3);
    }

    #[test]
    fn limit_durations() {
        const TIMEOUT: DefMinMax<Duration> = DefMinMax::new(
            Duration::from_secs(5),
            Duration::from_secs(1),
            Duration::from_secs(3600),
        );
        assert_eq!(TIMEOUT.default(), Duration::from_secs(5));
        assert_eq!(
            TIMEOUT.limit(Duration::from_millis(10)),
            Duration::from_secs(1)
        );
    }
}
