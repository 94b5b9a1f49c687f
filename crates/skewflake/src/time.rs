use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

/// Skewflake epoch: Wednesday, January 1, 2020 00:00:00 UTC+8
/// (2019-12-31T16:00:00Z), in milliseconds since the Unix epoch.
///
/// The 43-bit timestamp field covers roughly 278 years from this instant.
pub const SKEWFLAKE_EPOCH: i64 = 1_577_808_000_000;

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. Unlike a monotonic timer, implementations are allowed
/// to move backwards; the generators detect and compensate for that.
///
/// # Example
///
/// ```
/// use skewflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

/// The operating system's wall clock.
///
/// Every call reads [`SystemTime::now`], so NTP steps, manual adjustments and
/// VM migrations show up as-is, including backward jumps.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis() as i64,
            // Negative readings are rejected later as `ClockBeforeEpoch`.
            Err(e) => -(e.duration().as_millis() as i64),
        }
    }
}
