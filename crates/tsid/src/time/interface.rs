/// TSID epoch: Sunday, January 1, 2023 00:00:00 UTC
pub const TSID_EPOCH: i64 = 1_672_531_200_000;

/// Standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH: i64 = 0;

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// Unlike a custom-epoch clock, the value is always **milliseconds since the
/// Unix epoch**. The factory subtracts its configured epoch itself, so a
/// single clock can be shared between factories with different epochs.
///
/// # Example
///
/// ```
/// use tsid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1_700_000_000_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1_700_000_000_000);
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

impl<T: TimeSource + ?Sized> TimeSource for alloc::sync::Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}
