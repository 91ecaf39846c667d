use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
///
/// Snowflake timestamps are stored as milliseconds elapsed since this origin.
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// The timestamp type `T` is generic (typically `u64`), and the unit is
/// expected to be **milliseconds** since the Unix epoch.
///
/// # Example
///
/// ```
/// use randzone::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> T;
}

/// A [`TimeSource`] backed by [`SystemTime::now`].
#[derive(Default, Clone, Copy)]
pub struct WallClock;

impl TimeSource<u64> for WallClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
