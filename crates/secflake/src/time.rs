use std::time::{SystemTime, UNIX_EPOCH};

/// Default epoch: Thursday, January 4, 2018 01:20:00 UTC+8
/// (1,515,000,000 seconds after the Unix epoch).
pub const DEFAULT_EPOCH: u64 = 1_515_000_000;

/// A trait for time sources that report the current wall-clock second.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. The unit is **whole seconds** since the Unix epoch;
/// anchoring to a custom epoch happens in the bit [`Layout`], not here.
///
/// # Example
///
/// ```
/// use secflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_second(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_second(), 1234);
/// ```
///
/// [`Layout`]: crate::Layout
pub trait TimeSource {
    /// Returns the current time in whole seconds since the Unix epoch.
    fn current_second(&self) -> u64;
}

/// A wall-clock time source backed by [`SystemTime`].
///
/// Wall clocks may step backward under NTP corrections or manual adjustment;
/// the generator clamps such readings so that issued timestamps never
/// decrease.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_second(&self) -> u64 {
        // A clock set before the Unix epoch reads as zero; the generator's
        // backward-clock clamp takes over from there.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
