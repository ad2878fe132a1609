use crate::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// The wall clock, read through [`SystemTime::now`].
///
/// This is the default [`TimeSource`] of every factory. It follows the host
/// clock, so it may repeat or step backwards (NTP corrections, leap
/// seconds). The factory absorbs both without ever emitting a smaller time
/// field.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        // A host clock set before 1970 is reported as negative millis.
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TSID_EPOCH;

    #[test]
    fn system_clock_is_after_tsid_epoch() {
        assert!(SystemClock.current_millis() > TSID_EPOCH);
    }

    #[test]
    fn system_clock_tracks_system_time() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as i64;
        let now = SystemClock.current_millis();
        let after = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as i64;
        assert!(before <= now && now <= after);
    }

    #[test]
    fn shared_clocks_delegate() {
        let clock = alloc::sync::Arc::new(SystemClock);
        assert!(clock.current_millis() > TSID_EPOCH);
        assert!((&SystemClock).current_millis() > TSID_EPOCH);
    }
}
