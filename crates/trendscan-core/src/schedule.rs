//! Wall-clock target for the live-quote phase.

use std::time::Duration;

use time::macros::time;
use time::{OffsetDateTime, Time, UtcOffset};

use crate::domain::IST_OFFSET;

/// Fixed time-of-day at a fixed offset, plus a cushion added to any wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTarget {
    pub offset: UtcOffset,
    pub time_of_day: Time,
    pub cushion: Duration,
}

impl Default for ScheduleTarget {
    /// 09:20:00.000 IST with a two second cushion.
    fn default() -> Self {
        Self {
            offset: IST_OFFSET,
            time_of_day: time!(09:20),
            cushion: Duration::from_secs(2),
        }
    }
}

impl ScheduleTarget {
    /// Target instant on the local calendar day of `now`.
    pub fn target_for(&self, now: OffsetDateTime) -> OffsetDateTime {
        now.to_offset(self.offset).replace_time(self.time_of_day)
    }

    /// How long to wait from `now` before the target is reached.
    ///
    /// Zero at or after the target; otherwise `target - now + cushion`.
    pub fn wait_from(&self, now: OffsetDateTime) -> Duration {
        let local_now = now.to_offset(self.offset);
        let target = self.target_for(now);
        if local_now >= target {
            return Duration::ZERO;
        }

        let remaining = Duration::try_from(target - local_now).unwrap_or(Duration::ZERO);
        remaining + self.cushion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn waits_until_target_plus_cushion_when_early() {
        let schedule = ScheduleTarget::default();
        // 03:40 UTC is 09:10 IST.
        let wait = schedule.wait_from(datetime!(2024-05-02 03:40:00 UTC));
        assert_eq!(wait, Duration::from_secs(600 + 2));
    }

    #[test]
    fn sub_second_remainder_is_preserved() {
        let schedule = ScheduleTarget::default();
        let wait = schedule.wait_from(datetime!(2024-05-02 03:49:59.250 UTC));
        assert_eq!(wait, Duration::from_millis(750) + Duration::from_secs(2));
    }

    #[test]
    fn no_wait_at_or_after_target() {
        let schedule = ScheduleTarget::default();
        assert_eq!(
            schedule.wait_from(datetime!(2024-05-02 03:50:00 UTC)),
            Duration::ZERO
        );
        assert_eq!(
            schedule.wait_from(datetime!(2024-05-02 10:00:00 UTC)),
            Duration::ZERO
        );
    }

    #[test]
    fn target_uses_local_calendar_day() {
        let schedule = ScheduleTarget::default();
        // 20:00 UTC on the 1st is already 01:30 IST on the 2nd.
        let target = schedule.target_for(datetime!(2024-05-01 20:00:00 UTC));
        assert_eq!(target, datetime!(2024-05-02 09:20:00 +05:30));

        let wait = schedule.wait_from(datetime!(2024-05-01 20:00:00 UTC));
        assert_eq!(wait, Duration::from_secs(7 * 3600 + 50 * 60 + 2));
    }
}
