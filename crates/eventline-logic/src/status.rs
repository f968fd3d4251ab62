//! Date-derived activity status.
//!
//! An activity starts counting at 09:00 on its start date and keeps
//! running until 04:00 on the morning after its end date — the grace
//! window players get before the daily server reset. Both boundaries are
//! inclusive.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::{END_CUTOVER_HOUR, START_CUTOVER_HOUR};
use crate::model::{Activity, ActivityStatus};

/// Parse an authored `YYYY-MM-DD` date string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.trim().parse::<NaiveDate>().ok()
}

fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
}

/// Instant at which an activity with this start date begins.
pub fn start_instant(start_date: NaiveDate) -> NaiveDateTime {
    at_hour(start_date, START_CUTOVER_HOUR)
}

/// Instant at which an activity with this end date stops running: 04:00
/// on the following morning.
pub fn end_instant(end_date: NaiveDate) -> NaiveDateTime {
    end_date
        .succ_opt()
        .map(|morning_after| at_hour(morning_after, END_CUTOVER_HOUR))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Derive the current status of `activity` at `now`.
///
/// Falls back to the authored status when either date fails to parse — a
/// malformed record must not abort a render pass. Pure and idempotent.
pub fn resolve_status(activity: &Activity, now: NaiveDateTime) -> ActivityStatus {
    let parsed = (
        parse_date(&activity.start_date),
        parse_date(&activity.end_date),
    );
    let (start, end) = match parsed {
        (Some(s), Some(e)) => (start_instant(s), end_instant(e)),
        _ => {
            log::warn!(
                "activity {}: unparseable dates {:?}..{:?}, keeping authored status",
                activity.id,
                activity.start_date,
                activity.end_date
            );
            return activity.status;
        }
    };

    if end < now {
        ActivityStatus::Completed
    } else if start <= now && now <= end {
        ActivityStatus::Ongoing
    } else {
        ActivityStatus::Upcoming
    }
}

/// [`resolve_status`] against the local wall clock.
pub fn resolve_status_now(activity: &Activity) -> ActivityStatus {
    resolve_status(activity, Local::now().naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(start: &str, end: &str) -> Activity {
        Activity {
            id: "act001".into(),
            name: "夏日祭典".into(),
            start_date: start.into(),
            end_date: end.into(),
            cn_start_date: None,
            cn_end_date: None,
            jp_name: None,
            en_name: None,
            status: ActivityStatus::Upcoming,
            url: "https://example.com/act001".into(),
            image: "/images/act001.png".into(),
            category: None,
            member: None,
            description: None,
            children_activities: None,
            package_id: None,
            is_major_event: false,
            non_chronological: false,
        }
    }

    fn at(date: &str, h: u32, m: u32) -> NaiveDateTime {
        date.parse::<NaiveDate>()
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn test_cutover_instants() {
        let start = start_instant("2025-07-01".parse().unwrap());
        assert_eq!(start, at("2025-07-01", 9, 0));

        // End instant is 04:00 the morning after the nominal end date.
        let end = end_instant("2025-07-14".parse().unwrap());
        assert_eq!(end, at("2025-07-15", 4, 0));
    }

    #[test]
    fn test_completed_after_end_instant() {
        let a = activity("2025-07-01", "2025-07-14");
        assert_eq!(
            resolve_status(&a, at("2025-07-15", 4, 1)),
            ActivityStatus::Completed
        );
        assert_eq!(
            resolve_status(&a, at("2025-08-01", 12, 0)),
            ActivityStatus::Completed
        );
    }

    #[test]
    fn test_ongoing_within_window() {
        let a = activity("2025-07-01", "2025-07-14");
        assert_eq!(
            resolve_status(&a, at("2025-07-07", 20, 0)),
            ActivityStatus::Ongoing
        );
        // Still running during the reset grace window.
        assert_eq!(
            resolve_status(&a, at("2025-07-15", 3, 59)),
            ActivityStatus::Ongoing
        );
    }

    #[test]
    fn test_upcoming_before_start_instant() {
        let a = activity("2025-07-01", "2025-07-14");
        assert_eq!(
            resolve_status(&a, at("2025-06-30", 23, 0)),
            ActivityStatus::Upcoming
        );
        assert_eq!(
            resolve_status(&a, at("2025-07-01", 8, 59)),
            ActivityStatus::Upcoming
        );
    }

    #[test]
    fn test_boundaries_inclusive() {
        let a = activity("2025-07-01", "2025-07-14");
        // Exactly the start instant.
        assert_eq!(
            resolve_status(&a, at("2025-07-01", 9, 0)),
            ActivityStatus::Ongoing
        );
        // Exactly the end instant.
        assert_eq!(
            resolve_status(&a, at("2025-07-15", 4, 0)),
            ActivityStatus::Ongoing
        );
    }

    #[test]
    fn test_single_day_activity_mid_morning() {
        // Starts and ends today; at 10:00 the 09:00 start has passed and
        // the 04:00-next-morning end has not.
        let a = activity("2025-07-01", "2025-07-01");
        assert_eq!(
            resolve_status(&a, at("2025-07-01", 10, 0)),
            ActivityStatus::Ongoing
        );
    }

    #[test]
    fn test_malformed_dates_fall_back_to_authored_status() {
        let mut a = activity("not-a-date", "2025-07-14");
        a.status = ActivityStatus::Completed;
        assert_eq!(
            resolve_status(&a, at("2025-07-07", 12, 0)),
            ActivityStatus::Completed
        );

        let mut b = activity("2025-07-01", "");
        b.status = ActivityStatus::Ongoing;
        assert_eq!(
            resolve_status(&b, at("2025-07-07", 12, 0)),
            ActivityStatus::Ongoing
        );
    }

    #[test]
    fn test_idempotent() {
        let a = activity("2025-07-01", "2025-07-14");
        let now = at("2025-07-07", 12, 0);
        assert_eq!(resolve_status(&a, now), resolve_status(&a, now));
    }
}
