//! Remaining-time display for ongoing activities.

use chrono::NaiveDateTime;

use crate::status::{end_instant, parse_date};

/// Whole days and leftover hours until an activity ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
}

/// Time left until the end instant (04:00 on the morning after
/// `end_date`, the same instant status resolution uses). `None` once that
/// has passed, or when the date cannot be parsed.
pub fn remaining_time(end_date: &str, now: NaiveDateTime) -> Option<Remaining> {
    let end = end_instant(parse_date(end_date)?);
    let left = end - now;
    if left <= chrono::Duration::zero() {
        return None;
    }
    Some(Remaining {
        days: left.num_days(),
        hours: left.num_hours() % 24,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn at(date: &str, h: u32, m: u32) -> NaiveDateTime {
        date.parse::<NaiveDate>()
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn test_counts_down_to_end_instant() {
        // Ends 2025-07-14, so the end instant is 07-15 04:00.
        let left = remaining_time("2025-07-14", at("2025-07-13", 4, 0)).unwrap();
        assert_eq!(left, Remaining { days: 2, hours: 0 });

        let left = remaining_time("2025-07-14", at("2025-07-14", 22, 0)).unwrap();
        assert_eq!(left, Remaining { days: 0, hours: 6 });
    }

    #[test]
    fn test_none_once_ended() {
        assert_eq!(remaining_time("2025-07-14", at("2025-07-15", 4, 0)), None);
        assert_eq!(remaining_time("2025-07-14", at("2025-08-01", 12, 0)), None);
    }

    #[test]
    fn test_none_for_unparseable_date() {
        assert_eq!(remaining_time("soon™", at("2025-07-13", 4, 0)), None);
    }
}
