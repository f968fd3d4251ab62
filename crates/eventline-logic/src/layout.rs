//! Month-grid bar layout for the timeline.
//!
//! Each of the twelve months takes exactly 1/12 of the row regardless of
//! its length; positions inside a month interpolate by day over that
//! month's own day count. Bar width is therefore not exactly proportional
//! to elapsed days when a span crosses months of different lengths — the
//! original chart renders this way and the approximation is kept as-is.

use chrono::{Datelike, NaiveDate};

use crate::constants::FALLBACK_SEGMENT_WIDTH;
use crate::model::Activity;
use crate::status::parse_date;

/// Width of one month column, percent of the full row.
const MONTH_WIDTH: f64 = 100.0 / 12.0;

/// Horizontal geometry of an activity bar within one calendar-year row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Left edge, percent of the full row.
    pub start_percent: f64,
    /// Raw width, percent of the full row. Never negative; callers may
    /// floor it to a minimum visible width.
    pub width_percent: f64,
    /// The activity's actual (unclipped) start falls in this year.
    pub is_first_segment: bool,
    /// The activity's actual (unclipped) end falls in this year.
    pub is_last_segment: bool,
    /// The activity crosses a year boundary; selects square bar ends on
    /// the truncated side.
    pub spans_multiple_years: bool,
}

impl Segment {
    /// Safe default when dates cannot be parsed: a single complete bar at
    /// the left edge, roughly one month wide.
    fn fallback() -> Self {
        Segment {
            start_percent: 0.0,
            width_percent: FALLBACK_SEGMENT_WIDTH,
            is_first_segment: true,
            is_last_segment: true,
            spans_multiple_years: false,
        }
    }
}

/// Number of days in `month` (1–12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(f), Some(n)) => (n - f).num_days() as u32,
        _ => 30,
    }
}

/// Compute the bar geometry for `activity` on the row for `year`.
///
/// The activity's interval is clipped to the year's Jan 1–Dec 31 window
/// before layout. Callers only invoke this for years the interval
/// touches; layout for a disjoint year is not required to be sensible.
///
/// The start position uses `day - 1`, the end position uses `day`, so a
/// same-day activity still gets one day of visible width. Parse failures
/// yield [`Segment::fallback`] rather than an error.
pub fn compute_segment(activity: &Activity, year: i32) -> Segment {
    let parsed = (
        parse_date(&activity.start_date),
        parse_date(&activity.end_date),
    );
    let bounds = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    );
    let ((start, end), (year_start, year_end)) = match (parsed, bounds) {
        ((Some(s), Some(e)), (Some(ys), Some(ye))) => ((s, e), (ys, ye)),
        _ => {
            log::warn!(
                "activity {}: unparseable dates {:?}..{:?}, using fallback segment",
                activity.id,
                activity.start_date,
                activity.end_date
            );
            return Segment::fallback();
        }
    };

    let seg_start = start.max(year_start);
    let seg_end = end.min(year_end);

    let start_percent = seg_start.month0() as f64 * MONTH_WIDTH
        + (seg_start.day() - 1) as f64 / days_in_month(year, seg_start.month()) as f64
            * MONTH_WIDTH;
    let end_percent = seg_end.month0() as f64 * MONTH_WIDTH
        + seg_end.day() as f64 / days_in_month(year, seg_end.month()) as f64 * MONTH_WIDTH;

    Segment {
        start_percent,
        width_percent: (end_percent - start_percent).max(0.0),
        is_first_segment: start.year() == year,
        is_last_segment: end.year() == year,
        spans_multiple_years: start.year() != end.year(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivityStatus;

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

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_full_year_spans_whole_row() {
        let seg = compute_segment(&activity("2025-01-01", "2025-12-31"), 2025);
        assert!(seg.start_percent.abs() < 1e-9);
        assert!((seg.start_percent + seg.width_percent - 100.0).abs() < 1e-9);
        assert!(seg.is_first_segment);
        assert!(seg.is_last_segment);
        assert!(!seg.spans_multiple_years);
    }

    #[test]
    fn test_cross_year_first_half() {
        // Dec 15 of Y through Jan 15 of Y+1, laid out for Y: clipped to
        // Dec 15–31, so roughly half of December's column.
        let seg = compute_segment(&activity("2024-12-15", "2025-01-15"), 2024);
        assert!(seg.is_first_segment);
        assert!(!seg.is_last_segment);
        assert!(seg.spans_multiple_years);

        let december = 100.0 / 12.0;
        let expected_start = 11.0 * december + 14.0 / 31.0 * december;
        assert!((seg.start_percent - expected_start).abs() < 1e-9);
        assert!((seg.start_percent + seg.width_percent - 100.0).abs() < 1e-9);
        assert!(seg.width_percent > 0.4 * december);
        assert!(seg.width_percent < 0.6 * december);
    }

    #[test]
    fn test_cross_year_second_half() {
        let seg = compute_segment(&activity("2024-12-15", "2025-01-15"), 2025);
        assert!(!seg.is_first_segment);
        assert!(seg.is_last_segment);
        assert!(seg.spans_multiple_years);
        // Clipped to Jan 1–15: starts at the row's left edge.
        assert!(seg.start_percent.abs() < 1e-9);
        let expected_width = 15.0 / 31.0 * (100.0 / 12.0);
        assert!((seg.width_percent - expected_width).abs() < 1e-9);
    }

    #[test]
    fn test_same_day_activity_has_visible_width() {
        let seg = compute_segment(&activity("2025-07-08", "2025-07-08"), 2025);
        let expected = 1.0 / 31.0 * (100.0 / 12.0);
        assert!((seg.width_percent - expected).abs() < 1e-9);
    }

    #[test]
    fn test_month_length_asymmetry_is_preserved() {
        // One day in February is visually wider than one day in January.
        let jan = compute_segment(&activity("2025-01-10", "2025-01-10"), 2025);
        let feb = compute_segment(&activity("2025-02-10", "2025-02-10"), 2025);
        assert!(feb.width_percent > jan.width_percent);
    }

    #[test]
    fn test_inverted_interval_clamps_width_to_zero() {
        let seg = compute_segment(&activity("2025-07-14", "2025-07-01"), 2025);
        assert!(seg.width_percent >= 0.0);
    }

    #[test]
    fn test_parse_failure_yields_fallback() {
        let seg = compute_segment(&activity("garbage", "2025-07-14"), 2025);
        assert_eq!(seg.start_percent, 0.0);
        assert_eq!(seg.width_percent, FALLBACK_SEGMENT_WIDTH);
        assert!(seg.is_first_segment);
        assert!(seg.is_last_segment);
        assert!(!seg.spans_multiple_years);
    }

    #[test]
    fn test_idempotent() {
        let a = activity("2024-12-15", "2025-01-15");
        assert_eq!(compute_segment(&a, 2024), compute_segment(&a, 2024));
    }
}
