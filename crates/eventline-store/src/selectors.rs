//! Derived views over the catalog — dropdown options and per-year rows.

use std::collections::BTreeSet;

use chrono::Datelike;

use eventline_logic::constants::DEFAULT_VISIBLE_COUNT;
use eventline_logic::filter::{DisplayItem, SortOrder};
use eventline_logic::model::ProcessedActivity;
use eventline_logic::status::parse_date;

/// Calendar years touched by any activity, for the year dropdown.
/// Ascending, or newest-first under descending sort.
pub fn available_years(activities: &[ProcessedActivity], order: SortOrder) -> Vec<i32> {
    let mut set = BTreeSet::new();
    for pa in activities {
        if let Some(d) = parse_date(&pa.activity.start_date) {
            set.insert(d.year());
        }
        if let Some(d) = parse_date(&pa.activity.end_date) {
            set.insert(d.year());
        }
    }
    let mut years: Vec<i32> = set.into_iter().collect();
    if order == SortOrder::Desc {
        years.reverse();
    }
    years
}

/// Distinct category tags across the dataset, sorted.
pub fn available_categories(activities: &[ProcessedActivity]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for pa in activities {
        for tag in pa.activity.categories() {
            set.insert(tag.to_string());
        }
    }
    set.into_iter().collect()
}

/// Distinct member tags across the dataset, sorted.
pub fn available_members(activities: &[ProcessedActivity]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for pa in activities {
        for member in pa.activity.members() {
            set.insert(member.to_string());
        }
    }
    set.into_iter().collect()
}

/// Rows belonging to `year`'s section. A cross-year activity is listed
/// only under its start year so it never appears twice.
pub fn display_for_year<'a>(items: &[DisplayItem<'a>], year: i32) -> Vec<DisplayItem<'a>> {
    items
        .iter()
        .copied()
        .filter(|item| {
            parse_date(&item.activity.activity.start_date).map(|d| d.year()) == Some(year)
        })
        .collect()
}

/// The rows actually rendered: everything under show-all, otherwise the
/// first [`DEFAULT_VISIBLE_COUNT`].
pub fn visible_slice<'s, 'a>(
    items: &'s [DisplayItem<'a>],
    show_all: bool,
) -> &'s [DisplayItem<'a>] {
    if show_all || items.len() <= DEFAULT_VISIBLE_COUNT {
        items
    } else {
        &items[..DEFAULT_VISIBLE_COUNT]
    }
}
