//! Filtering, sorting, and parent/child display-list assembly.
//!
//! The pipeline runs in three steps over the full flat list: sort, apply
//! the filter predicates, then resolve parent/child visibility. It is
//! recomputed from scratch whenever any filter input changes — the
//! dataset is small and bounded, so there is no incremental path.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::{FLAGSHIP_EXCLUDED_MEMBER, FLAGSHIP_MEMBER_TAG};
use crate::hierarchy::ChildIndex;
use crate::model::{ActivityStatus, ProcessedActivity};
use crate::status::parse_date;

/// List ordering. Descending puts upcoming activities and newest dates
/// first; ascending is plain oldest-first by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Year selection: everything, or one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

/// The filter state the dashboard drives the pipeline with. Callers own
/// this; the pipeline is a stateless transform over it.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub year: YearFilter,
    /// `None` means all categories.
    pub category: Option<String>,
    /// `None` means all members.
    pub member: Option<String>,
    pub major_events_only: bool,
    pub sort_order: SortOrder,
}

/// One row of the final display list.
#[derive(Debug, Clone, Copy)]
pub struct DisplayItem<'a> {
    pub activity: &'a ProcessedActivity,
    pub is_child: bool,
}

/// Sort priority when ordering by status: upcoming first, completed last.
pub fn status_priority(status: ActivityStatus) -> u8 {
    match status {
        ActivityStatus::Upcoming => 0,
        ActivityStatus::Ongoing => 1,
        ActivityStatus::Completed => 2,
    }
}

/// Start-date sort key. Unparseable dates take the epoch floor so
/// ordering stays deterministic.
fn start_key(pa: &ProcessedActivity) -> NaiveDate {
    parse_date(&pa.activity.start_date).unwrap_or(NaiveDate::MIN)
}

/// Step 1 — order the full flat list.
///
/// Descending: status priority first, then start date, newest first.
/// Ascending: start date only, oldest first.
pub fn sorted_activities(
    activities: &[ProcessedActivity],
    order: SortOrder,
) -> Vec<&ProcessedActivity> {
    let mut sorted: Vec<&ProcessedActivity> = activities.iter().collect();
    sorted.sort_by(|a, b| {
        if order == SortOrder::Desc {
            let by_status = status_priority(a.effective_status())
                .cmp(&status_priority(b.effective_status()));
            if by_status != std::cmp::Ordering::Equal {
                return by_status;
            }
        }
        match order {
            SortOrder::Desc => start_key(b).cmp(&start_key(a)),
            SortOrder::Asc => start_key(a).cmp(&start_key(b)),
        }
    });
    sorted
}

/// Step 2 predicates. Every active filter must pass.
pub fn matches_filters(pa: &ProcessedActivity, filters: &Filters) -> bool {
    let a = &pa.activity;

    if let YearFilter::Year(year) = filters.year {
        let overlaps = match (parse_date(&a.start_date), parse_date(&a.end_date)) {
            (Some(start), Some(end)) => start.year() <= year && end.year() >= year,
            _ => false,
        };
        if !overlaps {
            return false;
        }
    }

    if let Some(category) = &filters.category {
        let tagged = a
            .category
            .as_ref()
            .is_some_and(|tags| tags.contains(category));
        if !tagged {
            return false;
        }
    }

    if let Some(member) = &filters.member {
        // Flagship-tagged activities feature the full cast and pass for
        // every member except the named exclusion.
        let flagship = a.members().any(|m| m == FLAGSHIP_MEMBER_TAG);
        let passes = (flagship && member != FLAGSHIP_EXCLUDED_MEMBER)
            || a.members().any(|m| m == member);
        if !passes {
            return false;
        }
    }

    if filters.major_events_only && !a.is_major_event {
        return false;
    }

    true
}

/// Run the full pipeline: sort, filter, resolve parent/child visibility.
///
/// A parent is emitted when it or any of its children matched, followed
/// by its complete authored child list — children of a displayed parent
/// are all shown, not just the matching ones. A matching child whose
/// parent never qualified is emitted once as an orphaned child row.
/// Parents keep sort order; children never interleave across parents.
pub fn compute_display_list<'a>(
    activities: &'a [ProcessedActivity],
    filters: &Filters,
) -> Vec<DisplayItem<'a>> {
    let index = ChildIndex::build(activities);
    let sorted = sorted_activities(activities, filters.sort_order);

    let matched: HashSet<&str> = sorted
        .iter()
        .filter(|pa| matches_filters(pa, filters))
        .map(|pa| pa.activity.id.as_str())
        .collect();

    let mut result = Vec::new();
    let mut emitted: HashSet<&str> = HashSet::new();

    for parent in sorted
        .iter()
        .copied()
        .filter(|pa| !index.is_child(&pa.activity.id))
    {
        let children = index.children_of(parent);
        let qualifies = matched.contains(parent.activity.id.as_str())
            || children
                .iter()
                .any(|c| matched.contains(c.activity.id.as_str()));
        if !qualifies {
            continue;
        }

        result.push(DisplayItem {
            activity: parent,
            is_child: false,
        });
        emitted.insert(parent.activity.id.as_str());
        for child in children {
            result.push(DisplayItem {
                activity: child,
                is_child: true,
            });
            emitted.insert(child.activity.id.as_str());
        }
    }

    // Matching children left over after the parent walk (their parent row
    // never qualified or is missing) still get a row, once.
    for pa in sorted.iter().copied() {
        let id = pa.activity.id.as_str();
        if index.is_child(id) && matched.contains(id) && !emitted.contains(id) {
            result.push(DisplayItem {
                activity: pa,
                is_child: true,
            });
            emitted.insert(id);
        }
    }

    result
}
