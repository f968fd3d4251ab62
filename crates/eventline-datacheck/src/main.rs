//! Eventline Headless Dataset Harness
//!
//! Validates the authored datasets and the pure logic without the
//! dashboard. Runs entirely in-process — no networking, no rendering.
//!
//! Usage:
//!   cargo run -p eventline-datacheck
//!   cargo run -p eventline-datacheck -- --verbose

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use eventline_logic::countdown::remaining_time;
use eventline_logic::filter::{compute_display_list, Filters, SortOrder, YearFilter};
use eventline_logic::hierarchy::ChildIndex;
use eventline_logic::layout::compute_segment;
use eventline_logic::model::ActivityStatus;
use eventline_logic::search::{search_activities, SearchCursor};
use eventline_logic::status::{end_instant, parse_date, start_instant};
use eventline_logic::valuation::{best_option_value, option_value, rank_options, rank_packages};
use eventline_store::selectors;
use eventline_store::Catalog;

// ── Authored datasets (same JSON the dashboard ships) ───────────────────
const ACTIVITIES_JSON: &str = include_str!("../../../data/activities.json");
const PACKAGES_JSON: &str = include_str!("../../../data/packages.json");
const CARDS_JSON: &str = include_str!("../../../data/cards.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

/// Every sweep runs against the same pinned instant so results are
/// reproducible regardless of when the harness runs.
fn pinned_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Eventline Dataset Harness ===\n");

    let mut results = Vec::new();

    // 1. Dataset load + referential integrity
    let catalog = match eventline_store::catalog_from_json(
        ACTIVITIES_JSON,
        PACKAGES_JSON,
        CARDS_JSON,
        pinned_now(),
    ) {
        Ok(catalog) => catalog,
        Err(e) => {
            println!("✗ dataset_load: {}", e);
            std::process::exit(1);
        }
    };
    results.extend(validate_datasets(&catalog));

    // 2. Status resolution sweep
    results.extend(validate_statuses(&catalog));

    // 3. Layout segments for every activity-year pairing
    results.extend(validate_layout(&catalog));

    // 4. Valuation and package ranking
    results.extend(validate_valuation(&catalog));

    // 5. Filter pipeline sweeps
    results.extend(validate_filters(&catalog));

    // 6. Search and selectors
    results.extend(validate_search(&catalog));
    results.extend(validate_selectors(&catalog));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Datasets ─────────────────────────────────────────────────────────

fn validate_datasets(catalog: &Catalog) -> Vec<TestResult> {
    println!("--- Datasets ---");
    let mut results = Vec::new();
    let activities = catalog.activities();

    results.push(check(
        "activities_not_empty",
        activities.len() >= 10,
        format!("{} activities loaded", activities.len()),
    ));

    let mut seen = HashSet::new();
    let duplicates: Vec<_> = activities
        .iter()
        .filter(|pa| !seen.insert(pa.activity.id.as_str()))
        .map(|pa| pa.activity.id.as_str())
        .collect();
    results.push(check(
        "activity_ids_unique",
        duplicates.is_empty(),
        if duplicates.is_empty() {
            "all ids unique".into()
        } else {
            format!("duplicate ids: {}", duplicates.join(", "))
        },
    ));

    let bad_dates: Vec<_> = activities
        .iter()
        .filter(|pa| {
            parse_date(&pa.activity.start_date).is_none()
                || parse_date(&pa.activity.end_date).is_none()
        })
        .map(|pa| pa.activity.id.as_str())
        .collect();
    results.push(check(
        "dates_parse",
        bad_dates.is_empty(),
        if bad_dates.is_empty() {
            "all dates parse".into()
        } else {
            format!("unparseable dates on: {}", bad_dates.join(", "))
        },
    ));

    let inverted: Vec<_> = activities
        .iter()
        .filter(|pa| {
            matches!(
                (
                    parse_date(&pa.activity.start_date),
                    parse_date(&pa.activity.end_date)
                ),
                (Some(s), Some(e)) if e < s
            )
        })
        .map(|pa| pa.activity.id.as_str())
        .collect();
    results.push(check(
        "date_ranges_ordered",
        inverted.is_empty(),
        if inverted.is_empty() {
            "no inverted ranges".into()
        } else {
            format!("end before start on: {}", inverted.join(", "))
        },
    ));

    let index = ChildIndex::build(activities);
    let ids: HashSet<&str> = activities.iter().map(|pa| pa.activity.id.as_str()).collect();

    let dangling_children: Vec<String> = activities
        .iter()
        .flat_map(|pa| {
            let parent = pa.activity.id.as_str();
            pa.activity
                .child_ids()
                .filter(|id| !ids.contains(id))
                .map(move |id| format!("{parent}→{id}"))
        })
        .collect();
    results.push(check(
        "child_refs_resolve",
        dangling_children.is_empty(),
        if dangling_children.is_empty() {
            "all child ids resolve".into()
        } else {
            format!("dangling: {}", dangling_children.join(", "))
        },
    ));

    // Hierarchy is one level deep: no child may list children of its own.
    let nested: Vec<_> = activities
        .iter()
        .filter(|pa| {
            index.is_child(&pa.activity.id) && pa.activity.child_ids().next().is_some()
        })
        .map(|pa| pa.activity.id.as_str())
        .collect();
    results.push(check(
        "hierarchy_depth_one",
        nested.is_empty(),
        if nested.is_empty() {
            "no nested children".into()
        } else {
            format!("children with children: {}", nested.join(", "))
        },
    ));

    let mut child_parents: HashMap<&str, u32> = HashMap::new();
    for pa in activities {
        for child in pa.activity.child_ids() {
            *child_parents.entry(child).or_default() += 1;
        }
    }
    let shared: Vec<_> = child_parents
        .iter()
        .filter(|(_, n)| **n > 1)
        .map(|(id, _)| *id)
        .collect();
    results.push(check(
        "children_single_parent",
        shared.is_empty(),
        if shared.is_empty() {
            "each child has one parent".into()
        } else {
            format!("claimed by multiple parents: {}", shared.join(", "))
        },
    ));

    let dangling_packages: Vec<_> = activities
        .iter()
        .filter(|pa| {
            pa.activity
                .package_id
                .as_deref()
                .is_some_and(|id| catalog.package(id).is_none())
        })
        .map(|pa| pa.activity.id.as_str())
        .collect();
    results.push(check(
        "package_refs_resolve",
        dangling_packages.is_empty(),
        if dangling_packages.is_empty() {
            "all package ids resolve".into()
        } else {
            format!("dangling package refs on: {}", dangling_packages.join(", "))
        },
    ));

    let dangling_cards: Vec<_> = catalog
        .cards()
        .iter()
        .filter(|card| !card.activity_id.iter().all(|id| ids.contains(id)))
        .map(|card| card.title.as_str())
        .collect();
    results.push(check(
        "card_refs_resolve",
        dangling_cards.is_empty(),
        if dangling_cards.is_empty() {
            "all card activity ids resolve".into()
        } else {
            format!("dangling card refs: {}", dangling_cards.join(", "))
        },
    ));

    let empty_packages: Vec<_> = catalog
        .packages()
        .iter()
        .filter(|p| p.pricing_options.is_empty())
        .map(|p| p.id.as_str())
        .collect();
    results.push(check(
        "packages_have_options",
        empty_packages.is_empty(),
        if empty_packages.is_empty() {
            format!("{} packages, all with options", catalog.packages().len())
        } else {
            format!("no options in: {}", empty_packages.join(", "))
        },
    ));

    results
}

// ── 2. Status resolution ────────────────────────────────────────────────

fn validate_statuses(catalog: &Catalog) -> Vec<TestResult> {
    println!("--- Status Resolution ---");
    let mut results = Vec::new();
    let now = pinned_now();

    let mut counts: HashMap<ActivityStatus, u32> = HashMap::new();
    let mut inconsistent = Vec::new();
    let mut countdown_disagreements = Vec::new();

    for pa in catalog.activities() {
        let status = pa.calculated_status;
        *counts.entry(status).or_default() += 1;

        let (Some(start), Some(end)) = (
            parse_date(&pa.activity.start_date),
            parse_date(&pa.activity.end_date),
        ) else {
            continue;
        };
        let (start, end) = (start_instant(start), end_instant(end));
        let expected = if end < now {
            ActivityStatus::Completed
        } else if start <= now && now <= end {
            ActivityStatus::Ongoing
        } else {
            ActivityStatus::Upcoming
        };
        if status != expected {
            inconsistent.push(pa.activity.id.clone());
        }

        // An ongoing activity must have time on the clock; a completed
        // one must not.
        let remaining = remaining_time(&pa.activity.end_date, now);
        let agrees = match status {
            ActivityStatus::Ongoing => remaining.is_some(),
            ActivityStatus::Completed => remaining.is_none(),
            ActivityStatus::Upcoming => remaining.is_some(),
        };
        if !agrees {
            countdown_disagreements.push(pa.activity.id.clone());
        }
    }

    results.push(check(
        "status_rules_hold",
        inconsistent.is_empty(),
        if inconsistent.is_empty() {
            format!(
                "{} completed, {} ongoing, {} upcoming",
                counts.get(&ActivityStatus::Completed).unwrap_or(&0),
                counts.get(&ActivityStatus::Ongoing).unwrap_or(&0),
                counts.get(&ActivityStatus::Upcoming).unwrap_or(&0)
            )
        } else {
            format!("rule mismatch on: {}", inconsistent.join(", "))
        },
    ));

    results.push(check(
        "all_statuses_represented",
        counts.len() == 3,
        format!("{} distinct statuses at pinned instant", counts.len()),
    ));

    results.push(check(
        "countdown_agrees_with_status",
        countdown_disagreements.is_empty(),
        if countdown_disagreements.is_empty() {
            "countdown and status agree".into()
        } else {
            format!("disagree on: {}", countdown_disagreements.join(", "))
        },
    ));

    results
}

// ── 3. Layout ───────────────────────────────────────────────────────────

fn validate_layout(catalog: &Catalog) -> Vec<TestResult> {
    println!("--- Layout ---");
    let mut results = Vec::new();

    let mut segments = 0u32;
    let mut out_of_bounds = Vec::new();
    let mut bad_flags = Vec::new();

    for pa in catalog.activities() {
        let (Some(start), Some(end)) = (
            parse_date(&pa.activity.start_date),
            parse_date(&pa.activity.end_date),
        ) else {
            continue;
        };

        for year in start.year()..=end.year() {
            let seg = compute_segment(&pa.activity, year);
            segments += 1;

            let within = seg.start_percent >= 0.0
                && seg.width_percent >= 0.0
                && seg.start_percent + seg.width_percent <= 100.0 + 1e-9;
            if !within {
                out_of_bounds.push(format!("{}@{}", pa.activity.id, year));
            }

            let spans = start.year() != end.year();
            let flags_ok = seg.spans_multiple_years == spans
                && seg.is_first_segment == (start.year() == year)
                && seg.is_last_segment == (end.year() == year);
            if !flags_ok {
                bad_flags.push(format!("{}@{}", pa.activity.id, year));
            }
        }
    }

    results.push(check(
        "segments_within_row",
        out_of_bounds.is_empty(),
        if out_of_bounds.is_empty() {
            format!("{} segments inside 0–100%", segments)
        } else {
            format!("outside row: {}", out_of_bounds.join(", "))
        },
    ));

    results.push(check(
        "segment_flags_consistent",
        bad_flags.is_empty(),
        if bad_flags.is_empty() {
            "year-boundary flags consistent".into()
        } else {
            format!("bad flags: {}", bad_flags.join(", "))
        },
    ));

    results
}

// ── 4. Valuation ────────────────────────────────────────────────────────

fn validate_valuation(catalog: &Catalog) -> Vec<TestResult> {
    println!("--- Valuation ---");
    let mut results = Vec::new();

    let all_options: Vec<_> = catalog
        .packages()
        .iter()
        .flat_map(|p| p.pricing_options.iter())
        .collect();

    let negative: Vec<_> = all_options
        .iter()
        .filter(|o| option_value(o) < 0.0)
        .map(|o| o.name.as_str())
        .collect();
    results.push(check(
        "values_never_negative",
        negative.is_empty(),
        format!("{} options valued", all_options.len()),
    ));

    let stamina_only: Vec<_> = all_options
        .iter()
        .copied()
        .filter(|o| o.total_draws == 0.0 && o.diamonds == 0.0)
        .collect();
    let stamina_ok = stamina_only.iter().all(|o| option_value(o) == 0.0);
    results.push(check(
        "stamina_only_values_zero",
        stamina_ok,
        format!("{} stamina-only options", stamina_only.len()),
    ));

    // Known anchor from the authored data: 畫材大禮包 at 330 for 10 draws
    // + 68 diamonds ≈ 31.6 per draw.
    let anchor = all_options.iter().find(|o| o.name == "畫材大禮包");
    let anchor_ok = anchor.is_some_and(|o| (option_value(o) - 31.57).abs() < 0.01);
    results.push(check(
        "anchor_option_value",
        anchor_ok,
        match anchor {
            Some(o) => format!("畫材大禮包 = {:.2} per draw", option_value(o)),
            None => "畫材大禮包 missing from data".into(),
        },
    ));

    let unsorted: Vec<_> = catalog
        .packages()
        .iter()
        .filter(|p| {
            let ranked = rank_options(p);
            ranked
                .windows(2)
                .any(|w| w[0].value_per_draw > w[1].value_per_draw)
        })
        .map(|p| p.id.as_str())
        .collect();
    results.push(check(
        "options_rank_ascending",
        unsorted.is_empty(),
        if unsorted.is_empty() {
            "per-package option order ascending".into()
        } else {
            format!("misordered: {}", unsorted.join(", "))
        },
    ));

    let used = catalog.used_package_ids();
    let ranked = rank_packages(catalog.packages(), &used);
    let only_used = ranked.iter().all(|p| used.contains(p.id.as_str()));
    let monotonic = ranked.windows(2).all(|w| {
        best_option_value(w[0]).unwrap_or(f64::INFINITY)
            <= best_option_value(w[1]).unwrap_or(f64::INFINITY)
    });
    results.push(check(
        "package_ranking",
        only_used && monotonic,
        format!(
            "{} of {} packages referenced, best-first order {}",
            ranked.len(),
            catalog.packages().len(),
            if monotonic { "holds" } else { "broken" }
        ),
    ));

    results
}

// ── 5. Filter pipeline ──────────────────────────────────────────────────

fn validate_filters(catalog: &Catalog) -> Vec<TestResult> {
    println!("--- Filter Pipeline ---");
    let mut results = Vec::new();
    let activities = catalog.activities();
    let index = ChildIndex::build(activities);

    // Unfiltered: every top-level activity appears, children directly
    // after their parent.
    let all = compute_display_list(activities, &Filters::default());
    let shown: Vec<&str> = all.iter().map(|i| i.activity.activity.id.as_str()).collect();
    let parents: Vec<&str> = activities
        .iter()
        .map(|pa| pa.activity.id.as_str())
        .filter(|id| !index.is_child(id))
        .collect();
    let all_parents_shown = parents.iter().all(|id| shown.contains(id));
    results.push(check(
        "unfiltered_shows_all_parents",
        all_parents_shown && shown.len() == activities.len(),
        format!("{} rows for {} activities", shown.len(), activities.len()),
    ));

    let mut blocks_ok = true;
    for (pos, item) in all.iter().enumerate() {
        if item.is_child {
            continue;
        }
        let children = index.children_of(item.activity);
        for (offset, child) in children.iter().enumerate() {
            let expected = pos + 1 + offset;
            if all
                .get(expected)
                .map(|i| i.activity.activity.id.as_str())
                != Some(child.activity.id.as_str())
            {
                blocks_ok = false;
            }
        }
    }
    results.push(check(
        "children_follow_parent",
        blocks_ok,
        "child rows sit directly under their parent".into(),
    ));

    // A category carried only by a child pulls the whole family in.
    let collect_filter = Filters {
        category: Some("收集活動".into()),
        ..Filters::default()
    };
    let family = compute_display_list(activities, &collect_filter);
    let family_ids: Vec<&str> = family
        .iter()
        .map(|i| i.activity.activity.id.as_str())
        .collect();
    results.push(check(
        "child_match_pulls_family",
        family_ids == ["act001", "act002", "act003"],
        format!("收集活動 → [{}]", family_ids.join(", ")),
    ));

    // Flagship activities answer for every member except the exclusion.
    let for_member = |member: &str| {
        let filters = Filters {
            member: Some(member.into()),
            ..Filters::default()
        };
        compute_display_list(activities, &filters)
            .iter()
            .map(|i| i.activity.activity.id.to_string())
            .collect::<Vec<_>>()
    };

    let white = for_member("白曜");
    let flagship_included = ["act001", "act005", "act008", "act006"]
        .iter()
        .all(|id| white.iter().any(|s| s == id));
    results.push(check(
        "flagship_counts_for_member",
        flagship_included && !white.iter().any(|s| s == "act004"),
        format!("白曜 → {} rows", white.len()),
    ));

    let excluded = for_member("風硯");
    let no_flagship = !excluded.iter().any(|s| s == "act001" || s == "act005" || s == "act008");
    let direct = ["act004", "act007", "act012"]
        .iter()
        .all(|id| excluded.iter().any(|s| s == id));
    results.push(check(
        "flagship_excludes_named_member",
        no_flagship && direct,
        format!("風硯 → [{}]", excluded.join(", ")),
    ));

    // Year filter keeps cross-year activities in both years.
    let year = |y: i32| {
        let filters = Filters {
            year: YearFilter::Year(y),
            ..Filters::default()
        };
        compute_display_list(activities, &filters)
            .iter()
            .map(|i| i.activity.activity.id.to_string())
            .collect::<Vec<_>>()
    };
    let y2024 = year(2024);
    let y2025 = year(2025);
    let cross_in_both =
        y2024.iter().any(|s| s == "act005") && y2025.iter().any(|s| s == "act005");
    results.push(check(
        "year_filter_overlap",
        cross_in_both && !y2024.iter().any(|s| s == "act012"),
        format!("2024 → {} rows, 2025 → {} rows", y2024.len(), y2025.len()),
    ));

    let major = compute_display_list(
        activities,
        &Filters {
            major_events_only: true,
            ..Filters::default()
        },
    );
    let majors_only = major
        .iter()
        .filter(|i| !i.is_child)
        .all(|i| i.activity.activity.is_major_event);
    results.push(check(
        "major_events_filter",
        majors_only && !major.is_empty(),
        format!("{} rows with major-events-only", major.len()),
    ));

    // Ascending sort puts the oldest start date first.
    let asc = compute_display_list(
        activities,
        &Filters {
            sort_order: SortOrder::Asc,
            ..Filters::default()
        },
    );
    let first_parent = asc.iter().find(|i| !i.is_child);
    results.push(check(
        "ascending_oldest_first",
        first_parent.is_some_and(|i| i.activity.activity.id == "act012"),
        format!(
            "first row ascending: {}",
            first_parent.map_or("<none>", |i| i.activity.activity.id.as_str())
        ),
    ));

    results
}

// ── 6. Search + selectors ───────────────────────────────────────────────

fn validate_search(catalog: &Catalog) -> Vec<TestResult> {
    println!("--- Search ---");
    let mut results = Vec::new();
    let activities = catalog.activities();
    let cards = catalog.cards();

    let by_name = search_activities(activities, cards, "萬聖");
    results.push(check(
        "search_by_activity_name",
        by_name.len() == 2,
        format!("萬聖 → {} hits", by_name.len()),
    ));

    let by_card = search_activities(activities, cards, "南瓜");
    let via_card = by_card.iter().all(|r| r.match_text == "南瓜燈影");
    results.push(check(
        "search_by_card_name",
        by_card.len() == 2 && via_card,
        format!("南瓜 → {} hits via card art", by_card.len()),
    ));

    let blank = search_activities(activities, cards, "  ");
    results.push(check(
        "blank_query_no_hits",
        blank.is_empty(),
        "blank query yields nothing".into(),
    ));

    let mut cursor = SearchCursor::default();
    let wrapped = cursor.next(by_name.len()) == Some(0)
        && cursor.next(by_name.len()) == Some(1)
        && cursor.next(by_name.len()) == Some(0)
        && cursor.prev(by_name.len()) == Some(1);
    results.push(check(
        "cursor_wraps",
        wrapped,
        "next/prev wrap at both ends".into(),
    ));

    results
}

fn validate_selectors(catalog: &Catalog) -> Vec<TestResult> {
    println!("--- Selectors ---");
    let mut results = Vec::new();
    let activities = catalog.activities();

    let years = selectors::available_years(activities, SortOrder::Asc);
    results.push(check(
        "available_years",
        years == vec![2023, 2024, 2025],
        format!("{:?}", years),
    ));

    let categories = selectors::available_categories(activities);
    let members = selectors::available_members(activities);
    results.push(check(
        "available_tags",
        categories.len() >= 6 && members.len() >= 5,
        format!("{} categories, {} member tags", categories.len(), members.len()),
    ));

    // A cross-year activity is listed under its start year only.
    let all = compute_display_list(activities, &Filters::default());
    let under_2024 = selectors::display_for_year(&all, 2024);
    let under_2025 = selectors::display_for_year(&all, 2025);
    let listed_once = under_2024
        .iter()
        .any(|i| i.activity.activity.id == "act005")
        && !under_2025.iter().any(|i| i.activity.activity.id == "act005");
    results.push(check(
        "cross_year_listed_once",
        listed_once,
        "act005 appears under 2024 only".into(),
    ));

    let limited = selectors::visible_slice(&all, false);
    let full = selectors::visible_slice(&all, true);
    results.push(check(
        "visible_slice",
        limited.len() <= 10 && full.len() == all.len(),
        format!("{} of {} rows without show-all", limited.len(), full.len()),
    ));

    results
}
