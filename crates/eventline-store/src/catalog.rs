//! In-memory catalog of the loaded datasets.
//!
//! Everything is loaded once at startup and stays immutable afterwards,
//! with one exception: the derived-status overlay, which is recomputed
//! wholesale from a single instant. Authored statuses are never touched.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use eventline_logic::model::{Activity, CardSet, Package, ProcessedActivity};
use eventline_logic::status::resolve_status;

#[derive(Debug, Clone)]
pub struct Catalog {
    activities: Vec<ProcessedActivity>,
    packages: Vec<Package>,
    cards: Vec<CardSet>,
    package_index: HashMap<String, usize>,
}

impl Catalog {
    /// Assemble a catalog with statuses resolved at `now`.
    pub fn new(
        activities: Vec<Activity>,
        packages: Vec<Package>,
        cards: Vec<CardSet>,
        now: NaiveDateTime,
    ) -> Self {
        let activities = activities
            .into_iter()
            .map(|activity| {
                let calculated_status = resolve_status(&activity, now);
                ProcessedActivity {
                    activity,
                    calculated_status,
                }
            })
            .collect();
        let package_index = packages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Self {
            activities,
            packages,
            cards,
            package_index,
        }
    }

    /// Recompute the status overlay against a new instant.
    pub fn refresh_statuses(&mut self, now: NaiveDateTime) {
        for pa in &mut self.activities {
            pa.calculated_status = resolve_status(&pa.activity, now);
        }
    }

    pub fn activities(&self) -> &[ProcessedActivity] {
        &self.activities
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn cards(&self) -> &[CardSet] {
        &self.cards
    }

    pub fn package(&self, id: &str) -> Option<&Package> {
        self.package_index.get(id).map(|&i| &self.packages[i])
    }

    /// The package an activity promotes, if it references one that exists.
    pub fn package_for_activity(&self, activity: &Activity) -> Option<&Package> {
        let id = activity.package_id.as_deref()?;
        let found = self.package(id);
        if found.is_none() {
            log::warn!("activity {}: package id {} has no record", activity.id, id);
        }
        found
    }

    /// Ids of packages some activity actually references.
    pub fn used_package_ids(&self) -> HashSet<&str> {
        self.activities
            .iter()
            .filter_map(|pa| pa.activity.package_id.as_deref())
            .collect()
    }
}
