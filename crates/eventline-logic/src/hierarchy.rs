//! Depth-1 parent/child adjacency over the activity list.
//!
//! Children are referenced from their parent's id list and resolved
//! through this index rather than embedded references, keeping the data
//! serializable and acyclic by convention. Exactly one level is ever
//! traversed — nothing in the data or logic nests deeper.

use std::collections::HashMap;

use crate::model::ProcessedActivity;

/// Lookup index built once per activity list.
#[derive(Debug)]
pub struct ChildIndex<'a> {
    by_id: HashMap<&'a str, &'a ProcessedActivity>,
    child_to_parent: HashMap<&'a str, &'a str>,
}

impl<'a> ChildIndex<'a> {
    pub fn build(activities: &'a [ProcessedActivity]) -> Self {
        let mut by_id = HashMap::with_capacity(activities.len());
        for pa in activities {
            by_id.insert(pa.activity.id.as_str(), pa);
        }

        let mut child_to_parent = HashMap::new();
        for pa in activities {
            for child_id in pa.activity.child_ids() {
                child_to_parent.insert(child_id, pa.activity.id.as_str());
            }
        }

        Self {
            by_id,
            child_to_parent,
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a ProcessedActivity> {
        self.by_id.get(id).copied()
    }

    /// Whether `id` appears in some other activity's child list. Such
    /// activities are excluded from top-level listings.
    pub fn is_child(&self, id: &str) -> bool {
        self.child_to_parent.contains_key(id)
    }

    pub fn parent_of(&self, id: &str) -> Option<&'a ProcessedActivity> {
        self.child_to_parent.get(id).and_then(|pid| self.get(pid))
    }

    /// Resolve a parent's authored child list in order, skipping ids with
    /// no matching record.
    pub fn children_of(&self, parent: &ProcessedActivity) -> Vec<&'a ProcessedActivity> {
        parent
            .activity
            .child_ids()
            .filter_map(|id| {
                let found = self.get(id);
                if found.is_none() {
                    log::warn!(
                        "activity {}: child id {} has no record",
                        parent.activity.id,
                        id
                    );
                }
                found
            })
            .collect()
    }
}
