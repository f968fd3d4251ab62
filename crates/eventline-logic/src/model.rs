//! Plain data types mirroring the authored JSON datasets.
//!
//! Field names serialize as camelCase to stay byte-compatible with the
//! static files the dashboard ships. Dates are kept as authored strings —
//! a malformed record must survive deserialization and fall back at
//! computation time instead of breaking the whole load.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Completed,
    Ongoing,
    Upcoming,
}

/// A field authored either as a single string or as a list of strings.
///
/// The datasets use both shapes for category tags and card activity ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::One(s) => s == value,
            Self::Many(list) => list.iter().any(|s| s == value),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            Self::One(s) => std::slice::from_ref(s),
            Self::Many(list) => list.as_slice(),
        };
        slice.iter().map(String::as_str)
    }
}

/// A time-boxed in-game event shown on the timeline.
///
/// Authored statically; never mutated at runtime. The derived status lives
/// on [`ProcessedActivity`], not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    /// ISO calendar date (`YYYY-MM-DD`), regional-server local time.
    pub start_date: String,
    pub end_date: String,
    /// Mirrored dates on the reference (CN) server, where known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cn_start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cn_end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jp_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en_name: Option<String>,
    /// Authored status, used as the fallback when dates cannot be parsed.
    pub status: ActivityStatus,
    pub url: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ids of directly nested activities. The hierarchy is one level deep;
    /// nothing ever recurses further.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_activities: Option<Vec<String>>,
    /// Id of the purchase package promoted alongside this activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(default)]
    pub is_major_event: bool,
    /// Placed outside strict date order on the original chart.
    #[serde(default)]
    pub non_chronological: bool,
}

impl Activity {
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.category.iter().flat_map(|tags| tags.iter())
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.member
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(String::as_str)
    }

    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.children_activities
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(String::as_str)
    }
}

/// An activity plus its freshly derived status.
///
/// The authored `status` is never overwritten; the derived value is an
/// overlay recomputed wholesale from a single instant on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedActivity {
    #[serde(flatten)]
    pub activity: Activity,
    pub calculated_status: ActivityStatus,
}

impl ProcessedActivity {
    /// The status the dashboard should display and sort by.
    pub fn effective_status(&self) -> ActivityStatus {
        self.calculated_status
    }
}

/// One priced tier of a purchase package.
///
/// Quantities default to zero; value-per-draw is derived on demand and
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOption {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub total_draws: f64,
    #[serde(default)]
    pub diamonds: f64,
    #[serde(default)]
    pub stamina: f64,
}

/// A named bundle of pricing options, referenced by activities via
/// `packageId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Authored but not currently used to filter display.
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub pricing_options: Vec<PricingOption>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardItem {
    pub name: String,
    pub image: String,
}

/// SSR card art attached to one or more activities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSet {
    pub title: String,
    pub item: Vec<CardItem>,
    pub activity_id: OneOrMany,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_or_many_contains() {
        let one = OneOrMany::One("限時活動".into());
        assert!(one.contains("限時活動"));
        assert!(!one.contains("復刻活動"));

        let many = OneOrMany::Many(vec!["限時活動".into(), "復刻活動".into()]);
        assert!(many.contains("復刻活動"));
        assert!(!many.contains("主線活動"));
    }

    #[test]
    fn test_one_or_many_deserializes_both_shapes() {
        let one: OneOrMany = serde_json::from_str(r#""act001""#).unwrap();
        assert_eq!(one, OneOrMany::One("act001".into()));

        let many: OneOrMany = serde_json::from_str(r#"["act001", "act002"]"#).unwrap();
        assert!(many.contains("act002"));
    }

    #[test]
    fn test_activity_optional_fields_default() {
        let json = r#"{
            "id": "act001",
            "name": "夏日祭典",
            "startDate": "2025-07-01",
            "endDate": "2025-07-14",
            "status": "upcoming",
            "url": "https://example.com/act001",
            "image": "/images/act001.png"
        }"#;
        let a: Activity = serde_json::from_str(json).unwrap();
        assert!(a.category.is_none());
        assert!(a.member.is_none());
        assert!(a.children_activities.is_none());
        assert!(!a.is_major_event);
        assert!(!a.non_chronological);
        assert_eq!(a.members().count(), 0);
        assert_eq!(a.child_ids().count(), 0);
    }

    #[test]
    fn test_activity_camel_case_fields() {
        let json = r#"{
            "id": "act002",
            "name": "週年慶典",
            "startDate": "2025-03-01",
            "endDate": "2025-03-21",
            "cnStartDate": "2024-03-01",
            "cnEndDate": "2024-03-21",
            "status": "completed",
            "url": "https://example.com/act002",
            "image": "/images/act002.png",
            "category": ["大型活動", "限時活動"],
            "member": ["五人大活動"],
            "childrenActivities": ["act003"],
            "packageId": "pkg001",
            "isMajorEvent": true
        }"#;
        let a: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(a.cn_start_date.as_deref(), Some("2024-03-01"));
        assert_eq!(a.child_ids().collect::<Vec<_>>(), vec!["act003"]);
        assert_eq!(a.package_id.as_deref(), Some("pkg001"));
        assert!(a.is_major_event);
        assert_eq!(a.categories().count(), 2);
    }

    #[test]
    fn test_pricing_option_quantities_default_zero() {
        let json = r#"{"name": "顏料禮包", "price": 33, "totalDraws": 1}"#;
        let option: PricingOption = serde_json::from_str(json).unwrap();
        assert_eq!(option.total_draws, 1.0);
        assert_eq!(option.diamonds, 0.0);
        assert_eq!(option.stamina, 0.0);
    }

    #[test]
    fn test_package_is_active_defaults_true() {
        let json = r#"{"id": "pkg001", "name": "復刻禮包", "pricingOptions": []}"#;
        let package: Package = serde_json::from_str(json).unwrap();
        assert!(package.is_active);
    }

    #[test]
    fn test_card_set_single_activity_id() {
        let json = r#"{
            "title": "萬聖奇幻夜",
            "item": [{"name": "夜之舞會", "image": "https://example.com/card1.jpg"}],
            "activityId": "act001"
        }"#;
        let card: CardSet = serde_json::from_str(json).unwrap();
        assert!(card.activity_id.contains("act001"));
    }
}
