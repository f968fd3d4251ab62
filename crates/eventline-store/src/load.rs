//! Dataset loading — one bulk deserialize at startup.
//!
//! Loading either succeeds wholesale or fails with a typed error the
//! caller surfaces as an explicit error state with a manual reload
//! affordance. There is no partial load and no automatic retry.

use chrono::NaiveDateTime;
use thiserror::Error;

use eventline_logic::model::{Activity, CardSet, Package};

use crate::catalog::Catalog;

/// Why a bulk load failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("activities dataset: {0}")]
    Activities(#[source] serde_json::Error),
    #[error("packages dataset: {0}")]
    Packages(#[source] serde_json::Error),
    #[error("cards dataset: {0}")]
    Cards(#[source] serde_json::Error),
}

/// Deserialize the three dataset documents and assemble a catalog with
/// statuses resolved at `now`.
pub fn catalog_from_json(
    activities_json: &str,
    packages_json: &str,
    cards_json: &str,
    now: NaiveDateTime,
) -> Result<Catalog, LoadError> {
    let activities: Vec<Activity> =
        serde_json::from_str(activities_json).map_err(LoadError::Activities)?;
    let packages: Vec<Package> =
        serde_json::from_str(packages_json).map_err(LoadError::Packages)?;
    let cards: Vec<CardSet> = serde_json::from_str(cards_json).map_err(LoadError::Cards)?;
    Ok(Catalog::new(activities, packages, cards, now))
}
