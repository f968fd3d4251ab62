//! Pure timeline logic for Eventline.
//!
//! This crate contains all dashboard computation that is independent of
//! any UI framework, store, or runtime. Functions take plain data and a
//! caller-supplied instant and return results, making them unit-testable
//! and portable between the web dashboard and native tooling.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Cutover hours, currency conversions, display tables |
//! | [`countdown`] | Days/hours remaining until an activity ends |
//! | [`filter`] | Sort + predicate filters + parent/child display lists |
//! | [`hierarchy`] | Depth-1 child adjacency index over the activity list |
//! | [`layout`] | 12-month-grid bar geometry with cross-year clipping |
//! | [`model`] | Serde data types mirroring the authored JSON datasets |
//! | [`search`] | Name/card substring search, cursor, debounce |
//! | [`status`] | Date-derived completed/ongoing/upcoming resolution |
//! | [`valuation`] | Value-per-draw formula and package ranking |

pub mod constants;
pub mod countdown;
pub mod filter;
pub mod hierarchy;
pub mod layout;
pub mod model;
pub mod search;
pub mod status;
pub mod valuation;
