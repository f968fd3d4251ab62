//! Shared constants — cutover hours, currency conversions, display tables.
//!
//! Fixed by the game's economy and server schedule; none of these are
//! configurable at runtime.

/// Hour of day (local) at which an activity's start date takes effect.
pub const START_CUTOVER_HOUR: u32 = 9;

/// Hour of day (local) on the morning *after* the end date at which an
/// activity stops counting as running. Grace window over the server reset.
pub const END_CUTOVER_HOUR: u32 = 4;

/// Diamond value of one draw-equivalent (paint) unit.
pub const DIAMONDS_PER_DRAW: f64 = 150.0;

/// Diamond value of one stamina unit.
pub const DIAMONDS_PER_STAMINA: f64 = 0.5;

/// Member tag marking a full-cast flagship activity.
pub const FLAGSHIP_MEMBER_TAG: &str = "五人大活動";

/// The one member the flagship tag does not stand in for.
pub const FLAGSHIP_EXCLUDED_MEMBER: &str = "風硯";

/// Quiet period before free-text search recomputes.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Rows shown per year section before the show-all toggle.
pub const DEFAULT_VISIBLE_COUNT: usize = 10;

/// Fallback bar width (percent of the row, roughly one month) when an
/// activity's dates cannot be parsed.
pub const FALLBACK_SEGMENT_WIDTH: f64 = 10.0;
