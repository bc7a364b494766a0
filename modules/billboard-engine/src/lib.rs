//! The incremental catalog browsing engine.
//!
//! One [`BrowsingEngine`] per browsing context owns the active
//! [`FilterSet`], the [`PageCursor`] and the accumulated result list, and
//! turns filter changes and "load more" requests into race-guarded fetches
//! against an injected catalog client. [`ProximityFilter`] is the sibling
//! orchestrator for the nearby query.

pub mod cursor;
pub mod engine;
pub mod filters;
pub mod proximity;

pub use cursor::PageCursor;
pub use engine::{Applied, BrowsingEngine, EngineError, FetchKind, PendingFetch};
pub use filters::{FilterPatch, FilterSet, SortOrder};
pub use proximity::{rank_nearby, ProximityError, ProximityFilter, NEARBY_RADIUS_KM};
