//! # Season Standings Core
//!
//! Turns a season's raw timing data into running standings. The pipeline is
//! a single sequential fold over the scoring sessions of a year; every fetch
//! failure degrades to "no data for that call" so a flaky upstream costs
//! sessions, not the season.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Season Aggregation                      │
//! │                                                          │
//! │  sessions?year ──► select ──► fold over sessions ──┐     │
//! │                                 │                  │     │
//! │                       positions per session        │     │
//! │                                 │                  ▼     │
//! │                       final positions ──► SeasonAggregate│
//! │                                 ▲                  │     │
//! │                       roster / driver lookups ◄────┘     │
//! │                          (identity resolution)           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The finished [`SeasonAggregate`] is an owned value: callers hand it to the
//! view functions for sorted standings and chart series, then drop it. Only
//! rendered images are ever cached.

// Submodules
pub mod extract;
pub mod identity;
pub mod points;
pub mod select;
pub mod season;
pub mod view;

// Re-exports
pub use extract::final_positions;
pub use identity::Identity;
pub use points::points_for;
pub use season::{DriverSeason, SeasonAggregate, aggregate_season};
pub use select::{ScoredSession, select_sessions};
pub use view::{PointsSeries, StandingsRow, SummaryRow, points_series, standings, summary};

/// Car number, the stable driver identifier within a season.
pub type DriverNumber = u32;
