//! Source trait for upstream timing data

use crate::Result;
use crate::schema::{PositionRecord, RosterEntry, SessionMeta};

/// Trait for upstream timing data sources
///
/// Sources abstract over where season data comes from (the live timing API,
/// scripted fixtures in tests) and cover the four queries the aggregation
/// pipeline needs. All methods return raw wire models; filtering,
/// deduplication, and defaulting happen downstream.
///
/// The aggregator treats any error as "no data for this call": it logs and
/// keeps whatever partial aggregate it has built so far.
#[async_trait::async_trait]
pub trait TimingSource: Send + Sync + 'static {
    /// List every session of a season, scoring or not, in upstream order.
    async fn sessions_for_year(&self, year: i32) -> Result<Vec<SessionMeta>>;

    /// List the raw position feed of one session.
    async fn positions(&self, session_key: i64) -> Result<Vec<PositionRecord>>;

    /// List the driver roster of one session.
    async fn roster(&self, session_key: i64) -> Result<Vec<RosterEntry>>;

    /// Look up a single driver by car number, independent of any session.
    ///
    /// Returns every matching entry; the resolver takes the first usable one.
    async fn driver_by_number(&self, driver_number: u32) -> Result<Vec<RosterEntry>>;
}
