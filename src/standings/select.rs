//! Selection and ordering of the sessions that count towards standings.

use chrono::{DateTime, Utc};

use crate::schema::SessionMeta;
use crate::schema::session::EventKind;

/// One session that counts towards season standings.
///
/// Unlike the wire model, every field here is present: descriptors missing a
/// key or start time cannot be scored and never become a `ScoredSession`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSession {
    /// Upstream key for roster and position queries
    pub key: i64,
    /// Display label for chart axes
    pub label: String,
    /// Which points table applies
    pub kind: EventKind,
    /// Scheduled start, the ordering key
    pub start: DateTime<Utc>,
}

/// Filter a season listing down to its scoring sessions, in chronological
/// order.
///
/// Practice and qualifying sessions are excluded, as are descriptors missing
/// a session key or start time. The sort is stable, so sessions sharing a
/// start time keep their upstream relative order.
pub fn select_sessions(listing: &[SessionMeta]) -> Vec<ScoredSession> {
    let mut selected: Vec<ScoredSession> = listing
        .iter()
        .filter_map(|meta| {
            let kind = meta.event_kind()?;
            Some(ScoredSession {
                key: meta.session_key?,
                label: meta.label(),
                kind,
                start: meta.date_start?,
            })
        })
        .collect();
    selected.sort_by_key(|session| session.start);
    selected
}
