//! Session descriptors from the upstream session listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One session as listed by `GET /sessions?year=YYYY`.
///
/// A season listing mixes practice, qualifying, and scoring sessions; only
/// `session_type == "Race"` entries count towards standings. See
/// [`SessionMeta::event_kind`].
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionMeta {
    /// Opaque upstream key used for follow-up roster/position queries
    pub session_key: Option<i64>,
    /// Session name ("Race", "Sprint", "Qualifying", ...)
    pub session_name: Option<String>,
    /// Session type ("Race", "Practice", "Qualifying", ...)
    pub session_type: Option<String>,
    /// Host country, used as the display label
    pub country_name: Option<String>,
    /// Scheduled start time
    pub date_start: Option<DateTime<Utc>>,
}

/// Scoring category of a session, selecting which points table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Full-length event, scored with the main points table
    Main,
    /// Sprint event, scored with the short points table
    Short,
}

impl SessionMeta {
    /// Parse one session-listing response body.
    pub fn parse_list(json: &str) -> crate::Result<Vec<Self>> {
        serde_json::from_str(json)
            .map_err(|e| crate::StandingsError::decode("session list deserialization", e))
    }

    /// Scoring category of this session, or `None` for sessions that do not
    /// count towards standings (practice, qualifying, absent type).
    pub fn event_kind(&self) -> Option<EventKind> {
        if self.session_type.as_deref() != Some("Race") {
            return None;
        }
        match self.session_name.as_deref() {
            Some("Sprint") => Some(EventKind::Short),
            _ => Some(EventKind::Main),
        }
    }

    /// Display label: the host country, with " Sprint" appended for sprint
    /// sessions. Falls back to "Unknown" when the country is absent.
    pub fn label(&self) -> String {
        let country = self.country_name.as_deref().unwrap_or("Unknown");
        match self.event_kind() {
            Some(EventKind::Short) => format!("{country} Sprint"),
            _ => country.to_string(),
        }
    }
}
