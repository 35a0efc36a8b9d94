//! Position updates from the upstream position feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped position update from `GET /position?session_key=K`.
///
/// The feed emits many updates per driver over a session; the extractor keeps
/// only the chronologically last one. Records missing the driver number or
/// the position are unusable and get dropped there.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PositionRecord {
    /// Car number the update applies to
    pub driver_number: Option<u32>,
    /// Classification at the time of the update, 1-based
    pub position: Option<u32>,
    /// When the update was recorded
    pub date: Option<DateTime<Utc>>,
}

impl PositionRecord {
    /// Parse one position-feed response body.
    pub fn parse_list(json: &str) -> crate::Result<Vec<Self>> {
        serde_json::from_str(json)
            .map_err(|e| crate::StandingsError::decode("position feed deserialization", e))
    }
}
