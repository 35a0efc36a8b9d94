//! Roster entries from the upstream driver listing.

use serde::{Deserialize, Serialize};

/// One driver as listed by `GET /drivers?session_key=K` (or
/// `?driver_number=N` for the per-driver fallback lookup).
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RosterEntry {
    /// Car number, the stable identifier within a season
    pub driver_number: Option<u32>,
    /// Three-letter display abbreviation
    pub name_acronym: Option<String>,
    /// Team affiliation
    pub team_name: Option<String>,
    /// Team color as hex RGB without the leading `#`
    pub team_colour: Option<String>,
}

impl RosterEntry {
    /// Parse one roster response body.
    pub fn parse_list(json: &str) -> crate::Result<Vec<Self>> {
        serde_json::from_str(json)
            .map_err(|e| crate::StandingsError::decode("roster deserialization", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roster_with_partial_entries() {
        let json = r#"[
            {"driver_number": 1, "name_acronym": "VER",
             "team_name": "Red Bull Racing", "team_colour": "3671C6"},
            {"driver_number": 44, "name_acronym": "HAM", "team_colour": null},
            {"name_acronym": "GHO"}
        ]"#;
        let roster = RosterEntry::parse_list(json).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].team_colour.as_deref(), Some("3671C6"));
        assert_eq!(roster[1].team_colour, None);
        assert_eq!(roster[2].driver_number, None);
    }

    #[test]
    fn rejects_malformed_roster() {
        let err = RosterEntry::parse_list("not json").unwrap_err();
        assert!(matches!(err, crate::StandingsError::Decode { .. }));
    }
}
