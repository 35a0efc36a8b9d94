//! Driver identity resolution.
//!
//! Standings need a display name, team, and color per car number. The season
//! fold records the first roster it can get (the primary phase); whatever is
//! still unresolved afterwards goes through the fallback here: a handful of
//! season rosters, then one direct lookup per driver, then the placeholder.
//! Every driver that ever appeared in a position record ends up with an
//! identity, possibly the placeholder one.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::provider::TimingSource;
use crate::schema::{NEUTRAL_COLOR, RosterEntry, SessionMeta};
use crate::standings::DriverNumber;

/// Placeholder for a name or team that could not be resolved.
pub const UNKNOWN: &str = "unknown";

/// How many season rosters the fallback tries before per-driver lookups.
pub const FALLBACK_ROSTER_LIMIT: usize = 5;

/// Resolved display metadata for one driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Display abbreviation
    pub name: String,
    /// Team affiliation
    pub team: String,
    /// Team color as hex RGB without the leading `#`
    pub colour: String,
}

impl Identity {
    /// Identity used when every lookup failed.
    pub fn placeholder() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            team: UNKNOWN.to_string(),
            colour: NEUTRAL_COLOR.to_string(),
        }
    }
}

/// Record every usable entry of one roster into the identity map.
///
/// An entry needs both a car number and a display name; a missing team or
/// color falls back to the fixed defaults. Already-resolved drivers are left
/// untouched, so the first roster to name a driver wins.
pub fn record_roster(
    identities: &mut BTreeMap<DriverNumber, Identity>,
    roster: &[RosterEntry],
) {
    for entry in roster {
        let (Some(number), Some(name)) = (entry.driver_number, entry.name_acronym.as_deref())
        else {
            continue;
        };
        identities.entry(number).or_insert_with(|| Identity {
            name: name.to_string(),
            team: entry.team_name.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            colour: entry.team_colour.clone().unwrap_or_else(|| NEUTRAL_COLOR.to_string()),
        });
    }
}

/// The drivers in `appeared` that have no identity yet.
///
/// Built fresh on every call; the fallback never mutates a missing-list while
/// walking it.
fn unresolved(
    appeared: &[DriverNumber],
    identities: &BTreeMap<DriverNumber, Identity>,
) -> Vec<DriverNumber> {
    appeared.iter().copied().filter(|number| !identities.contains_key(number)).collect()
}

/// Resolve every appeared driver that the primary phase missed.
///
/// Tries the rosters of up to [`FALLBACK_ROSTER_LIMIT`] sessions from the
/// season listing (in listing order, scoring or not), stopping as soon as
/// nothing is missing. Drivers still unresolved get one direct lookup each;
/// if that fails too they get the placeholder identity. Lookup errors are
/// logged and never propagate.
pub async fn resolve_missing<S>(
    source: &S,
    season_listing: &[SessionMeta],
    appeared: &[DriverNumber],
    identities: &mut BTreeMap<DriverNumber, Identity>,
) where
    S: TimingSource + ?Sized,
{
    let mut missing = unresolved(appeared, identities);
    if missing.is_empty() {
        return;
    }
    debug!(missing = missing.len(), "resolving driver identities via fallback");

    let keys = season_listing.iter().filter_map(|meta| meta.session_key);
    for session_key in keys.take(FALLBACK_ROSTER_LIMIT) {
        if missing.is_empty() {
            break;
        }
        match source.roster(session_key).await {
            Ok(roster) => record_roster(identities, &roster),
            Err(error) => {
                warn!(session_key, %error, "roster fetch failed during identity fallback");
            }
        }
        missing = unresolved(appeared, identities);
    }

    for number in missing {
        match source.driver_by_number(number).await {
            Ok(entries) => {
                let matching: Vec<RosterEntry> = entries
                    .into_iter()
                    .filter(|entry| entry.driver_number == Some(number))
                    .collect();
                record_roster(identities, &matching);
            }
            Err(error) => {
                warn!(driver_number = number, %error, "driver lookup failed");
            }
        }
        identities.entry(number).or_insert_with(Identity::placeholder);
    }
}
