//! Test utilities shared by unit tests and benches.
//!
//! The centerpiece is [`ScriptedSource`], an in-memory [`TimingSource`] built
//! from fixtures: sessions are registered in chronological order and answer
//! roster/position queries from maps, with per-call failure switches for
//! exercising the degradation paths.

#![cfg(any(test, feature = "benchmark"))]

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, TimeZone, Utc};

use crate::provider::TimingSource;
use crate::schema::{PositionRecord, RosterEntry, SessionMeta};
use crate::standings::DriverNumber;
use crate::{Result, StandingsError};

/// Roster entry with just a number and a name, defaults elsewhere.
pub fn named_entry(number: u32, name: &str) -> RosterEntry {
    RosterEntry {
        driver_number: Some(number),
        name_acronym: Some(name.to_string()),
        ..Default::default()
    }
}

/// Scripted in-memory timing source.
///
/// Sessions appear in the listing in registration order, one day apart, with
/// country labels "Round 1", "Round 2", ... so chronological order equals
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    listing: Vec<SessionMeta>,
    rosters: BTreeMap<i64, Vec<RosterEntry>>,
    positions: BTreeMap<i64, Vec<PositionRecord>>,
    driver_lookups: BTreeMap<DriverNumber, Vec<RosterEntry>>,
    fail_listing: bool,
    failing_positions: BTreeSet<i64>,
    failing_rosters: BTreeSet<i64>,
    fail_driver_lookups: bool,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_session(&mut self, key: i64, name: &str, session_type: &str) {
        let round = self.listing.len() + 1;
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
            + Duration::days(self.listing.len() as i64);
        self.listing.push(SessionMeta {
            session_key: Some(key),
            session_name: Some(name.to_string()),
            session_type: Some(session_type.to_string()),
            country_name: Some(format!("Round {round}")),
            date_start: Some(start),
        });
    }

    /// Register a main race session with its roster.
    pub fn with_session(mut self, key: i64, roster: &[RosterEntry]) -> Self {
        self.push_session(key, "Race", "Race");
        self.rosters.insert(key, roster.to_vec());
        self
    }

    /// Register a sprint session with its roster.
    pub fn with_sprint(mut self, key: i64, roster: &[RosterEntry]) -> Self {
        self.push_session(key, "Sprint", "Race");
        self.rosters.insert(key, roster.to_vec());
        self
    }

    /// Register a practice session; it shows up in the listing only.
    pub fn with_nonscoring(mut self, key: i64) -> Self {
        self.push_session(key, "Practice 1", "Practice");
        self
    }

    /// Script a session's position feed so that extraction yields exactly
    /// the given (driver, position) finals.
    pub fn with_positions(mut self, key: i64, finals: &[(u32, u32)]) -> Self {
        let records = finals
            .iter()
            .enumerate()
            .map(|(index, &(number, position))| PositionRecord {
                driver_number: Some(number),
                position: Some(position),
                date: Some(Utc.timestamp_opt(1_709_290_000 + index as i64, 0).unwrap()),
            })
            .collect();
        self.positions.insert(key, records);
        self
    }

    /// Script the per-driver lookup response for one driver.
    pub fn with_driver_lookup(mut self, entry: RosterEntry) -> Self {
        if let Some(number) = entry.driver_number {
            self.driver_lookups.entry(number).or_default().push(entry);
        }
        self
    }

    /// Make the season listing query fail.
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Make the position query for one session fail.
    pub fn failing_positions(mut self, key: i64) -> Self {
        self.failing_positions.insert(key);
        self
    }

    /// Make the roster query for one session fail.
    pub fn failing_roster(mut self, key: i64) -> Self {
        self.failing_rosters.insert(key);
        self
    }

    /// Make every per-driver lookup fail.
    pub fn failing_driver_lookups(mut self) -> Self {
        self.fail_driver_lookups = true;
        self
    }

    /// The season listing this source would return, for direct calls into
    /// the identity fallback.
    pub fn season_listing(&self) -> Vec<SessionMeta> {
        self.listing.clone()
    }
}

#[async_trait::async_trait]
impl TimingSource for ScriptedSource {
    async fn sessions_for_year(&self, _year: i32) -> Result<Vec<SessionMeta>> {
        if self.fail_listing {
            return Err(StandingsError::upstream("scripted listing failure"));
        }
        Ok(self.listing.clone())
    }

    async fn positions(&self, session_key: i64) -> Result<Vec<PositionRecord>> {
        if self.failing_positions.contains(&session_key) {
            return Err(StandingsError::upstream("scripted position failure"));
        }
        Ok(self.positions.get(&session_key).cloned().unwrap_or_default())
    }

    async fn roster(&self, session_key: i64) -> Result<Vec<RosterEntry>> {
        if self.failing_rosters.contains(&session_key) {
            return Err(StandingsError::upstream("scripted roster failure"));
        }
        Ok(self.rosters.get(&session_key).cloned().unwrap_or_default())
    }

    async fn driver_by_number(&self, driver_number: u32) -> Result<Vec<RosterEntry>> {
        if self.fail_driver_lookups {
            return Err(StandingsError::upstream("scripted lookup failure"));
        }
        Ok(self.driver_lookups.get(&driver_number).cloned().unwrap_or_default())
    }
}

/// Build a season where every driver finishes every session, with positions
/// rotating so points spread across the field.
pub fn synthetic_season(session_count: usize, driver_count: usize) -> ScriptedSource {
    let roster: Vec<RosterEntry> = (1..=driver_count as u32)
        .map(|number| RosterEntry {
            driver_number: Some(number),
            name_acronym: Some(format!("D{number:02}")),
            team_name: Some(format!("Team {}", (number + 1) / 2)),
            team_colour: Some(format!("{:06X}", number * 0x010305)),
        })
        .collect();

    let mut source = ScriptedSource::new();
    for session_index in 0..session_count {
        let key = 1_000 + session_index as i64;
        source = source.with_session(key, &roster);
        let finals: Vec<(u32, u32)> = (0..driver_count)
            .map(|driver_index| {
                let number = driver_index as u32 + 1;
                let position = ((driver_index + session_index) % driver_count) as u32 + 1;
                (number, position)
            })
            .collect();
        source = source.with_positions(key, &finals);
    }
    source
}

/// Build one session's raw feed with several timestamped updates per driver,
/// newest last.
pub fn synthetic_feed(driver_count: usize, updates_per_driver: usize) -> Vec<PositionRecord> {
    let mut records = Vec::with_capacity(driver_count * updates_per_driver);
    for update in 0..updates_per_driver {
        for driver_index in 0..driver_count {
            let number = driver_index as u32 + 1;
            let position = ((driver_index + update) % driver_count) as u32 + 1;
            records.push(PositionRecord {
                driver_number: Some(number),
                position: Some(position),
                date: Some(
                    Utc.timestamp_opt((update * driver_count + driver_index) as i64, 0).unwrap(),
                ),
            });
        }
    }
    records
}
