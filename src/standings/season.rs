//! The season aggregation fold.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::provider::TimingSource;
use crate::standings::identity::{self, Identity};
use crate::standings::points::points_for;
use crate::standings::select::{ScoredSession, select_sessions};
use crate::standings::{DriverNumber, extract};

/// Per-driver running state across a season.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverSeason {
    /// Final position per processed session; `None` marks a session the
    /// driver registered no position in
    pub position_history: Vec<Option<u32>>,
    /// Running points total
    pub cumulative_points: u32,
    /// Snapshot of the running total after each processed session
    pub points_history: Vec<u32>,
}

impl DriverSeason {
    /// State for a driver first seen after `sessions` sessions were already
    /// processed: histories padded so every driver's lengths stay aligned.
    fn backfilled(sessions: usize) -> Self {
        Self {
            position_history: vec![None; sessions],
            cumulative_points: 0,
            points_history: vec![0; sessions],
        }
    }

    /// Number of sessions with a classified finish.
    pub fn races_completed(&self) -> usize {
        self.position_history.iter().flatten().count()
    }

    /// Mean classified finishing position, when there is one.
    pub fn average_position(&self) -> Option<f64> {
        let finishes = self.races_completed();
        if finishes == 0 {
            return None;
        }
        let total: u32 = self.position_history.iter().flatten().copied().sum();
        Some(f64::from(total) / finishes as f64)
    }
}

/// Complete derived dataset for one season, built fresh per request.
#[derive(Debug, Clone, Default)]
pub struct SeasonAggregate {
    /// The season year this aggregate was built for
    pub year: i32,
    /// Per-driver histories, keyed by car number
    pub drivers: BTreeMap<DriverNumber, DriverSeason>,
    /// Resolved display metadata per car number
    pub identities: BTreeMap<DriverNumber, Identity>,
    /// Labels of processed sessions, in processing order
    pub session_labels: Vec<String>,
}

impl SeasonAggregate {
    /// The empty aggregate, doubling as the "no data for this year" result.
    pub fn empty(year: i32) -> Self {
        Self { year, ..Default::default() }
    }

    /// True when no driver ever registered a position. Callers must treat
    /// an empty aggregate as "no data available" for the year.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Sessions folded in so far.
    pub fn sessions_processed(&self) -> usize {
        self.session_labels.len()
    }

    /// Fold one session's final positions into the aggregate.
    ///
    /// Participants get their position appended and points added per the
    /// session's table, with first-time drivers backfilled beforehand. Every
    /// other known driver gets a null position and an unchanged points
    /// snapshot, so non-participation never gains or loses points. After the
    /// fold, every known driver's histories are exactly as long as the
    /// number of sessions processed.
    pub fn apply_session(
        &mut self,
        session: &ScoredSession,
        finals: &BTreeMap<DriverNumber, u32>,
    ) {
        let processed = self.sessions_processed();

        for (&number, &position) in finals {
            let driver = self
                .drivers
                .entry(number)
                .or_insert_with(|| DriverSeason::backfilled(processed));
            driver.position_history.push(Some(position));
            driver.cumulative_points += points_for(session.kind, position);
            driver.points_history.push(driver.cumulative_points);
        }

        for (number, driver) in &mut self.drivers {
            if !finals.contains_key(number) {
                driver.position_history.push(None);
                driver.points_history.push(driver.cumulative_points);
            }
        }

        self.session_labels.push(session.label.clone());
    }
}

/// Aggregate a full season from the given source.
///
/// The fold is strictly sequential: one fetch at a time, in chronological
/// session order. Failed fetches are logged and degrade to "no data for this
/// call". A failed position feed advances the session with nulls for every
/// known driver, a failed roster retries on the next session, and a failed
/// season listing yields the empty aggregate. The result is always
/// well-formed, possibly empty.
pub async fn aggregate_season<S>(source: &S, year: i32) -> SeasonAggregate
where
    S: TimingSource + ?Sized,
{
    let listing = match source.sessions_for_year(year).await {
        Ok(listing) => listing,
        Err(error) => {
            warn!(year, %error, "season listing fetch failed");
            return SeasonAggregate::empty(year);
        }
    };

    let sessions = select_sessions(&listing);
    if sessions.is_empty() {
        info!(year, "no scoring sessions in season listing");
        return SeasonAggregate::empty(year);
    }
    info!(year, sessions = sessions.len(), "aggregating season");

    let mut aggregate = SeasonAggregate::empty(year);
    for session in &sessions {
        debug!(session_key = session.key, label = %session.label, "processing session");

        // Primary identity phase: the first roster that yields entries wins,
        // failures retry on the next session.
        if aggregate.identities.is_empty() {
            match source.roster(session.key).await {
                Ok(roster) => identity::record_roster(&mut aggregate.identities, &roster),
                Err(error) => warn!(session_key = session.key, %error, "roster fetch failed"),
            }
        }

        let finals = match source.positions(session.key).await {
            Ok(records) => extract::final_positions(&records),
            Err(error) => {
                warn!(session_key = session.key, %error, "position fetch failed");
                BTreeMap::new()
            }
        };

        aggregate.apply_session(session, &finals);
    }

    let appeared: Vec<DriverNumber> = aggregate.drivers.keys().copied().collect();
    identity::resolve_missing(source, &listing, &appeared, &mut aggregate.identities).await;

    debug!(
        year,
        drivers = aggregate.drivers.len(),
        sessions = aggregate.sessions_processed(),
        "season aggregation complete"
    );
    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedSource, named_entry};

    #[tokio::test]
    async fn two_main_sessions_accumulate_expected_histories() {
        let source = ScriptedSource::new()
            .with_session(100, &[named_entry(1, "ONE"), named_entry(2, "TWO")])
            .with_positions(100, &[(1, 1), (2, 2)])
            .with_session(200, &[])
            .with_positions(200, &[(1, 2), (2, 1)]);

        let aggregate = aggregate_season(&source, 2024).await;

        let first = aggregate.drivers.get(&1).unwrap();
        let second = aggregate.drivers.get(&2).unwrap();
        assert_eq!(first.position_history, vec![Some(1), Some(2)]);
        assert_eq!(first.points_history, vec![25, 43]);
        assert_eq!(first.cumulative_points, 43);
        assert_eq!(second.position_history, vec![Some(2), Some(1)]);
        assert_eq!(second.points_history, vec![18, 43]);
        assert_eq!(second.cumulative_points, 43);
        assert_eq!(aggregate.session_labels, vec!["Round 1", "Round 2"]);
    }

    #[tokio::test]
    async fn sprint_sessions_use_the_short_table() {
        let source = ScriptedSource::new()
            .with_sprint(100, &[named_entry(1, "ONE")])
            .with_positions(100, &[(1, 1), (2, 3)]);

        let aggregate = aggregate_season(&source, 2024).await;

        assert_eq!(aggregate.drivers.get(&1).unwrap().cumulative_points, 8);
        assert_eq!(aggregate.drivers.get(&2).unwrap().cumulative_points, 6);
        assert_eq!(aggregate.session_labels, vec!["Round 1 Sprint"]);
    }

    #[tokio::test]
    async fn late_joiners_are_backfilled() {
        let source = ScriptedSource::new()
            .with_session(100, &[])
            .with_positions(100, &[(1, 1)])
            .with_session(200, &[])
            .with_positions(200, &[(1, 2), (3, 1)]);

        let aggregate = aggregate_season(&source, 2024).await;

        let late = aggregate.drivers.get(&3).unwrap();
        assert_eq!(late.position_history, vec![None, Some(1)]);
        assert_eq!(late.points_history, vec![0, 25]);
    }

    #[tokio::test]
    async fn absent_drivers_keep_their_points_unchanged() {
        let source = ScriptedSource::new()
            .with_session(100, &[])
            .with_positions(100, &[(1, 1), (2, 2)])
            .with_session(200, &[])
            .with_positions(200, &[(1, 1)]);

        let aggregate = aggregate_season(&source, 2024).await;

        let vanished = aggregate.drivers.get(&2).unwrap();
        assert_eq!(vanished.position_history, vec![Some(2), None]);
        assert_eq!(vanished.points_history, vec![18, 18]);
    }

    #[tokio::test]
    async fn never_appearing_drivers_stay_out_of_the_aggregate() {
        let source = ScriptedSource::new()
            .with_session(100, &[named_entry(1, "ONE"), named_entry(5, "FIV")])
            .with_positions(100, &[(1, 1)]);

        let aggregate = aggregate_season(&source, 2024).await;

        assert!(aggregate.drivers.contains_key(&1));
        assert!(!aggregate.drivers.contains_key(&5));
    }

    #[tokio::test]
    async fn failed_position_fetch_advances_the_session_with_nulls() {
        let source = ScriptedSource::new()
            .with_session(100, &[])
            .with_positions(100, &[(1, 1), (2, 2)])
            .with_session(200, &[])
            .failing_positions(200)
            .with_session(300, &[])
            .with_positions(300, &[(1, 1), (2, 3)]);

        let aggregate = aggregate_season(&source, 2024).await;

        assert_eq!(aggregate.sessions_processed(), 3);
        for driver in aggregate.drivers.values() {
            assert_eq!(driver.position_history.len(), 3);
            assert_eq!(driver.points_history.len(), 3);
            assert_eq!(driver.position_history[1], None);
            assert_eq!(driver.points_history[1], driver.points_history[0]);
        }
    }

    #[tokio::test]
    async fn roster_failures_retry_on_the_next_session() {
        let source = ScriptedSource::new()
            .with_session(100, &[named_entry(1, "ONE")])
            .failing_roster(100)
            .with_positions(100, &[(1, 1)])
            .with_session(200, &[named_entry(1, "ONE")])
            .with_positions(200, &[(1, 1)]);

        let aggregate = aggregate_season(&source, 2024).await;

        assert_eq!(aggregate.identities.get(&1).unwrap().name, "ONE");
    }

    #[tokio::test]
    async fn non_scoring_sessions_never_enter_the_fold() {
        let source = ScriptedSource::new()
            .with_nonscoring(50)
            .with_session(100, &[])
            .with_positions(100, &[(1, 4)]);

        let aggregate = aggregate_season(&source, 2024).await;

        assert_eq!(aggregate.sessions_processed(), 1);
        assert_eq!(aggregate.drivers.get(&1).unwrap().cumulative_points, 12);
    }

    #[tokio::test]
    async fn empty_listing_yields_the_empty_sentinel() {
        let aggregate = aggregate_season(&ScriptedSource::new(), 2024).await;
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.sessions_processed(), 0);
        assert_eq!(aggregate.year, 2024);
    }

    #[tokio::test]
    async fn listing_failure_yields_the_empty_sentinel() {
        let source = ScriptedSource::new().failing_listing();
        let aggregate = aggregate_season(&source, 2024).await;
        assert!(aggregate.is_empty());
    }

    #[tokio::test]
    async fn points_histories_are_non_decreasing_and_sum_to_totals() {
        let source = ScriptedSource::new()
            .with_session(100, &[])
            .with_positions(100, &[(1, 3), (2, 1), (3, 11)])
            .with_sprint(200, &[])
            .with_positions(200, &[(1, 1), (3, 2)])
            .with_session(300, &[])
            .with_positions(300, &[(2, 2), (3, 1)]);

        let aggregate = aggregate_season(&source, 2024).await;

        for driver in aggregate.drivers.values() {
            for pair in driver.points_history.windows(2) {
                assert!(pair[1] >= pair[0]);
            }
            let contributions: u32 = std::iter::once(0)
                .chain(driver.points_history.iter().copied())
                .zip(driver.points_history.iter().copied())
                .map(|(previous, current)| current - previous)
                .sum();
            assert_eq!(contributions, driver.cumulative_points);
        }
        // Position 11 in a main session and the points it never earned
        assert_eq!(aggregate.drivers.get(&3).unwrap().points_history, vec![0, 7, 32]);
    }

    #[test]
    fn summary_statistics_count_only_classified_finishes() {
        let driver = DriverSeason {
            position_history: vec![Some(2), None, Some(4)],
            cumulative_points: 30,
            points_history: vec![18, 18, 30],
        };
        assert_eq!(driver.races_completed(), 2);
        assert_eq!(driver.average_position(), Some(3.0));

        let absentee = DriverSeason::backfilled(3);
        assert_eq!(absentee.races_completed(), 0);
        assert_eq!(absentee.average_position(), None);
    }
}
