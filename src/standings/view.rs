//! Sorted views over a finished season aggregate.
//!
//! Everything the renderer and the CLI consume comes from here: the
//! standings table, the per-driver cumulative series, and the summary rows.
//! Ranking uses cumulative points only; ties order by car number ascending.

use crate::standings::DriverNumber;
use crate::standings::identity::Identity;
use crate::standings::season::SeasonAggregate;

/// One row of the final standings table.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsRow {
    /// Car number
    pub number: DriverNumber,
    /// Final points total
    pub points: u32,
    /// Display abbreviation
    pub name: String,
    /// Team affiliation
    pub team: String,
    /// Team color as hex RGB without the leading `#`
    pub colour: String,
}

/// One driver's cumulative-points series for the points-history chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsSeries {
    /// Car number
    pub number: DriverNumber,
    /// Display abbreviation
    pub name: String,
    /// Team color as hex RGB without the leading `#`
    pub colour: String,
    /// Cumulative points after each session, aligned to the aggregate's
    /// session labels
    pub points: Vec<u32>,
}

/// One line of the season summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// 1-based championship rank
    pub rank: usize,
    /// Car number
    pub number: DriverNumber,
    /// Display abbreviation
    pub name: String,
    /// Team affiliation
    pub team: String,
    /// Final points total
    pub points: u32,
    /// Sessions with a classified finish
    pub races_completed: usize,
    /// Mean classified finishing position
    pub average_position: Option<f64>,
}

fn display_identity(aggregate: &SeasonAggregate, number: DriverNumber) -> Identity {
    aggregate.identities.get(&number).cloned().unwrap_or_else(Identity::placeholder)
}

/// Final standings, highest points first.
///
/// The aggregate map iterates by car number and the sort is stable, so
/// drivers tied on points come out in number order. Drivers missing display
/// metadata get the placeholder identity.
pub fn standings(aggregate: &SeasonAggregate) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = aggregate
        .drivers
        .iter()
        .map(|(&number, season)| {
            let identity = display_identity(aggregate, number);
            StandingsRow {
                number,
                points: season.cumulative_points,
                name: identity.name,
                team: identity.team,
                colour: identity.colour,
            }
        })
        .collect();
    rows.sort_by_key(|row| std::cmp::Reverse(row.points));
    rows
}

/// Per-driver cumulative series in standings order, leader first.
pub fn points_series(aggregate: &SeasonAggregate) -> Vec<PointsSeries> {
    standings(aggregate)
        .into_iter()
        .map(|row| PointsSeries {
            number: row.number,
            name: row.name,
            colour: row.colour,
            points: aggregate
                .drivers
                .get(&row.number)
                .map(|season| season.points_history.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// Season summary rows in standings order, for display only.
pub fn summary(aggregate: &SeasonAggregate) -> Vec<SummaryRow> {
    standings(aggregate)
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let season = aggregate.drivers.get(&row.number);
            SummaryRow {
                rank: index + 1,
                number: row.number,
                name: row.name,
                team: row.team,
                points: row.points,
                races_completed: season.map_or(0, |s| s.races_completed()),
                average_position: season.and_then(|s| s.average_position()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::season::DriverSeason;

    fn aggregate_with(drivers: &[(u32, u32)]) -> SeasonAggregate {
        let mut aggregate = SeasonAggregate::empty(2024);
        for &(number, points) in drivers {
            aggregate.drivers.insert(
                number,
                DriverSeason {
                    position_history: vec![Some(1)],
                    cumulative_points: points,
                    points_history: vec![points],
                },
            );
        }
        aggregate
    }

    #[test]
    fn standings_sort_by_points_descending() {
        let aggregate = aggregate_with(&[(1, 25), (2, 43), (3, 10)]);
        let numbers: Vec<u32> = standings(&aggregate).iter().map(|row| row.number).collect();
        assert_eq!(numbers, vec![2, 1, 3]);
    }

    #[test]
    fn ties_order_by_car_number_ascending() {
        let aggregate = aggregate_with(&[(44, 43), (1, 43), (16, 43)]);
        let numbers: Vec<u32> = standings(&aggregate).iter().map(|row| row.number).collect();
        assert_eq!(numbers, vec![1, 16, 44]);
    }

    #[test]
    fn missing_identities_fall_back_to_placeholders() {
        let mut aggregate = aggregate_with(&[(7, 12), (8, 18)]);
        aggregate.identities.insert(
            8,
            Identity {
                name: "PER".to_string(),
                team: "Red Bull Racing".to_string(),
                colour: "3671C6".to_string(),
            },
        );

        let rows = standings(&aggregate);
        assert_eq!(rows[0].name, "PER");
        assert_eq!(rows[1].name, "unknown");
        assert_eq!(rows[1].team, "unknown");
        assert_eq!(rows[1].colour, "777777");
    }

    #[test]
    fn series_follow_standings_order_and_keep_histories() {
        let mut aggregate = aggregate_with(&[(5, 10), (6, 30)]);
        aggregate.drivers.get_mut(&5).unwrap().points_history = vec![4, 10];
        aggregate.drivers.get_mut(&6).unwrap().points_history = vec![12, 30];

        let series = points_series(&aggregate);
        assert_eq!(series[0].number, 6);
        assert_eq!(series[0].points, vec![12, 30]);
        assert_eq!(series[1].number, 5);
        assert_eq!(series[1].points, vec![4, 10]);
    }

    #[test]
    fn summary_carries_ranks_and_participation_statistics() {
        let mut aggregate = aggregate_with(&[(9, 2), (10, 25)]);
        aggregate.drivers.get_mut(&9).unwrap().position_history = vec![Some(9), None];
        aggregate.drivers.get_mut(&10).unwrap().position_history = vec![Some(1), Some(3)];

        let rows = summary(&aggregate);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].number, 10);
        assert_eq!(rows[0].races_completed, 2);
        assert_eq!(rows[0].average_position, Some(2.0));
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].races_completed, 1);
        assert_eq!(rows[1].average_position, Some(9.0));
    }
}
