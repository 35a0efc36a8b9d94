//! Final-position extraction from one session's raw position feed.

use std::collections::BTreeMap;

use crate::schema::PositionRecord;
use crate::standings::DriverNumber;

/// Derive each driver's final position from one session's position feed.
///
/// The feed arrives unordered; records are stably sorted by timestamp and the
/// chronologically last record per driver wins. Records missing the driver
/// number or the position are dropped, and records missing a timestamp sort
/// before all timestamped ones. Drivers with no usable record are absent
/// from the result, not null.
///
/// The stable sort makes the result independent of feed order whenever
/// timestamps distinguish the records; exact-duplicate timestamps for the
/// same driver resolve to the record that appeared later in the input.
pub fn final_positions(records: &[PositionRecord]) -> BTreeMap<DriverNumber, u32> {
    let mut ordered: Vec<&PositionRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.date);

    let mut finals = BTreeMap::new();
    for record in ordered {
        let (Some(number), Some(position)) = (record.driver_number, record.position) else {
            continue;
        };
        finals.insert(number, position);
    }
    finals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(number: u32, position: u32, offset_secs: i64) -> PositionRecord {
        PositionRecord {
            driver_number: Some(number),
            position: Some(position),
            date: Some(Utc.timestamp_opt(1_700_000_000 + offset_secs, 0).unwrap()),
        }
    }

    #[test]
    fn last_record_wins_per_driver() {
        let records =
            vec![record(1, 5, 30), record(1, 1, 90), record(2, 2, 10), record(1, 3, 60)];
        let finals = final_positions(&records);
        assert_eq!(finals.get(&1), Some(&1));
        assert_eq!(finals.get(&2), Some(&2));
        assert_eq!(finals.len(), 2);
    }

    #[test]
    fn records_missing_fields_are_dropped() {
        let records = vec![
            record(44, 2, 10),
            PositionRecord { driver_number: None, position: Some(1), ..record(0, 0, 20) },
            PositionRecord { position: None, ..record(44, 0, 30) },
        ];
        let finals = final_positions(&records);
        assert_eq!(finals.len(), 1);
        assert_eq!(finals.get(&44), Some(&2));
    }

    #[test]
    fn untimestamped_records_sort_before_timestamped_ones() {
        let records = vec![
            PositionRecord { date: None, ..record(16, 9, 0) },
            record(16, 4, 5),
        ];
        assert_eq!(final_positions(&records).get(&16), Some(&4));
    }

    #[test]
    fn duplicate_timestamps_resolve_to_later_input_record() {
        let records = vec![record(81, 7, 50), record(81, 6, 50)];
        assert_eq!(final_positions(&records).get(&81), Some(&6));
    }

    #[test]
    fn empty_feed_extracts_nothing() {
        assert!(final_positions(&[]).is_empty());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extraction_is_invariant_under_feed_permutation(
                (records, shuffled) in prop::collection::vec((1u32..=24, 1u32..=20), 1..60)
                    .prop_flat_map(|entries| {
                        // Distinct timestamps, so order carries no information
                        let records: Vec<PositionRecord> = entries
                            .into_iter()
                            .enumerate()
                            .map(|(i, (number, position))| record(number, position, i as i64))
                            .collect();
                        (Just(records.clone()), Just(records).prop_shuffle())
                    })
            ) {
                prop_assert_eq!(final_positions(&records), final_positions(&shuffled));
            }

            #[test]
            fn every_extracted_driver_has_a_usable_input_record(
                numbers in prop::collection::vec(prop::option::of(1u32..=24), 0..40),
                positions in prop::collection::vec(prop::option::of(1u32..=20), 0..40)
            ) {
                let records: Vec<PositionRecord> = numbers
                    .iter()
                    .zip(&positions)
                    .enumerate()
                    .map(|(i, (&number, &position))| PositionRecord {
                        driver_number: number,
                        position,
                        date: Some(Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap()),
                    })
                    .collect();

                let finals = final_positions(&records);
                for (&number, &position) in &finals {
                    prop_assert!(records.iter().any(
                        |r| r.driver_number == Some(number) && r.position == Some(position)
                    ));
                }
            }
        }
    }
}
