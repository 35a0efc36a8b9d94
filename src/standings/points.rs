//! Points tables for the two scoring categories.

use crate::schema::session::EventKind;

/// Points by finishing position for main events, index = position - 1.
const MAIN_POINTS: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Points by finishing position for sprint events, index = position - 1.
const SHORT_POINTS: [u32; 8] = [8, 7, 6, 5, 4, 3, 2, 1];

/// Points awarded for finishing `position` in an event of the given kind.
///
/// Positions outside the table (and the never-valid position 0) score zero.
pub fn points_for(kind: EventKind, position: u32) -> u32 {
    let table: &[u32] = match kind {
        EventKind::Main => &MAIN_POINTS,
        EventKind::Short => &SHORT_POINTS,
    };
    position
        .checked_sub(1)
        .and_then(|index| table.get(index as usize))
        .copied()
        .unwrap_or(0)
}
