//! Chart Rendering
//!
//! Two plotters charts share one canvas size and palette: the totals bar
//! chart and the per-session progression line chart. Both take the
//! presentation adapter's pre-sorted views and draw them as given.
//!
//! ```text
//! SeasonAggregate --> standings()     --> draw_totals()      --> plot1 PNG
//!                 \-> points_series() --> draw_progression() --> plot2 PNG
//! ```

pub mod style;

mod bar;
mod line;

pub use bar::draw_totals;
pub use line::draw_progression;

use std::path::Path;

use crate::Result;
use crate::standings::{self, SeasonAggregate};

/// Canvas size shared by both charts, in pixels.
pub const CANVAS: (u32, u32) = (1200, 600);

/// Render both charts for one season aggregate.
///
/// One aggregation pass feeds both images, so they always describe the same
/// season state. Callers check [`SeasonAggregate::is_empty`] first; an empty
/// aggregate is a render error here, not a blank image.
pub fn render_pair(
    aggregate: &SeasonAggregate,
    totals_path: &Path,
    progression_path: &Path,
) -> Result<()> {
    let rows = standings::standings(aggregate);
    let series = standings::points_series(aggregate);
    draw_totals(totals_path, &rows)?;
    draw_progression(progression_path, &series, &aggregate.session_labels)?;
    Ok(())
}
