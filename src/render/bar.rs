//! Final point totals as a bar chart.

use std::path::Path;

use plotters::prelude::*;

use crate::standings::StandingsRow;
use crate::{Result, StandingsError};

use super::style;

/// Points a main-event win is worth; positions the "one win behind" line.
const WIN_VALUE: u32 = 25;

/// Draw one bar per competitor, in the order given, colored by team.
///
/// The rows are expected pre-sorted by the presentation adapter; this
/// function never re-orders them. When the leader has at least a win's worth
/// of points, a dashed line marks the total a rival would need to overtake
/// with one more win.
pub fn draw_totals(path: &Path, rows: &[StandingsRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(StandingsError::render_failed("totals chart", "no competitors to draw"));
    }

    let root = BitMapBackend::new(path, super::CANVAS).into_drawing_area();
    root.fill(&style::BACKGROUND).map_err(chart_error)?;

    let y_max = rows.iter().map(|row| row.points).max().unwrap_or(0);
    let y_cap = y_max + y_max / 10 + 5;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(55)
        .y_label_area_size(55)
        .build_cartesian_2d((0..rows.len()).into_segmented(), 0u32..y_cap)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(style::GRID.mix(0.15))
        .bold_line_style(style::GRID.mix(0.35))
        .axis_style(style::TEXT.stroke_width(1))
        .label_style(style::label_font(13.0).color(&style::TEXT))
        .x_labels(rows.len())
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => bar_label(rows, *index),
            SegmentValue::Last => String::new(),
        })
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(rows.iter().enumerate().map(|(index, row)| {
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(index), 0), (SegmentValue::Exact(index + 1), row.points)],
                style::team_colour(&row.colour).filled(),
            );
            bar.set_margin(0, 0, 5, 5);
            bar
        }))
        .map_err(chart_error)?;

    // One half-segment dash per bar slot reads as a dashed line across the
    // full axis.
    if let Some(leader) = rows.first() {
        if leader.points >= WIN_VALUE {
            let threshold = leader.points - WIN_VALUE;
            chart
                .draw_series((0..rows.len()).map(|index| {
                    PathElement::new(
                        vec![
                            (SegmentValue::Exact(index), threshold),
                            (SegmentValue::CenterOf(index), threshold),
                        ],
                        WHITE.stroke_width(1),
                    )
                }))
                .map_err(chart_error)?;
        }
    }

    root.present().map_err(chart_error)?;
    Ok(())
}

fn bar_label(rows: &[StandingsRow], index: usize) -> String {
    rows.get(index).map(|row| format!("{} {}", row.name, row.number)).unwrap_or_default()
}

fn chart_error(err: impl std::fmt::Display) -> StandingsError {
    StandingsError::render_failed("totals chart", err.to_string())
}
