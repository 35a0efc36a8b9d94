//! Point accumulation over the season as a line chart.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::standings::PointsSeries;
use crate::{Result, StandingsError};

use super::style;

/// Session labels drawn on the x axis before thinning kicks in.
const MAX_AXIS_LABELS: usize = 10;

/// Draw one polyline per competitor across session indices.
///
/// Each series carries one cumulative value per processed session; all series
/// share the same length as `session_labels`. The competitor's name is drawn
/// at the final point of their series.
pub fn draw_progression(
    path: &Path,
    series: &[PointsSeries],
    session_labels: &[String],
) -> Result<()> {
    if series.is_empty() || session_labels.is_empty() {
        return Err(StandingsError::render_failed("progression chart", "no sessions to draw"));
    }

    let root = BitMapBackend::new(path, super::CANVAS).into_drawing_area();
    root.fill(&style::BACKGROUND).map_err(chart_error)?;

    let x_max = session_labels.len().saturating_sub(1).max(1) as f64;
    let y_max = series.iter().flat_map(|entry| entry.points.iter().copied()).max().unwrap_or(0);
    let y_cap = y_max + y_max / 10 + 5;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(55)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..x_max, 0u32..y_cap)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .light_line_style(style::GRID.mix(0.15))
        .bold_line_style(style::GRID.mix(0.35))
        .axis_style(style::TEXT.stroke_width(1))
        .label_style(style::label_font(13.0).color(&style::TEXT))
        .x_labels(session_labels.len().min(MAX_AXIS_LABELS))
        .x_label_formatter(&|value| axis_label(session_labels, *value))
        .draw()
        .map_err(chart_error)?;

    for entry in series {
        let colour = style::team_colour(&entry.colour);
        let points: Vec<(f64, u32)> =
            entry.points.iter().enumerate().map(|(index, &total)| (index as f64, total)).collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), colour.stroke_width(2)))
            .map_err(chart_error)?;
        chart
            .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 3, colour.filled())))
            .map_err(chart_error)?;

        if let Some(&(x, y)) = points.last() {
            let label_style = style::label_font(13.0)
                .color(&style::TEXT)
                .pos(Pos::new(HPos::Right, VPos::Bottom));
            chart
                .draw_series(std::iter::once(Text::new(entry.name.clone(), (x, y), label_style)))
                .map_err(chart_error)?;
        }
    }

    root.present().map_err(chart_error)?;
    Ok(())
}

/// Label integer keypoints with their session label, leave the rest blank.
fn axis_label(session_labels: &[String], value: f64) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    session_labels.get(index as usize).cloned().unwrap_or_default()
}

fn chart_error(err: impl std::fmt::Display) -> StandingsError {
    StandingsError::render_failed("progression chart", err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_keypoints_map_to_session_labels() {
        let labels = vec!["Round 1".to_string(), "Round 2".to_string()];
        assert_eq!(axis_label(&labels, 0.0), "Round 1");
        assert_eq!(axis_label(&labels, 1.0), "Round 2");
        assert_eq!(axis_label(&labels, 0.5), "");
        assert_eq!(axis_label(&labels, 7.0), "");
    }
}
