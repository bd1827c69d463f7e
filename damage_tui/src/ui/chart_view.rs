//! Chart tab: expected damage (or difference) over AC as line charts

use super::series_color;
use crate::app::{App, ChartMatrix};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let matrix = app.chart_data();
    let (title, offset) = match app.chart_matrix {
        ChartMatrix::Absolute => (" Expected Damage over AC ".to_string(), 0),
        ChartMatrix::Difference => (
            format!(" Difference to {} over AC ", app.table.baseline().name()),
            1,
        ),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let Some((lo, hi)) = matrix.value_bounds() else {
        let paragraph = Paragraph::new(Span::styled(
            "Nothing to plot",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let series: Vec<Vec<(f64, f64)>> = (0..matrix.columns.len()).map(|i| matrix.points(i)).collect();
    let datasets: Vec<Dataset> = series
        .iter()
        .zip(&matrix.columns)
        .enumerate()
        .map(|(i, (points, name))| {
            Dataset::default()
                .name(name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(i + offset)))
                .data(points)
        })
        .collect();

    let range = app.table.ac_range();
    let x_bounds = [range.min() as f64, range.max() as f64];
    let y_bounds = padded_bounds(lo, hi);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("AC")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, 0)),
        )
        .y_axis(
            Axis::default()
                .title("Damage")
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, 1)),
        );

    f.render_widget(chart, area);
}

/// Bounds with a small margin; flat data gets a unit-wide window
fn padded_bounds(lo: f64, hi: f64) -> [f64; 2] {
    if (hi - lo).abs() < 1e-9 {
        return [lo - 1.0, hi + 1.0];
    }
    let pad = (hi - lo) * 0.05;
    [lo - pad, hi + pad]
}

fn axis_labels(bounds: [f64; 2], decimals: usize) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| format!("{:.*}", decimals, v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_bounds() {
        assert_eq!(padded_bounds(2.0, 2.0), [1.0, 3.0]);
        let [lo, hi] = padded_bounds(0.0, 10.0);
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(axis_labels([10.0, 40.0], 0), vec!["10", "25", "40"]);
    }
}
