//! Absolute and difference table views

use super::{delta_style, series_color};
use crate::app::{App, Tab};
use damage_core::TableMatrix;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect, matrix: &TableMatrix, title: String) {
    let block = Block::default().borders(Borders::ALL).title(title);

    if matrix.columns.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            "Only the baseline attack is defined; add attacks to compare.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let signed = app.current_tab == Tab::Difference;

    let header = Row::new(
        std::iter::once(Cell::from("AC")).chain(matrix.columns.iter().enumerate().map(|(i, name)| {
            Cell::from(name.clone()).style(
                Style::default()
                    .fg(series_color(i + usize::from(signed)))
                    .add_modifier(Modifier::BOLD),
            )
        })),
    )
    .bottom_margin(1);

    let rows = matrix.rows.iter().skip(app.table_scroll).map(|row| {
        let cells = std::iter::once(Cell::from(row.ac.to_string()).style(Style::default().fg(Color::Gray)))
            .chain(row.values.iter().map(|v| {
                if signed {
                    Cell::from(format!("{:+.3}", v)).style(delta_style(*v))
                } else {
                    Cell::from(format!("{:.3}", v))
                }
            }));
        Row::new(cells)
    });

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(4))
        .chain(
            matrix
                .columns
                .iter()
                .map(|c| Constraint::Length(c.chars().count().max(10) as u16)),
        )
        .collect();

    let table = Table::new(rows, widths).header(header).column_spacing(2).block(block);

    f.render_widget(table, area);
}
