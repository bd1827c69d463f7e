//! Help tab view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let range = app.table.ac_range();
    let lines = vec![
        section("Navigation"),
        key_line("1-5", "Jump to tab (Absolute/Difference/Weapons/Chart/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Scroll tables / select weapon"),
        key_line("PgUp / PgDn", "Scroll tables by a page"),
        key_line("d", "Chart: switch between absolute and difference"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        section("Rules"),
        Line::from(""),
        Line::from(Span::styled(
            "Hit Chance (d20):",
            Style::default().fg(Color::Yellow),
        )),
        Line::from("  (bonus + 21 - AC) × 5 %, at least 5 %, at most 95 %"),
        Line::from("  Threats are capped at the threat range, confirmation uses the crit confirm bonus"),
        Line::from("  Failure chance scales hit, threat and confirmation"),
        Line::from(""),
        Line::from(Span::styled(
            "Critical Hits:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from("  Crit = threat × confirm × (1 - fortification)"),
        Line::from("  Base dice and damage bonus are multiplied, precision and extra dice are not"),
        Line::from(""),
        Line::from(Span::styled(
            "Damage Reduction:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from("  Each hit deals at least zero damage"),
        Line::from("  Exact enumeration when the lowest roll can fall below the reduction"),
        Line::from("  Closed form (average - reduction) otherwise or for huge dice pools"),
        Line::from(""),
        Line::from(Span::styled(
            "Tables:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(format!(
            "  Expected full-attack damage for AC {} to {}",
            range.min(),
            range.max()
        )),
        Line::from(format!(
            "  Differences are relative to the first attack ({})",
            app.table.baseline().name()
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help & Rules "));

    f.render_widget(paragraph, area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
