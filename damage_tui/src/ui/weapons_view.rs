//! Weapons tab: weapon list and details of the selected weapon

use super::label_line;
use crate::app::App;
use damage_core::{AverageStrategy, WeaponProfile};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    draw_list(f, app, chunks[0]);
    draw_details(f, app, chunks[1]);
}

fn draw_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .weapon_list()
        .into_iter()
        .map(|(attack, weapon)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}: ", attack), Style::default().fg(Color::DarkGray)),
                Span::styled(weapon.name().to_string(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Weapons "))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_weapon));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");
    let Some((attack, weapon)) = app.current_weapon() else {
        f.render_widget(Paragraph::new("No weapons").block(block), area);
        return;
    };

    let mut lines = vec![
        heading("Summary"),
        label_line("Attack", attack.to_string()),
        label_line("On hit", weapon.summary_hit()),
        label_line("On critical hit", weapon.summary_crit()),
        Line::from(""),
        heading("Averages"),
        average_line("Average hit", weapon.avg_damage_hit(), weapon.strategies().0),
        average_line("Average critical", weapon.avg_damage_crit(), weapon.strategies().1),
        Line::from(""),
        heading("Properties"),
    ];
    lines.extend(
        weapon
            .detail_lines()
            .into_iter()
            .map(|(name, value)| label_line(name, value)),
    );
    lines.push(Line::from(""));
    lines.extend(chance_lines(weapon, app.table.ac_range().min()));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", text),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn average_line(name: &str, value: f64, strategy: AverageStrategy) -> Line<'static> {
    let how = match strategy {
        AverageStrategy::ExactEnumeration => "exact",
        AverageStrategy::ClosedForm => "closed form",
    };
    Line::from(vec![
        Span::styled(format!("{:30}", name), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:.3}", value), Style::default().fg(Color::White)),
        Span::styled(format!("  ({})", how), Style::default().fg(Color::DarkGray)),
    ])
}

/// Hit and critical chance of every attack step at the lowest AC shown
fn chance_lines(weapon: &WeaponProfile, ac: i32) -> Vec<Line<'static>> {
    let mut lines = vec![heading(&format!("Chances at AC {}", ac))];
    for &step in weapon.attack_steps() {
        let chances = weapon.chances();
        let bonus = chances.step_bonus(step);
        let value = match (chances.hit_chance(step, ac), chances.crit_chance(step, ac)) {
            (Ok(hit), Ok(crit)) => format!("hit {:.1} %, crit {:.2} %", hit * 100.0, crit * 100.0),
            (Err(e), _) | (_, Err(e)) => e.to_string(),
        };
        lines.push(label_line(&format!("{:+}", bonus), value));
    }
    lines
}
