//! Application state

use damage_core::{ResultTable, TableMatrix, WeaponProfile};

const PAGE_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Absolute,
    Difference,
    Weapons,
    Chart,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Absolute, Tab::Difference, Tab::Weapons, Tab::Chart, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Absolute => "Absolute",
            Tab::Difference => "Difference",
            Tab::Weapons => "Weapons",
            Tab::Chart => "Chart",
            Tab::Help => "Help",
        }
    }
}

/// Which matrix the chart tab plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMatrix {
    Absolute,
    Difference,
}

/// Group and weapon position of a selectable weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponRef {
    pub group: usize,
    pub weapon: usize,
}

pub struct App {
    pub current_tab: Tab,
    pub table: ResultTable,
    pub source: String,
    pub table_scroll: usize,
    pub selected_weapon: usize,
    pub chart_matrix: ChartMatrix,
    previous_tab: Tab,
    weapon_refs: Vec<WeaponRef>,
}

impl App {
    pub fn new(table: ResultTable, source: String) -> Self {
        let weapon_refs = table
            .groups()
            .iter()
            .enumerate()
            .flat_map(|(group, g)| (0..g.weapons().len()).map(move |weapon| WeaponRef { group, weapon }))
            .collect();

        App {
            current_tab: Tab::Absolute,
            table,
            source,
            table_scroll: 0,
            selected_weapon: 0,
            chart_matrix: ChartMatrix::Absolute,
            previous_tab: Tab::Absolute,
            weapon_refs,
        }
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.current_tab = tabs[next_idx];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Absolute | Tab::Difference => {
                self.table_scroll = self.table_scroll.saturating_sub(1);
            }
            Tab::Weapons => {
                self.selected_weapon = self.selected_weapon.saturating_sub(1);
            }
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Absolute | Tab::Difference => {
                if self.table_scroll < self.max_table_scroll() {
                    self.table_scroll += 1;
                }
            }
            Tab::Weapons => {
                if self.selected_weapon < self.weapon_refs.len().saturating_sub(1) {
                    self.selected_weapon += 1;
                }
            }
            _ => {}
        }
    }

    pub fn page_up(&mut self) {
        if matches!(self.current_tab, Tab::Absolute | Tab::Difference) {
            self.table_scroll = self.table_scroll.saturating_sub(PAGE_ROWS);
        }
    }

    pub fn page_down(&mut self) {
        if matches!(self.current_tab, Tab::Absolute | Tab::Difference) {
            self.table_scroll = (self.table_scroll + PAGE_ROWS).min(self.max_table_scroll());
        }
    }

    pub fn toggle_chart_matrix(&mut self) {
        self.chart_matrix = match self.chart_matrix {
            ChartMatrix::Absolute => ChartMatrix::Difference,
            ChartMatrix::Difference => ChartMatrix::Absolute,
        };
    }

    pub fn toggle_help(&mut self) {
        if self.current_tab == Tab::Help {
            self.current_tab = self.previous_tab;
        } else {
            self.previous_tab = self.current_tab;
            self.current_tab = Tab::Help;
        }
    }

    fn max_table_scroll(&self) -> usize {
        self.table.ac_range().len().saturating_sub(1)
    }

    /// Matrix plotted by the chart tab
    pub fn chart_data(&self) -> &TableMatrix {
        match self.chart_matrix {
            ChartMatrix::Absolute => self.table.absolute(),
            ChartMatrix::Difference => self.table.delta(),
        }
    }

    /// Every weapon of the sheet as `(attack name, weapon)`, in sheet order
    pub fn weapon_list(&self) -> Vec<(&str, &WeaponProfile)> {
        self.weapon_refs
            .iter()
            .filter_map(|r| {
                let group = self.table.groups().get(r.group)?;
                Some((group.name(), group.weapons().get(r.weapon)?))
            })
            .collect()
    }

    pub fn current_weapon(&self) -> Option<(&str, &WeaponProfile)> {
        let r = self.weapon_refs.get(self.selected_weapon)?;
        let group = self.table.groups().get(r.group)?;
        Some((group.name(), group.weapons().get(r.weapon)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use damage_core::example_sheet;

    fn app() -> App {
        let table = example_sheet().unwrap().build().unwrap();
        App::new(table, "example sheet".to_string())
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = app();
        assert_eq!(app.current_tab, Tab::Absolute);
        app.prev_tab();
        assert_eq!(app.current_tab, Tab::Help);
        app.next_tab();
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Difference);
        app.set_tab(3);
        assert_eq!(app.current_tab, Tab::Chart);
        app.set_tab(9);
        assert_eq!(app.current_tab, Tab::Chart);
    }

    #[test]
    fn test_table_scroll_bounds() {
        let mut app = app();
        app.on_up();
        assert_eq!(app.table_scroll, 0);
        for _ in 0..100 {
            app.on_down();
        }
        assert_eq!(app.table_scroll, 30);
        app.page_up();
        assert_eq!(app.table_scroll, 20);
        app.page_down();
        app.page_down();
        assert_eq!(app.table_scroll, 30);
    }

    #[test]
    fn test_weapon_selection() {
        let mut app = app();
        app.set_tab(2);
        let count = app.weapon_list().len();
        assert_eq!(count, 5);
        for _ in 0..10 {
            app.on_down();
        }
        assert_eq!(app.selected_weapon, count - 1);
        let (attack, weapon) = app.current_weapon().unwrap();
        assert_eq!(attack, "Flanking Rogue");
        assert_eq!(weapon.name(), "Rapier");
    }

    #[test]
    fn test_help_toggle_returns_to_previous_tab() {
        let mut app = app();
        app.set_tab(3);
        app.toggle_help();
        assert_eq!(app.current_tab, Tab::Help);
        app.toggle_help();
        assert_eq!(app.current_tab, Tab::Chart);
    }

    #[test]
    fn test_chart_matrix_toggle() {
        let mut app = app();
        assert_eq!(app.chart_data().columns.len(), 4);
        app.toggle_chart_matrix();
        assert_eq!(app.chart_data().columns.len(), 3);
    }
}
