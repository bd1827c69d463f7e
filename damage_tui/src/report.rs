//! Plain-text tables for console output

use damage_core::{ResultTable, TableMatrix};
use std::fmt::Write;

const VALUE_WIDTH: usize = 12;
const BASELINE_MARKER: &str = "*";

/// Attack summaries, absolute table and difference table
pub fn render(table: &ResultTable) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Attacks (AC {})", table.ac_range());
    for (group, summary) in table.groups().iter().zip(table.attack_summaries()) {
        let _ = writeln!(out, "  {}: {}", group.name(), summary);
    }
    out.push('\n');

    let title = format!("Expected damage ({} = baseline)", BASELINE_MARKER);
    out.push_str(&render_matrix(&title, table.absolute(), Some(0)));
    out.push('\n');
    let title = format!("Difference to {}", table.baseline().name());
    out.push_str(&render_matrix(&title, table.delta(), None));
    out
}

/// One table: AC column followed by the matrix columns, three decimals.
///
/// The column at `baseline` gets the baseline marker after its name.
pub fn render_matrix(title: &str, matrix: &TableMatrix, baseline: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    let headers: Vec<String> = matrix
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if baseline == Some(i) {
                format!("{}{}", name, BASELINE_MARKER)
            } else {
                name.clone()
            }
        })
        .collect();
    let widths: Vec<usize> = headers
        .iter()
        .map(|c| c.chars().count().max(VALUE_WIDTH))
        .collect();

    let _ = write!(out, "{:>4}", "AC");
    for (name, width) in headers.iter().zip(&widths) {
        let _ = write!(out, "  {:>width$}", name, width = width);
    }
    out.push('\n');

    for row in &matrix.rows {
        let _ = write!(out, "{:>4}", row.ac);
        for (value, width) in row.values.iter().zip(&widths) {
            let _ = write!(out, "  {:>width$.3}", value, width = width);
        }
        out.push('\n');
    }
    out
}
