use serde::{Deserialize, Serialize};

use super::{MonthGrid, SymbolSet};

pub const WEEKDAY_HEADER: &str = "Mo Tu We Th Fr Sa Su";

const MONTH_GAP: &str = "  ";

/// Every cell text fills two terminal columns, whether it is two ASCII
/// characters or one wide emoji.
const CELL_COLUMNS: usize = 2;

/// A month grid written out in one symbol set, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMonth {
    pub title: String,
    pub header: String,
    /// One entry per week, seven cell strings each.
    pub cells: Vec<Vec<String>>,
    pub summary: String,
}

impl RenderedMonth {
    pub fn from_grid(grid: &MonthGrid, symbols: SymbolSet) -> Self {
        Self {
            title: grid.title(),
            header: WEEKDAY_HEADER.to_string(),
            cells: grid
                .weeks
                .iter()
                .map(|week| week.iter().map(|cell| symbols.cell_text(cell)).collect())
                .collect(),
            summary: grid.summary(),
        }
    }

    /// Week rows padded to the header width.
    pub fn week_lines(&self) -> Vec<String> {
        self.cells.iter().map(|week| week_line(week)).collect()
    }
}

fn block_width() -> usize {
    WEEKDAY_HEADER.chars().count()
}

/// Pads by cell count rather than by characters, so emoji rows line up
/// with ASCII ones.
fn week_line(week: &[String]) -> String {
    let columns = week.len() * CELL_COLUMNS + week.len().saturating_sub(1);
    format!("{}{}", week.join(" "), " ".repeat(block_width().saturating_sub(columns)))
}

fn center(text: &str) -> String {
    format!("{:^width$}", text, width = block_width())
}

/// Months next to each other: centered titles, weekday headers, then week
/// rows. Months with fewer weeks are filled with blank rows.
pub fn side_by_side(months: &[RenderedMonth]) -> Vec<String> {
    if months.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![
        months.iter().map(|m| center(&m.title)).collect::<Vec<_>>().join(MONTH_GAP),
        months.iter().map(|m| m.header.clone()).collect::<Vec<_>>().join(MONTH_GAP),
    ];

    let week_lines: Vec<Vec<String>> = months.iter().map(RenderedMonth::week_lines).collect();
    let rows = week_lines.iter().map(Vec::len).max().unwrap_or(0);
    let blank = " ".repeat(block_width());
    for row in 0..rows {
        let blocks: Vec<&str> = week_lines
            .iter()
            .map(|weeks| weeks.get(row).map_or(blank.as_str(), String::as_str))
            .collect();
        lines.push(blocks.join(MONTH_GAP).trim_end().to_string());
    }
    lines
}

/// Heading, side-by-side grid and per-month summaries for one user.
pub fn render_user_block(user_id: &str, months: &[RenderedMonth]) -> String {
    let mut lines = vec![format!("{} — Last {} Month(s)", user_id, months.len())];
    lines.extend(side_by_side(months));
    lines.extend(months.iter().map(|m| format!("{}: {}", m.title, m.summary)));
    lines.join("\n")
}
