use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::Cell;
use crate::games::{Color, Game, GamePlugin, Score};

const BLANK: &str = "  ";

/// Alphabet a calendar cell is written in. ASCII keeps columns aligned in
/// monospaced output; emoji matches the colors players know from the share card.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SymbolSet {
    Emoji,
    #[default]
    Ascii,
}

impl SymbolSet {
    pub fn cell_text(&self, cell: &Cell) -> String {
        match (self, cell) {
            (_, Cell::Padding | Cell::Future(_)) => BLANK.to_string(),
            (SymbolSet::Emoji, Cell::Missed(_)) => "⬛".to_string(),
            (SymbolSet::Ascii, Cell::Missed(_)) => "· ".to_string(),
            (SymbolSet::Emoji, Cell::Played { symbol, .. }) => color_emoji(symbol.color).to_string(),
            (SymbolSet::Ascii, Cell::Played { symbol, .. }) => format!("{:<2}", symbol.code),
        }
    }
}

pub fn color_emoji(color: Color) -> &'static str {
    match color {
        Color::Green => "🟩",
        Color::Blue => "🟦",
        Color::Yellow => "🟨",
        Color::Orange => "🟧",
        Color::Red => "🟥",
        Color::Brown => "🟫",
        Color::Purple => "🟪",
        Color::White => "⬜",
    }
}

/// `Legend: 1=🟩  2=🟦 ... X=🟪  ·=missed  (blank=future)` for the scores
/// a game paints with a real color.
pub fn legend(game: &Game) -> String {
    let entries: Vec<String> = (1..=9)
        .map(Score::Numeric)
        .chain([Score::Failed])
        .map(|score| game.score_to_symbol(&score))
        .filter(|symbol| symbol.color != Color::White)
        .map(|symbol| format!("{}={}", symbol.code, color_emoji(symbol.color)))
        .collect();
    format!("Legend: {}  ·=missed  (blank=future)", entries.join("  "))
}
