mod grid;
mod layout;
mod symbols;

pub use grid::{CalendarRenderer, Cell, MonthGrid};
pub use layout::{render_user_block, side_by_side, RenderedMonth, WEEKDAY_HEADER};
pub use symbols::{color_emoji, legend, SymbolSet};
