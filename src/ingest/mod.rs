mod errors;
pub mod models;
mod parser;

pub use errors::ParseError;
pub use models::{ChatMessage, GameResult, ResultKey};
pub use parser::ResultParser;
