pub mod message_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use message_builders::{daily_cards, day, wordle_card, wordle_number, MessageBuilder};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
