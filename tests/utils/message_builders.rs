#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use scorecard::ChatMessage;

// ============================================================================
// Dates and share cards
// ============================================================================

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Wordle puzzle number published on `date` (puzzle 0 was 2021-06-19).
pub fn wordle_number(date: NaiveDate) -> u32 {
    (date - day(2021, 6, 19)).num_days() as u32
}

/// Share card header for the puzzle of `date`, e.g. `Wordle 1,234 3/6`.
pub fn wordle_card(date: NaiveDate, token: &str) -> String {
    let number = wordle_number(date);
    let shown = if number >= 1000 {
        format!("{},{:03}", number / 1000, number % 1000)
    } else {
        number.to_string()
    };
    format!("Wordle {} {}\n\n⬛🟨⬛⬛⬛\n🟩🟩🟩🟩🟩", shown, token)
}

// ============================================================================
// Message Builder
// ============================================================================

pub struct MessageBuilder {
    author_id: String,
    timestamp: DateTime<Utc>,
    text: String,
    mentions: Vec<String>,
}

impl MessageBuilder {
    pub fn new(author_id: &str) -> Self {
        Self {
            author_id: author_id.to_string(),
            timestamp: Utc
                .with_ymd_and_hms(2024, 11, 4, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
            text: String::new(),
            mentions: Vec::new(),
        }
    }

    /// Posted at noon UTC on `date`.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.timestamp = date
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
            .and_utc();
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// The share card for the day the message is posted on.
    pub fn wordle(mut self, token: &str) -> Self {
        self.text = wordle_card(self.timestamp.date_naive(), token);
        self
    }

    pub fn mentioning(mut self, user_ids: &[&str]) -> Self {
        self.mentions = user_ids.iter().map(|u| u.to_string()).collect();
        self
    }

    pub fn build(self) -> ChatMessage {
        let mentions: Vec<&str> = self.mentions.iter().map(String::as_str).collect();
        ChatMessage::new(self.author_id, self.timestamp, self.text).with_mentions(&mentions)
    }
}

/// One share card per listed day of a month, all posted by `author`.
pub fn daily_cards(author: &str, year: i32, month: u32, days: &[(u32, &str)]) -> Vec<ChatMessage> {
    days.iter()
        .map(|(d, token)| {
            MessageBuilder::new(author)
                .on(day(year, month, *d))
                .wordle(token)
                .build()
        })
        .collect()
}
