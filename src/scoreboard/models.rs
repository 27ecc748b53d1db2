use serde::Serialize;

/// Outcome counts for a batch of ingested messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub messages: usize,
    pub stored: usize,
    pub overwritten: usize,
    /// Messages that were not results at all.
    pub ignored: usize,
    /// Results dropped because they were dated after the message.
    pub future: usize,
    /// Rejections worth showing to someone, with the message index.
    pub rejected: Vec<(usize, String)>,
}

impl IngestReport {
    pub fn summary(&self) -> String {
        format!(
            "{} messages: {} stored ({} overwrites), {} ignored, {} future, {} rejected",
            self.messages,
            self.stored,
            self.overwritten,
            self.ignored,
            self.future,
            self.rejected.len()
        )
    }
}
