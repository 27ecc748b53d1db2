#![allow(dead_code)]

use std::sync::Arc;

use scorecard::{
    ChatMessage, GameResult, InMemoryResultStore, Member, MemberDirectory, Scoreboard,
    ScoreboardConfig, StreakAnchor,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub scoreboard: Arc<Scoreboard>,
    pub store: Arc<InMemoryResultStore>,
}

impl TestSetup {
    /// Ingests messages in order, keeping only what was stored.
    pub async fn ingest_all(&self, messages: &[ChatMessage]) -> Vec<GameResult> {
        let mut stored = Vec::new();
        for message in messages {
            if let Ok(results) = self.scoreboard.ingest_all(message).await {
                stored.extend(results);
            }
        }
        stored
    }
}

pub struct TestSetupBuilder {
    members: Vec<Member>,
    config: ScoreboardConfig,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            members: vec![],
            config: ScoreboardConfig::default(),
        }
    }

    pub fn with_member(mut self, id: &str, names: &[&str]) -> Self {
        self.members.push(Member::new(id, names));
        self
    }

    /// alice, bob, carol and dave, addressable by name.
    pub fn with_four_members(self) -> Self {
        self.with_member("u-alice", &["alice", "Alice A."])
            .with_member("u-bob", &["bob"])
            .with_member("u-carol", &["carol"])
            .with_member("u-dave", &["dave"])
    }

    pub fn with_streak_anchor(mut self, anchor: StreakAnchor) -> Self {
        self.config.streak_anchor = anchor;
        self
    }

    pub fn with_failure_penalty(mut self) -> Self {
        self.config.numeric_only_averages = false;
        self
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.config.utc_offset_minutes = minutes;
        self
    }

    pub fn build(self) -> TestSetup {
        let store = Arc::new(InMemoryResultStore::new());
        let scoreboard = Scoreboard::builder(store.clone())
            .with_directory(MemberDirectory::new(self.members))
            .with_config(self.config)
            .build()
            .expect("test scoreboard should build");

        TestSetup {
            scoreboard: Arc::new(scoreboard),
            store,
        }
    }
}
