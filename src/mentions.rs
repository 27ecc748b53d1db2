use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Platform mentions (`<@123>`, `<@!123>`) anywhere, plain handles (`@name`)
/// only at the start of the text or after whitespace.
static MENTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<@!?(?P<id>\d+)>|(?:^|\s)@(?P<handle>[A-Za-z0-9._-]+)")
        .expect("mention pattern compiles")
});

const BROADCAST_HANDLES: [&str; 2] = ["everyone", "here"];

/// A reference to a user found in message text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MentionToken {
    /// Platform mention carrying the user id.
    Id(String),
    /// Plain-text `@handle`, still to be resolved.
    Handle(String),
}

impl MentionToken {
    /// Parses a single token such as `<@!42>` or `@alice`.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Some(inner) = token.strip_prefix("<@").and_then(|t| t.strip_suffix('>')) {
            let id = inner.trim_start_matches('!');
            if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
                return Some(MentionToken::Id(id.to_string()));
            }
            return None;
        }
        let handle = token.strip_prefix('@')?.trim_end_matches('.');
        if handle.is_empty() || BROADCAST_HANDLES.contains(&handle) {
            return None;
        }
        Some(MentionToken::Handle(handle.to_string()))
    }
}

/// Every mention token in `text`, in order of appearance, without duplicates.
pub fn extract_mentions(text: &str) -> Vec<MentionToken> {
    let mut tokens = Vec::new();
    for caps in MENTION_PATTERN.captures_iter(text) {
        let token = if let Some(id) = caps.name("id") {
            MentionToken::Id(id.as_str().to_string())
        } else if let Some(handle) = caps.name("handle") {
            let handle = handle.as_str().trim_end_matches('.');
            if handle.is_empty() || BROADCAST_HANDLES.contains(&handle) {
                continue;
            }
            MentionToken::Handle(handle.to_string())
        } else {
            continue;
        };
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// A known chat member and the names they can be addressed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub names: Vec<String>,
}

impl Member {
    pub fn new(id: impl Into<String>, names: &[&str]) -> Self {
        Self {
            id: id.into(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Roster used to turn plain-text handles into stable user ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberDirectory {
    members: Vec<Member>,
}

impl MemberDirectory {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Resolves a handle: exact case-insensitive name, then alphanumeric-only
    /// match, then a unique prefix.
    pub fn resolve(&self, handle: &str) -> Option<&str> {
        let wanted = handle.to_lowercase();
        if let Some(member) = self
            .members
            .iter()
            .find(|m| m.names.iter().any(|n| n.to_lowercase() == wanted))
        {
            return Some(&member.id);
        }

        let wanted_norm = normalize(handle);
        if !wanted_norm.is_empty() {
            if let Some(member) = self
                .members
                .iter()
                .find(|m| m.names.iter().any(|n| normalize(n) == wanted_norm))
            {
                return Some(&member.id);
            }
        }

        let mut prefixed = self
            .members
            .iter()
            .filter(|m| m.names.iter().any(|n| n.to_lowercase().starts_with(&wanted)));
        match (prefixed.next(), prefixed.next()) {
            (Some(member), None) => Some(&member.id),
            _ => {
                debug!(handle = %handle, "Handle did not resolve to a unique member");
                None
            }
        }
    }

    /// User id for a token. Handles fall back to their literal text when the
    /// directory has no entry for them.
    pub fn user_id_for(&self, token: &MentionToken) -> String {
        match token {
            MentionToken::Id(id) => id.clone(),
            MentionToken::Handle(handle) => self
                .resolve(handle)
                .map(str::to_string)
                .unwrap_or_else(|| handle.clone()),
        }
    }

    /// Like [`user_id_for`](Self::user_id_for) but refuses unknown handles
    /// once a roster is loaded.
    pub fn strict_user_id_for(&self, token: &MentionToken) -> Option<String> {
        match token {
            MentionToken::Handle(handle) if !self.is_empty() => {
                self.resolve(handle).map(str::to_string)
            }
            _ => Some(self.user_id_for(token)),
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
