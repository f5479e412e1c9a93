use crate::models::{Role, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

pub const USER_SENDER: &str = "You";

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub sender: String,
    pub role: Role,
    pub text: String,
    pub direction: Direction,
    /// Set on tool entries whose call failed.
    pub is_error: bool,
}

impl TranscriptEntry {
    pub fn user(text: &str) -> Self {
        Self {
            sender: USER_SENDER.to_string(),
            role: Role::User,
            text: text.to_string(),
            direction: Direction::Outgoing,
            is_error: false,
        }
    }

    pub fn assistant(sender: &str, text: &str) -> Self {
        Self {
            sender: sender.to_string(),
            role: Role::Assistant,
            text: text.to_string(),
            direction: Direction::Incoming,
            is_error: false,
        }
    }

    pub fn tool(result: &ToolResult) -> Self {
        Self {
            sender: result.name.clone(),
            role: Role::Tool,
            text: result.content.clone(),
            direction: Direction::Incoming,
            is_error: result.is_error,
        }
    }
}

/// Messages as displayed, oldest first. Entries are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append and return the entry's position.
    pub fn push(&mut self, entry: TranscriptEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
