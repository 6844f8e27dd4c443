//! Conversation state
//!
//! A conversation is an ordered list of turns opened by a welcome message.
//! The welcome message is shown to the user but never sent as history.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str = "Welcome to Legal Assistant!\n\nI can help you with questions about Indian laws, particularly the Bharatiya Nyaya Sanhita (BNS), the Bharatiya Nagarik Suraksha Sanhita (BNSS), the Bharatiya Sakshya Adhiniyam (BSA) and the laws they replaced.";

/// Default number of turns sent as history
pub const DEFAULT_HISTORY_WINDOW: usize = 6;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Upper-case label used in prompts
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

/// A single message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Greeting inserted on creation; excluded from history
    #[serde(default)]
    pub welcome: bool,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            welcome: false,
        }
    }

    fn welcome() -> Self {
        Self {
            welcome: true,
            ..Self::new(Role::Assistant, WELCOME_MESSAGE)
        }
    }
}

/// A chat with the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier
    pub id: Uuid,

    pub title: String,

    pub created_at: DateTime<Utc>,

    /// Time of the most recent turn
    pub updated_at: DateTime<Utc>,

    pub turns: Vec<Turn>,
}

impl Conversation {
    /// Create a conversation holding only the welcome message
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            turns: vec![Turn::welcome()],
        }
    }

    /// Create a conversation named after the current time
    pub fn new_with_timestamp() -> Self {
        let title = format!("chat_{}", Utc::now().format("%Y%m%d_%H%M%S"));
        Self::new(title)
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        let turn = Turn::new(role, content);
        self.updated_at = turn.timestamp;
        self.turns.push(turn);
    }

    /// Drop every turn and start again from the welcome message
    pub fn clear(&mut self) {
        self.turns = vec![Turn::welcome()];
        self.updated_at = Utc::now();
    }

    /// The last `n` turns, excluding the welcome message
    pub fn history_window(&self, n: usize) -> Vec<Turn> {
        let history: Vec<&Turn> = self.turns.iter().filter(|t| !t.welcome).collect();
        let skip = history.len().saturating_sub(n);
        history[skip..].iter().map(|t| (*t).clone()).collect()
    }

    /// Number of turns the user or assistant actually exchanged
    pub fn exchanged(&self) -> usize {
        self.turns.iter().filter(|t| !t.welcome).count()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new_with_timestamp()
    }
}
