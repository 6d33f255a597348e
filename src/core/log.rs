//! Game log sink.
//!
//! The engine reports what it did (abilities fired, extra actions granted,
//! drones destroyed) as `LogEntry` values pushed into a `LogSink`. Logging
//! is fire-and-forget: a sink never influences control flow.
//!
//! Internal diagnostics (skipped candidates, missing targets) go through
//! `tracing` instead and are not part of the game log.
//!
//! ```
//! use drone_ccg::core::{GameLog, LogEntry, LogSink, PlayerId};
//!
//! let mut log = GameLog::new();
//! log.log(LogEntry::new("TRIGGER").with_player(PlayerId::ONE).with_outcome("fired"));
//!
//! assert_eq!(log.len(), 1);
//! assert_eq!(log.entries()[0].action_type, "TRIGGER");
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A single game log entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Player the entry is attributed to.
    pub player: Option<PlayerId>,

    /// Short action tag (`TRIGGER`, `GO_AGAIN`, `DESTROYED`, ...).
    pub action_type: String,

    /// What caused the entry (usually an ability holder).
    pub source: String,

    /// What the entry affected.
    pub target: String,

    /// Human-readable outcome.
    pub outcome: String,
}

impl LogEntry {
    /// Create an entry with just an action tag.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            ..Self::default()
        }
    }

    /// Attribute the entry to a player (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Set the source (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the target (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the outcome (builder pattern).
    #[must_use]
    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }
}

/// Destination for game log entries.
pub trait LogSink {
    /// Record an entry.
    fn log(&mut self, entry: LogEntry);
}

impl<F> LogSink for F
where
    F: FnMut(LogEntry),
{
    fn log(&mut self, entry: LogEntry) {
        self(entry)
    }
}

/// Sink that keeps every entry in order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries with the given action tag.
    pub fn entries_of<'a>(&'a self, action_type: &'a str) -> impl Iterator<Item = &'a LogEntry> {
        self.entries.iter().filter(move |e| e.action_type == action_type)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LogSink for GameLog {
    fn log(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLog;

impl LogSink for NullLog {
    fn log(&mut self, _entry: LogEntry) {}
}
