use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::state::AgentState;

/// A recorded, accepted state change. Immutable after creation; owned by
/// the [`TransitionLog`] for the lifetime of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub from:      AgentState,
    pub to:        AgentState,
    pub timestamp: DateTime<Utc>,
    /// Human-readable annotation (e.g. why Reflect chose Complete).
    pub message:   Option<String>,
    /// Structured payload — failure details ride here.
    pub data:      Option<serde_json::Value>,
}

impl Transition {
    pub fn new(from: AgentState, to: AgentState) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
            message:   None,
            data:      None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Ordered, append-only record of every accepted transition in one run.
/// The controller is the only writer; callers get read-only access and
/// the log survives failure so the exact phase of breakdown can be
/// inspected afterwards.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TransitionLog {
    entries: Vec<Transition>,
}

impl TransitionLog {
    pub fn new() -> Self { Self { entries: Vec::new() } }

    pub fn record(&mut self, transition: Transition) {
        self.entries.push(transition);
    }

    pub fn entries(&self) -> &[Transition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Transition> {
        self.entries.last()
    }

    /// Returns all entries that left the given state.
    pub fn leaving(&self, state: AgentState) -> Vec<&Transition> {
        self.entries.iter().filter(|t| t.from == state).collect()
    }

    /// Serializes the log to a pretty-printed JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.entries)
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Prints a human-readable transition table to stdout
    pub fn print(&self) {
        println!("\n{:<10} {:<10} {:<26} {}", "from", "to", "timestamp", "message");
        println!("{}", "─".repeat(80));
        for t in &self.entries {
            println!(
                "{:<10} {:<10} {:<26} {}",
                t.from,
                t.to,
                t.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                t.message.as_deref().unwrap_or(""),
            );
        }
    }
}
