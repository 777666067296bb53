use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A completed Act phase stored in history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Iteration (0-based) during which the action ran.
    pub iteration: usize,
    /// The thought the action was executing.
    pub plan:      String,
    /// What the collaborator reported back.
    pub result:    String,
    pub timestamp: DateTime<Utc>,
}

/// Mutable record of one loop run. Created when `run()` is invoked,
/// mutated exclusively by the controller during the four phases, and
/// retained for inspection once the run reaches a terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentContext {
    /// Unique identifier for this run, carried through tracing output.
    pub run_id:         Uuid,
    /// The goal description supplied at loop start. Immutable thereafter.
    pub task:           String,

    // ── Phase history, append-only, one entry per phase per cycle ────────
    pub observations:   Vec<String>,
    pub thoughts:       Vec<String>,
    pub actions:        Vec<ActionRecord>,
    pub reflections:    Vec<String>,

    /// Completed Observe→Reflect cycles. Incremented once per Reflect.
    pub iteration:      usize,
    /// Hard cap on cycles, fixed at loop start. Always >= 1 for a live run.
    pub max_iterations: usize,

    /// Open key-value bag for extensions.
    pub metadata:       HashMap<String, serde_json::Value>,
}

impl AgentContext {
    pub fn new(task: impl Into<String>, max_iterations: usize) -> Self {
        Self {
            run_id:         Uuid::new_v4(),
            task:           task.into(),
            observations:   Vec::new(),
            thoughts:       Vec::new(),
            actions:        Vec::new(),
            reflections:    Vec::new(),
            iteration:      0,
            max_iterations,
            metadata:       HashMap::new(),
        }
    }

    pub fn latest_observation(&self) -> Option<&str> {
        self.observations.last().map(String::as_str)
    }

    pub fn latest_thought(&self) -> Option<&str> {
        self.thoughts.last().map(String::as_str)
    }

    pub fn latest_action(&self) -> Option<&ActionRecord> {
        self.actions.last()
    }

    pub fn latest_reflection(&self) -> Option<&str> {
        self.reflections.last().map(String::as_str)
    }

    /// Appends a structured action record for the current iteration.
    pub fn record_action(&mut self, plan: impl Into<String>, result: impl Into<String>) {
        self.actions.push(ActionRecord {
            iteration: self.iteration,
            plan:      plan.into(),
            result:    result.into(),
            timestamp: Utc::now(),
        });
    }
}

impl Default for AgentContext {
    /// Empty pre-run placeholder. `run()` always replaces it with a fresh
    /// context built from the actual task and iteration cap.
    fn default() -> Self {
        Self::new("", 0)
    }
}
