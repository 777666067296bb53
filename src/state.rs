use serde::{Deserialize, Serialize};

/// A state in the agent's execution cycle.
///
/// The enumeration is closed: the controller is always in exactly one of
/// these seven states, and the set cannot be extended. `Complete` and
/// `Error` are terminal — the transition table defines no successors for
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    /// Initial state before the first phase of a run.
    Idle,
    /// Gather information about the task and the last action's outcome.
    Observe,
    /// Reason about the latest observation and form a plan.
    Think,
    /// Carry the plan out and record the result.
    Act,
    /// Evaluate progress and decide whether to continue or stop.
    Reflect,
    /// The run finished normally.
    Complete,
    /// The run failed; the transition log records the cause.
    Error,
}

impl AgentState {
    /// Returns the canonical string name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentState::Idle     => "Idle",
            AgentState::Observe  => "Observe",
            AgentState::Think    => "Think",
            AgentState::Act      => "Act",
            AgentState::Reflect  => "Reflect",
            AgentState::Complete => "Complete",
            AgentState::Error    => "Error",
        }
    }

    /// Returns true for the two terminal states (`Complete`, `Error`).
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentState::Complete | AgentState::Error)
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
