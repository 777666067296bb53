use thiserror::Error;
use crate::collaborator::CollaboratorError;
use crate::state::AgentState;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("task description must not be empty")]
    EmptyTask,

    #[error("max_iterations must be positive")]
    ZeroIterations,

    #[error("illegal transition: {from} -> {to} not in transition table")]
    IllegalTransition { from: AgentState, to: AgentState },

    #[error("collaborator failed during {state}: {source}")]
    Collaborator {
        state: AgentState,
        #[source]
        source: CollaboratorError,
    },

    #[error("transition hook panicked on {from} -> {to}: {detail}")]
    HookPanic {
        from:   AgentState,
        to:     AgentState,
        detail: String,
    },

    #[error("build error: {0}")]
    BuildError(String),
}

impl AgentError {
    /// The last state the controller was in when the failure occurred,
    /// where one applies.
    pub fn state(&self) -> Option<AgentState> {
        match self {
            AgentError::IllegalTransition { from, .. } => Some(*from),
            AgentError::Collaborator { state, .. }     => Some(*state),
            AgentError::HookPanic { to, .. }           => Some(*to),
            _ => None,
        }
    }
}
