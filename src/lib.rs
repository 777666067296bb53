pub mod builder;
pub mod collaborator;
pub mod context;
pub mod controller;
pub mod error;
pub mod phases;
pub mod state;
pub mod trace;
pub mod transitions;

// Convenience re-exports at crate root
pub use builder::AgentLoopBuilder;
pub use collaborator::{
    AnthropicCollaborator, Collaborator, CollaboratorError, MockCollaborator,
    OpenAiCollaborator, RetryingCollaborator,
};
pub use context::{ActionRecord, AgentContext};
pub use controller::{AgentLoop, TransitionHook};
pub use error::AgentError;
pub use state::AgentState;
pub use trace::{Transition, TransitionLog};
