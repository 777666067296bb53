use std::collections::HashMap;
use std::sync::Arc;

use crate::collaborator::Collaborator;
use crate::controller::{AgentLoop, TransitionHook};
use crate::error::AgentError;
use crate::trace::Transition;

/// Ergonomic construction for [`AgentLoop`].
///
/// # Example
/// ```no_run
/// # use agentloop::{AgentLoopBuilder, MockCollaborator};
/// let agent = AgentLoopBuilder::new()
///     .collaborator(Box::new(MockCollaborator::always("ok")))
///     .on_transition(|t| println!("{} -> {}", t.from, t.to))
///     .build()
///     .unwrap();
/// ```
pub struct AgentLoopBuilder {
    collaborator: Option<Box<dyn Collaborator>>,
    hook:         Option<TransitionHook>,
    metadata:     HashMap<String, serde_json::Value>,
}

impl AgentLoopBuilder {
    pub fn new() -> Self {
        Self {
            collaborator: None,
            hook:         None,
            metadata:     HashMap::new(),
        }
    }

    /// The text-completion backend. Required.
    pub fn collaborator(mut self, collaborator: Box<dyn Collaborator>) -> Self {
        self.collaborator = Some(collaborator);
        self
    }

    /// Register an observability callback invoked once per accepted
    /// transition. It must not panic and must not block.
    pub fn on_transition(mut self, f: impl Fn(&Transition) + Send + Sync + 'static) -> Self {
        self.hook = Some(TransitionHook(Arc::new(f)));
        self
    }

    /// Register a pre-built [`TransitionHook`], e.g. one shared across
    /// several controllers.
    pub fn hook(mut self, hook: TransitionHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Seed a metadata key copied into every fresh run's context.
    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Result<AgentLoop, AgentError> {
        let collaborator = self.collaborator
            .ok_or_else(|| AgentError::BuildError("collaborator is required".to_string()))?;

        Ok(AgentLoop::new(collaborator, self.hook, self.metadata))
    }
}

impl Default for AgentLoopBuilder {
    fn default() -> Self {
        Self::new()
    }
}
