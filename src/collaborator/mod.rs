use async_trait::async_trait;
use thiserror::Error;

mod anthropic;
mod mock;
mod openai;
mod retry;

pub use anthropic::AnthropicCollaborator;
pub use mock::MockCollaborator;
pub use openai::OpenAiCollaborator;
pub use retry::RetryingCollaborator;

/// Why a collaborator call failed.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("collaborator returned an empty response")]
    EmptyResponse,

    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

impl CollaboratorError {
    /// Transient failures that a wrapping policy (e.g.
    /// [`RetryingCollaborator`]) may reasonably retry. Authentication and
    /// malformed-response failures are never transient.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CollaboratorError::RateLimited(_)
                | CollaboratorError::Timeout(_)
                | CollaboratorError::Transport(_)
        )
    }
}

/// The single interface between the loop controller and any text-completion
/// backend.
///
/// # Contract
/// - Must be Send + Sync (used behind Box<dyn Collaborator>)
/// - Given a non-empty prompt, returns a non-empty text response
/// - Returns Err(CollaboratorError) for any failure: authentication,
///   rate limiting, timeout, transport, malformed/empty output
/// - The controller depends on nothing about the response format beyond
///   non-emptiness; retry/backoff belongs in a wrapper, never in the
///   controller
#[async_trait]
pub trait Collaborator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError>;
}

/// Shared handles delegate, so a caller can keep a reference to a
/// collaborator (e.g. a mock under inspection) after handing it to the
/// controller.
#[async_trait]
impl<T: Collaborator + ?Sized> Collaborator for std::sync::Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        (**self).complete(prompt).await
    }
}
