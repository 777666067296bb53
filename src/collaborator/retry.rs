use std::sync::Arc;
use async_trait::async_trait;
use super::{Collaborator, CollaboratorError};

/// A wrapper around any [`Collaborator`] that retries transient failures
/// with exponential back-off.
///
/// The loop controller itself never retries — a failed call is fatal to the
/// run. Wrapping the collaborator in this type is the supported way to add
/// a retry policy without the controller observing the intermediate
/// failures. Only [`CollaboratorError::is_retryable`] kinds are retried;
/// authentication failures return immediately.
pub struct RetryingCollaborator {
    inner:       Arc<dyn Collaborator>,
    max_retries: u32,
}

impl RetryingCollaborator {
    pub fn new(inner: Arc<dyn Collaborator>, max_retries: u32) -> Self {
        Self { inner, max_retries }
    }
}

#[async_trait]
impl Collaborator for RetryingCollaborator {
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            match self.inner.complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if !e.is_retryable() => {
                    tracing::error!(error = %e, "collaborator error — not retrying");
                    return Err(e);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        // Rate limits get a longer initial wait
                        let base_wait = if matches!(e, CollaboratorError::RateLimited(_)) {
                            5
                        } else {
                            1
                        };
                        let wait_secs = std::cmp::min(base_wait << attempt, 60);

                        tracing::warn!(
                            attempt = attempt + 1,
                            max     = self.max_retries,
                            wait_s  = wait_secs,
                            error   = %e,
                            "collaborator transient error — retrying"
                        );
                        tokio::time::sleep(std::time::Duration::from_secs(wait_secs)).await;
                    }
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            CollaboratorError::Unavailable("retry loop exhausted without a call".to_string())
        }))
    }
}
