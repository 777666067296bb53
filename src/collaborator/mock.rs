use std::sync::Mutex;
use async_trait::async_trait;
use super::{Collaborator, CollaboratorError};

enum Script {
    /// Responses consumed front to back; exhaustion is an error.
    Queue(Vec<Result<String, CollaboratorError>>),
    /// The same response, forever.
    Repeat(String),
}

/// A scripted collaborator for tests and demos. Records every prompt it
/// receives.
pub struct MockCollaborator {
    script:  Mutex<Script>,
    prompts: Mutex<Vec<String>>,
}

impl MockCollaborator {
    /// A collaborator that plays back the given responses in order, then
    /// fails with `Unavailable` once they run out. `Err` entries let tests
    /// script a failure at an exact call index.
    pub fn scripted(responses: Vec<Result<String, CollaboratorError>>) -> Self {
        Self {
            script:  Mutex::new(Script::Queue(responses)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A collaborator that plays back the given texts in order.
    pub fn replies(texts: Vec<&str>) -> Self {
        Self::scripted(texts.into_iter().map(|t| Ok(t.to_string())).collect())
    }

    /// A collaborator that answers every prompt with the same text.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            script:  Mutex::new(Script::Repeat(text.into())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of times complete() was invoked
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Returns the prompt passed to the Nth call (0-indexed)
    pub fn prompt_for_call(&self, n: usize) -> Option<String> {
        self.prompts.lock().unwrap().get(n).cloned()
    }
}

#[async_trait]
impl Collaborator for MockCollaborator {
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let mut script = self.script.lock().unwrap();
        match &mut *script {
            Script::Repeat(text) => Ok(text.clone()),
            Script::Queue(responses) => {
                if responses.is_empty() {
                    return Err(CollaboratorError::Unavailable(
                        "MockCollaborator: no more scripted responses".to_string(),
                    ));
                }
                responses.remove(0)
            }
        }
    }
}
