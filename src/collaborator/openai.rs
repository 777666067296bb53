use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage,
        ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use super::{Collaborator, CollaboratorError};

/// Text completion via async-openai — works against OpenAI and any
/// OpenAI-compatible endpoint (Groq, Together, Ollama, Fireworks, …).
pub struct OpenAiCollaborator {
    client: Client<OpenAIConfig>,
    model:  String,
}

impl OpenAiCollaborator {
    /// Standard OpenAI client using OPENAI_API_KEY env var
    pub fn new(model: impl Into<String>) -> Self {
        Self { client: Client::new(), model: model.into() }
    }

    /// Custom base URL — e.g. "https://api.groq.com/openai/v1"
    pub fn with_base_url(
        api_base: impl Into<String>,
        api_key:  impl Into<String>,
        model:    impl Into<String>,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key);
        Self { client: Client::with_config(config), model: model.into() }
    }

    fn classify(err: String) -> CollaboratorError {
        let lower = err.to_lowercase();
        if lower.contains("401")
            || lower.contains("403")
            || lower.contains("authentication")
            || lower.contains("unauthorized")
            || lower.contains("invalid api key")
        {
            CollaboratorError::Auth(err)
        } else if lower.contains("429")
            || lower.contains("rate limit")
            || lower.contains("too many requests")
            || lower.contains("quota")
        {
            CollaboratorError::RateLimited(err)
        } else if lower.contains("timed out") || lower.contains("timeout") {
            CollaboratorError::Timeout(err)
        } else {
            CollaboratorError::Transport(err)
        }
    }
}

#[async_trait]
impl Collaborator for OpenAiCollaborator {
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        let message: ChatCompletionRequestMessage =
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| CollaboratorError::Malformed(e.to_string()))?
                .into();

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message])
            .build()
            .map_err(|e| CollaboratorError::Malformed(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| Self::classify(e.to_string()))?;

        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                CollaboratorError::Malformed("response carried no message content".to_string())
            })?;

        if text.trim().is_empty() {
            return Err(CollaboratorError::EmptyResponse);
        }
        Ok(text)
    }
}
