use async_trait::async_trait;
use super::{Collaborator, CollaboratorError};

// ── Anthropic request types ──────────────────────────────

#[derive(serde::Serialize)]
struct AnthropicRequest {
    model:      String,
    max_tokens: u32,
    messages:   Vec<AnthropicMessage>,
}

#[derive(serde::Serialize)]
struct AnthropicMessage {
    role:    String,
    content: String,
}

// ── Anthropic response types ─────────────────────────────

#[derive(serde::Deserialize, Debug)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(tag = "type")]
enum AnthropicContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    // Tool-use and thinking blocks can appear depending on the model;
    // the loop only consumes text.
    #[serde(other)]
    Other,
}

// ── Collaborator ─────────────────────────────────────────

/// Text completion against the Anthropic Messages API over raw reqwest.
pub struct AnthropicCollaborator {
    client:     reqwest::Client,
    api_key:    String,
    api_base:   String,
    model:      String,
    max_tokens: u32,
}

impl AnthropicCollaborator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client:     reqwest::Client::new(),
            api_key:    api_key.into(),
            api_base:   "https://api.anthropic.com".to_string(),
            model:      model.into(),
            max_tokens: 1024,
        }
    }

    /// Reads ANTHROPIC_API_KEY from the environment.
    pub fn from_env(model: impl Into<String>) -> Result<Self, CollaboratorError> {
        let key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            CollaboratorError::Auth("ANTHROPIC_API_KEY not set".to_string())
        })?;
        Ok(Self::new(key, model))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl Collaborator for AnthropicCollaborator {
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        let request = AnthropicRequest {
            model:      self.model.clone(),
            max_tokens: self.max_tokens,
            messages:   vec![AnthropicMessage {
                role:    "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.api_base))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CollaboratorError::Timeout(e.to_string())
                } else {
                    CollaboratorError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => CollaboratorError::Auth(format!("{status}: {body}")),
                429       => CollaboratorError::RateLimited(format!("{status}: {body}")),
                _         => CollaboratorError::Unavailable(format!("{status}: {body}")),
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Malformed(e.to_string()))?;

        let text: String = parsed
            .content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.as_str()),
                AnthropicContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            return Err(CollaboratorError::EmptyResponse);
        }
        Ok(text)
    }
}
