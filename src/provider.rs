//! Chat-completion provider client
//!
//! HTTP client for an OpenAI-compatible `/chat/completions` endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::{AppError, AppResult};

const TEMPERATURE: f32 = 0.6;
const EMPTY_REPLY: &str = "Sorry, I could not generate a response.";

/// Trauma-informed system prompt sent with every proxied message
pub const SYSTEM_PROMPT: &str = "You are SafeNet's multilingual GBV and Digital Safety assistant \
tailored for African contexts. Be empathetic, culturally sensitive, trauma-informed, and prioritize \
survivor safety and dignity. For Support Mode: validate feelings, provide grounding techniques, \
immediate safety steps, and local referral suggestions when available; never give clinical diagnoses \
or instructions that could increase risk. For Training Mode: provide clear, actionable digital \
literacy and GBV prevention guidance, culturally relevant examples, safe-by-design tips, and \
empowerment-focused learning steps suitable for girls and women in African communities. Maintain \
confidentiality and suggest professional/local services for legal, medical, or emergency needs.";

// Request/Response types

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Provider client. Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ChatProvider {
    api_key: String,
    model: String,
    endpoint: String,
    http_client: reqwest::Client,
}

impl fmt::Debug for ChatProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatProvider")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ChatProvider {
    /// Build a client, or `None` when the proxy branch is disabled.
    pub fn from_config(config: &ProviderConfig) -> AppResult<Option<Self>> {
        let Some(api_key) = config.active_key() else {
            return Ok(None);
        };

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal {
                context: "Failed to create HTTP client",
                details: e.to_string(),
            })?;

        Ok(Some(Self {
            api_key: api_key.to_string(),
            model: config.model.clone(),
            endpoint: format!("{}/chat/completions", config.base_url),
            http_client,
        }))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `message` with the system prompt and return the first choice's text.
    pub async fn complete(&self, message: &str) -> AppResult<String> {
        let request = CompletionRequest {
            model: &self.model,
            messages: [
                Message { role: "system", content: SYSTEM_PROMPT },
                Message { role: "user", content: message },
            ],
            temperature: TEMPERATURE,
        };

        let response = self.http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::provider(format!(
                "provider returned {}: {}",
                status, error_text
            )));
        }

        let body: CompletionResponse = response.json().await?;

        let reply = body
            .choices
            .into_iter()
            .flatten()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| EMPTY_REPLY.to_string());

        Ok(reply)
    }
}
