//! Assistant request/response models

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::safety::{CrisisEnvelope, ScanResult};

/// Interaction mode reported by the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Text,
    Voice,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "No message provided"))]
    pub message: String,
    #[serde(default = "default_language", deserialize_with = "null_as_language")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mode: ChatMode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub support_mode: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub training_mode: bool,
}

fn default_language() -> String {
    "en".to_string()
}

/// Explicit `null` behaves like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_language<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_language))
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScanRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "No text provided for scanning"))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub scan: ScanResult,
}

/// Plain assistant reply; `scan` is present only on the local path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan: Option<ScanResult>,
}

/// Body of a successful `/chat` response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Crisis(CrisisEnvelope),
    Reply(ChatReply),
}
