//! Assistant request handling
//!
//! Every chat request takes exactly one of three routes, chosen in priority order:
//!
//! ```text
//!   supportMode && crisis phrase ──► Crisis    (referral envelope, no provider call)
//!   provider configured          ──► Provider  (proxy to chat completion)
//!   otherwise                    ──► Local     (keyword scan + canned reply)
//! ```

use crate::config::SupportContacts;
use crate::models::{ChatReply, ChatRequest, ChatResponse};
use crate::provider::ChatProvider;
use crate::safety::{crisis, threat_scan, CrisisEnvelope, CrisisMatch};
use crate::AppResult;

const SUPPORT_PREFIX: &str = "I hear you — thank you for sharing. ";
const RISK_DETECTED: &str = "Potential risks detected.";
const NO_RISK: &str = "No obvious threats found.";

/// Branch selected for a single request
#[derive(Debug, Clone, Copy)]
pub enum Route<'a> {
    Crisis(CrisisMatch),
    Provider(&'a ChatProvider),
    Local,
}

/// Stateless request handler; built once from configuration.
#[derive(Debug, Clone)]
pub struct Assistant {
    provider: Option<ChatProvider>,
    contacts: SupportContacts,
}

impl Assistant {
    pub fn new(provider: Option<ChatProvider>, contacts: SupportContacts) -> Self {
        Self { provider, contacts }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn route(&self, req: &ChatRequest) -> Route<'_> {
        if req.support_mode {
            if let Some(hit) = crisis::detect(&req.message) {
                return Route::Crisis(hit);
            }
        }
        match &self.provider {
            Some(provider) => Route::Provider(provider),
            None => Route::Local,
        }
    }

    pub async fn respond(&self, req: &ChatRequest) -> AppResult<ChatResponse> {
        match self.route(req) {
            Route::Crisis(hit) => {
                tracing::warn!(
                    category = ?hit.category,
                    language = %req.language,
                    "Crisis phrase detected in support mode; returning referral envelope"
                );
                Ok(ChatResponse::Crisis(CrisisEnvelope::new(&self.contacts)))
            }
            Route::Provider(provider) => {
                tracing::debug!(
                    model = provider.model(),
                    mode = ?req.mode,
                    training = req.training_mode,
                    "Proxying chat message to provider"
                );
                let text = provider.complete(&req.message).await?;
                Ok(ChatResponse::Reply(ChatReply { text, scan: None }))
            }
            Route::Local => Ok(ChatResponse::Reply(local_reply(req))),
        }
    }
}

/// Offline reply: keyword scan plus a canned acknowledgement.
pub fn local_reply(req: &ChatRequest) -> ChatReply {
    let scan = threat_scan::scan(&req.message);
    let prefix = if req.support_mode { SUPPORT_PREFIX } else { "" };
    let risk = if scan.has_risk() { RISK_DETECTED } else { NO_RISK };

    ChatReply {
        text: format!(
            "{}SafeNet Assistant ({}): I received your message. {}",
            prefix, req.language, risk
        ),
        scan: Some(scan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMode;
    use crate::provider::tests::{provider_config, spawn_mock_provider};
    use crate::safety::crisis::CrisisCategory;
    use axum::http::StatusCode;
    use std::sync::atomic::Ordering;

    fn request(message: &str, support_mode: bool) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            language: "en".to_string(),
            mode: ChatMode::Text,
            support_mode,
            training_mode: false,
        }
    }

    fn offline() -> Assistant {
        Assistant::new(None, SupportContacts::default())
    }

    #[test]
    fn test_route_priority() {
        let assistant = offline();

        let route = assistant.route(&request("I want to kill myself", true));
        assert!(matches!(route, Route::Crisis(m) if m.category == CrisisCategory::SelfHarm));

        // Crisis phrase without support mode goes down the normal path
        assert!(matches!(assistant.route(&request("I want to kill myself", false)), Route::Local));
        assert!(matches!(assistant.route(&request("hello", true)), Route::Local));
    }

    #[test]
    fn test_training_mode_does_not_change_route() {
        let assistant = offline();

        let mut req = request("I want to kill myself", true);
        req.training_mode = true;
        assert!(matches!(assistant.route(&req), Route::Crisis(_)));

        let mut req = request("phishing link", false);
        req.training_mode = true;
        assert!(matches!(assistant.route(&req), Route::Local));

        let with_provider = Assistant::new(
            ChatProvider::from_config(&provider_config("http://localhost:1/v1")).unwrap(),
            SupportContacts::default(),
        );
        assert!(matches!(with_provider.route(&req), Route::Provider(_)));
        req.training_mode = false;
        assert!(matches!(with_provider.route(&req), Route::Provider(_)));
    }

    #[test]
    fn test_local_reply_with_risk() {
        let reply = local_reply(&request("I think this link is a phishing hack attempt", false));
        let scan = reply.scan.unwrap();

        assert_eq!(scan.matches, vec!["phish", "hack"]);
        assert!((scan.score - 0.667).abs() < 0.001);
        assert_eq!(
            reply.text,
            "SafeNet Assistant (en): I received your message. Potential risks detected."
        );
    }

    #[test]
    fn test_local_reply_support_prefix() {
        let mut req = request("hello there", true);
        req.language = "fr".to_string();
        let reply = local_reply(&req);

        assert!(reply.text.starts_with(SUPPORT_PREFIX));
        assert!(reply.text.contains("(fr)"));
        assert!(reply.text.ends_with(NO_RISK));
    }

    #[tokio::test]
    async fn test_crisis_never_calls_provider() {
        let (url, calls) = spawn_mock_provider(
            StatusCode::OK,
            serde_json::json!({ "choices": [{ "message": { "content": "unused" } }] }),
        )
        .await;
        let provider = ChatProvider::from_config(&provider_config(&url)).unwrap();
        let assistant = Assistant::new(provider, SupportContacts::default());

        let response = assistant.respond(&request("I want to kill myself", true)).await.unwrap();

        assert!(matches!(response, ChatResponse::Crisis(ref e) if e.crisis));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_reply_is_verbatim() {
        let (url, calls) = spawn_mock_provider(
            StatusCode::OK,
            serde_json::json!({ "choices": [{ "message": { "content": "Use two-factor auth." } }] }),
        )
        .await;
        let provider = ChatProvider::from_config(&provider_config(&url)).unwrap();
        let assistant = Assistant::new(provider, SupportContacts::default());

        // Crisis phrase without support mode still reaches the provider
        let response = assistant.respond(&request("they threaten me online", false)).await.unwrap();

        assert_eq!(
            response,
            ChatResponse::Reply(ChatReply { text: "Use two-factor auth.".to_string(), scan: None })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
