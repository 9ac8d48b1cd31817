//! Configuration module

use std::env;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_PROVIDER: &str = "mock";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PROVIDER_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Frontend origin allowed by CORS in production
    pub frontend_url: String,

    /// Chat-completion provider settings
    pub provider: ProviderConfig,

    /// Referral contacts for crisis responses
    pub support: SupportContacts,
}

/// External chat-completion provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    /// Provider selector, lowercased ("openai", "mock", ...)
    pub name: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Returns the API key only when the proxy branch is enabled.
    pub fn active_key(&self) -> Option<&str> {
        match self.api_key.as_deref() {
            Some(key) if self.name == "openai" => Some(key),
            _ => None,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            name: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Hotline and URL shown to users in a crisis response. Either may be absent.
#[derive(Debug, Clone, Default)]
pub struct SupportContacts {
    pub hotline: Option<String>,
    pub url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),

            environment: get("NODE_ENV")
                .or_else(|| get("ENVIRONMENT"))
                .unwrap_or_else(|| "development".to_string()),

            frontend_url: get("FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),

            provider: ProviderConfig {
                api_key: get("AI_API_KEY"),
                name: get("AI_PROVIDER")
                    .unwrap_or_else(|| DEFAULT_PROVIDER.to_string())
                    .to_lowercase(),
                model: get("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: get("AI_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
                timeout_secs: get("AI_TIMEOUT_SECS")
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            },

            support: SupportContacts {
                hotline: get("SUPPORT_HOTLINE"),
                url: get("SUPPORT_URL"),
            },
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
