//! Crisis detection and referral envelope
//!
//! Detection is a plain substring test against a fixed phrase list: no
//! stemming, no negation handling. The violence terms ("kill", "stab",
//! "murder") fire on ordinary conversation such as news discussion, so
//! each phrase carries a category that gets logged alongside a hit.

use serde::{Deserialize, Serialize};

use crate::config::SupportContacts;

/// Broad class of a crisis phrase. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisCategory {
    SelfHarm,
    Abuse,
    Violence,
    Danger,
}

pub const CRISIS_PHRASES: &[(&str, CrisisCategory)] = &[
    ("suicide", CrisisCategory::SelfHarm),
    ("kill myself", CrisisCategory::SelfHarm),
    ("i want to die", CrisisCategory::SelfHarm),
    ("dont want to live", CrisisCategory::SelfHarm),
    ("self-harm", CrisisCategory::SelfHarm),
    ("hurt myself", CrisisCategory::SelfHarm),
    ("im being abused", CrisisCategory::Abuse),
    ("they beat me", CrisisCategory::Abuse),
    ("rape", CrisisCategory::Abuse),
    ("i was raped", CrisisCategory::Abuse),
    ("he raped me", CrisisCategory::Abuse),
    ("stab", CrisisCategory::Violence),
    ("kill", CrisisCategory::Violence),
    ("murder", CrisisCategory::Violence),
    ("im in danger", CrisisCategory::Danger),
    ("someone is trying to", CrisisCategory::Danger),
    ("threaten", CrisisCategory::Danger),
    ("im being attacked", CrisisCategory::Danger),
    ("bleeding", CrisisCategory::Danger),
    ("help me now", CrisisCategory::Danger),
];

/// First crisis phrase found in a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisMatch {
    pub phrase: &'static str,
    pub category: CrisisCategory,
}

/// Returns the first listed phrase contained in the lowercased text.
pub fn detect(text: &str) -> Option<CrisisMatch> {
    if text.is_empty() {
        return None;
    }
    let lowered = text.to_lowercase();

    CRISIS_PHRASES
        .iter()
        .find(|(phrase, _)| lowered.contains(phrase))
        .map(|&(phrase, category)| CrisisMatch { phrase, category })
}

// ============================================================================
// RESPONSE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralKind {
    Phone,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    #[serde(rename = "type")]
    pub kind: ReferralKind,
    pub value: String,
    pub label: String,
}

/// Standard supportive response returned instead of any generated reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisEnvelope {
    pub crisis: bool,
    pub message: String,
    pub resources: Vec<Referral>,
}

impl CrisisEnvelope {
    pub fn new(contacts: &SupportContacts) -> Self {
        let mut resources = Vec::new();
        if let Some(hotline) = &contacts.hotline {
            resources.push(Referral {
                kind: ReferralKind::Phone,
                value: hotline.clone(),
                label: "Local helpline".to_string(),
            });
        }
        if let Some(url) = &contacts.url {
            resources.push(Referral {
                kind: ReferralKind::Link,
                value: url.clone(),
                label: "Support resources".to_string(),
            });
        }

        let mut message = String::from(
            "I'm really sorry you're going through this. If you are in immediate danger, \
             please call your local emergency number right now. If you can, contact a trusted \
             person nearby. You can also reach out to a support helpline",
        );
        if let Some(hotline) = &contacts.hotline {
            message.push_str(" at ");
            message.push_str(hotline);
        }
        if let Some(url) = &contacts.url {
            message.push_str(" or visit ");
            message.push_str(url);
        }
        message.push('.');

        Self { crisis: true, message, resources }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_self_harm() {
        let hit = detect("I want to KILL MYSELF").unwrap();
        assert_eq!(hit.phrase, "kill myself");
        assert_eq!(hit.category, CrisisCategory::SelfHarm);
    }

    #[test]
    fn test_no_crisis() {
        assert!(detect("How do I report a phishing email?").is_none());
        assert!(detect("").is_none());
    }

    #[test]
    fn test_violence_terms_overmatch() {
        // Known precision issue: news talk still trips the detector
        let hit = detect("The news covered a murder trial today").unwrap();
        assert_eq!(hit.category, CrisisCategory::Violence);
        assert!(detect("this skill will kill my productivity").is_some());
    }

    #[test]
    fn test_envelope_without_contacts() {
        let envelope = CrisisEnvelope::new(&SupportContacts::default());
        assert!(envelope.crisis);
        assert!(envelope.resources.is_empty());
        assert!(envelope.message.ends_with("support helpline."));
    }

    #[test]
    fn test_envelope_with_contacts() {
        let contacts = SupportContacts {
            hotline: Some("116".to_string()),
            url: Some("https://help.example.org".to_string()),
        };
        let envelope = CrisisEnvelope::new(&contacts);

        assert_eq!(envelope.resources.len(), 2);
        assert_eq!(envelope.resources[0].kind, ReferralKind::Phone);
        assert_eq!(envelope.resources[1].label, "Support resources");
        assert!(envelope.message.contains("helpline at 116 or visit https://help.example.org."));

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["resources"][0]["type"], "phone");
        assert_eq!(json["resources"][1]["type"], "link");
    }

    #[test]
    fn test_envelope_url_only() {
        let contacts = SupportContacts { hotline: None, url: Some("https://x.org".to_string()) };
        let envelope = CrisisEnvelope::new(&contacts);
        assert_eq!(envelope.resources.len(), 1);
        assert!(envelope.message.ends_with("helpline or visit https://x.org."));
    }
}
