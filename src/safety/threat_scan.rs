//! Keyword threat scanner
//!
//! Case-insensitive substring scan against a fixed security-incident vocabulary.
//! The score is a linear placeholder (`matches / 3`, capped at 1.0) with no
//! calibration behind it; treat it as a hint, not a risk model.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Security-incident vocabulary. Order here is the order matches are reported in.
pub const THREAT_KEYWORDS: &[&str] = &[
    "phish", "malware", "ddos", "hack", "exploit", "threat", "virus", "ransom",
];

/// Matches needed to saturate the score
pub const SATURATION_MATCHES: usize = 3;

// ============================================================================
// SCAN
// ============================================================================

/// Result of a keyword scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// 0.0 - 1.0
    pub score: f64,
    pub matches: Vec<String>,
}

impl ScanResult {
    pub fn has_risk(&self) -> bool {
        self.score > 0.0
    }
}

/// Scan `text` for threat keywords.
pub fn scan(text: &str) -> ScanResult {
    let lowered = text.to_lowercase();

    let matches: Vec<String> = THREAT_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .map(|k| k.to_string())
        .collect();

    let score = (matches.len() as f64 / SATURATION_MATCHES as f64).min(1.0);

    ScanResult { score, matches }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords() {
        let result = scan("How do I set a strong password?");
        assert_eq!(result.score, 0.0);
        assert!(result.matches.is_empty());
        assert!(!result.has_risk());
    }

    #[test]
    fn test_partial_score() {
        let result = scan("I think this link is a phishing hack attempt");
        assert_eq!(result.matches, vec!["phish", "hack"]);
        assert!((result.score - 2.0 / 3.0).abs() < 1e-9);
        assert!(result.has_risk());
    }

    #[test]
    fn test_saturates_at_three() {
        let result = scan("ddos exploit virus");
        assert_eq!(result.matches, vec!["ddos", "exploit", "virus"]);
        assert_eq!(result.score, 1.0);

        let result = scan("Ransomware, malware and a DDoS threat from a hacker");
        assert_eq!(result.matches.len(), 5);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let result = scan("PHISHING campaign");
        assert_eq!(result.matches, vec!["phish"]);

        // Repeats of one keyword count once
        let result = scan("virus virus virus");
        assert_eq!(result.matches, vec!["virus"]);
        assert!((result.score - 1.0 / 3.0).abs() < 1e-9);
    }
}
