use regex::Regex;
use std::fmt;

/// Redacts credentials from text that is about to leave the process
///
/// Error messages returned to the webhook caller can embed Motion response
/// bodies and request details; they pass through here first.
#[derive(Clone)]
pub struct SecretScrubber {
    api_key_header_pattern: Regex,
    token_pattern: Regex,
    bearer_pattern: Regex,
    known_secrets: Vec<String>,
}

impl SecretScrubber {
    /// Create a new scrubber with the built-in patterns
    pub fn new() -> Self {
        Self {
            // Patterns are constants; failure here is a programming error
            api_key_header_pattern: Regex::new(r"(?i)x-api-key\s*[:=]\s*\S+").expect("valid regex"),
            token_pattern: Regex::new(
                r#"["']?(api_key|apikey|token|secret)["']?\s*[:=]\s*["']?[a-zA-Z0-9\-_\.+/=]{12,}["']?"#,
            )
            .expect("valid regex"),
            bearer_pattern: Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.]+").expect("valid regex"),
            known_secrets: Vec::new(),
        }
    }

    /// Also redact an exact secret value, such as the configured API key
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.is_empty() {
            self.known_secrets.push(secret);
        }
        self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let mut scrubbed = message.to_string();
        for secret in &self.known_secrets {
            scrubbed = scrubbed.replace(secret.as_str(), "[REDACTED]");
        }
        scrubbed = self
            .api_key_header_pattern
            .replace_all(&scrubbed, "X-API-Key: [REDACTED]")
            .to_string();
        scrubbed = self
            .bearer_pattern
            .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]")
            .to_string();
        self.token_pattern
            .replace_all(&scrubbed, "$1=[REDACTED]")
            .to_string()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber")
            .field("known_secrets", &self.known_secrets.len())
            .finish()
    }
}
