//! Runtime settings read from the environment (`.env` is loaded by the binary).

use std::time::Duration;

const DEFAULT_POLL_SECS: u64 = 5;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Settings for the storefront process.
#[derive(Debug, Clone)]
pub struct Settings {
    /// How often the pending-order watcher re-reads the orders
    pub pending_poll_interval: Duration,
    /// API key for the description generator, if configured
    pub gemini_api_key: Option<String>,
    /// Model used by the description generator
    pub gemini_model: String,
}

impl Settings {
    /// Reads `PENDING_POLL_SECS`, `GEMINI_API_KEY` and `GEMINI_MODEL` from the
    /// process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the settings from `lookup`, which maps a variable name to its
    /// value.
    ///
    /// Unset, unparsable or zero poll intervals and blank API keys fall back
    /// to defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let poll_secs = lookup("PENDING_POLL_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_POLL_SECS);

        Self {
            pending_poll_interval: Duration::from_secs(poll_secs),
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            gemini_model: lookup("GEMINI_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pending_poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}
