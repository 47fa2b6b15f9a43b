//! Configuration for the HTTP collaborators.

use eyre::WrapErr;
use reqwest::blocking::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!("sanasto/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_WIKTIONARY_URL: &str = "https://en.wiktionary.org";
pub const DEFAULT_MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_TATOEBA_URL: &str = "https://tatoeba.org/en/api_v0/search";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Upper bound for a whole request, so a slow upstream can't stall the caller.
    pub timeout: Duration,
    pub user_agent: String,
    pub wiktionary_url: String,
    pub mymemory_url: String,
    pub tatoeba_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            wiktionary_url: DEFAULT_WIKTIONARY_URL.to_string(),
            mymemory_url: DEFAULT_MYMEMORY_URL.to_string(),
            tatoeba_url: DEFAULT_TATOEBA_URL.to_string(),
        }
    }
}

impl HttpConfig {
    /// Reads the configuration from the environment, using defaults for missing variables.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let mut config = Self::default();
        if let Some(timeout) = var("SANASTO_HTTP_TIMEOUT_SECS") {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .wrap_err_with(|| format!("Invalid SANASTO_HTTP_TIMEOUT_SECS '{timeout}'"))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(user_agent) = var("SANASTO_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(url) = var("WIKTIONARY_URL") {
            config.wiktionary_url = url;
        }
        if let Some(url) = var("MYMEMORY_URL") {
            config.mymemory_url = url;
        }
        if let Some(url) = var("TATOEBA_URL") {
            config.tatoeba_url = url;
        }
        Ok(config)
    }

    /// Builds a blocking client that applies the configured timeout to every request.
    pub fn client(&self) -> eyre::Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .wrap_err("Failed to build HTTP client")
    }
}
