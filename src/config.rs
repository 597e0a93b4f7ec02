//! Runtime configuration loaded from the environment
//!
//! `.env` is loaded by `main` before [`Config::from_env`] runs, so every
//! variable can live either in the shell or in a local `.env` file.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://www.reddit.com/search.json";

/// What to do when the form is submitted with an empty term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyTermPolicy {
    /// Show the alert and still send the request
    Search,
    /// Show the alert and send nothing
    Skip,
}

impl EmptyTermPolicy {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "search" => Ok(Self::Search),
            "skip" => Ok(Self::Skip),
            other => bail!("expected `search` or `skip`, got `{other}`"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub empty_term: EmptyTermPolicy,
    pub alert_ttl: Duration,
    pub request_timeout: Duration,
    pub export_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            empty_term: EmptyTermPolicy::Search,
            alert_ttl: Duration::from_secs(2),
            request_timeout: Duration::from_secs(20),
            export_path: PathBuf::from("reddit-search.html"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Build the config from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup
    ///
    /// Unset keys keep their defaults. Set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("REDDIT_SEARCH_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(policy) = lookup("REDDIT_SEARCH_EMPTY_TERM") {
            config.empty_term = EmptyTermPolicy::parse(&policy)
                .context("Invalid REDDIT_SEARCH_EMPTY_TERM")?;
        }
        if let Some(secs) = lookup("REDDIT_SEARCH_ALERT_SECS") {
            config.alert_ttl = parse_secs(&secs).context("Invalid REDDIT_SEARCH_ALERT_SECS")?;
        }
        if let Some(secs) = lookup("REDDIT_SEARCH_TIMEOUT_SECS") {
            config.request_timeout =
                parse_secs(&secs).context("Invalid REDDIT_SEARCH_TIMEOUT_SECS")?;
        }
        if let Some(path) = lookup("REDDIT_SEARCH_EXPORT_PATH") {
            config.export_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("REDDIT_SEARCH_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the rest of the app cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            bail!("endpoint must be an http(s) URL, got `{}`", self.endpoint);
        }
        if self.endpoint.contains('?') {
            bail!("endpoint must not carry its own query string");
        }
        if self.alert_ttl.is_zero() {
            bail!("alert lifetime must be greater than 0");
        }
        if self.request_timeout.is_zero() {
            bail!("request timeout must be greater than 0");
        }
        Ok(())
    }
}

fn parse_secs(value: &str) -> Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("`{value}` is not a whole number of seconds"))?;
    Ok(Duration::from_secs(secs))
}
