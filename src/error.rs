//! Error types for the Reddit fetcher.
//!
//! Application plumbing uses `anyhow`; these variants only describe what
//! can go wrong between sending the search request and holding a list of
//! posts.

/// Errors that can occur while fetching search results.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status code.
    #[error("search endpoint returned status {0}")]
    Status(u16),

    /// The body was not JSON or did not have the listing shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
