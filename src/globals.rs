//! Global shared resources
//!
//! Holds the one HTTP client every search request goes through, so
//! repeated submissions reuse pooled connections.

use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// Global HTTP client - reuses connections across requests
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Build an HTTP client for the search endpoint
///
/// Features:
/// - Connection pooling (reuses TCP connections)
/// - Gzip/Brotli decompression
/// - Connect and overall timeouts
/// - A User-Agent naming this tool (Reddit throttles anonymous agents hard)
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .timeout(timeout)
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .gzip(true)
        .brotli(true)
        .user_agent(concat!(
            "reddit-search-tui/",
            env!("CARGO_PKG_VERSION"),
            " (+https://github.com/user/reddit-search-tui)"
        ))
        .build()
        .context("Failed to create HTTP client")
}

/// Initialize the global HTTP client
///
/// Call this once at startup. Later calls keep the first client.
pub fn init_http_client(timeout: Duration) -> Result<&'static Client> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client);
    }
    let client = build_http_client(timeout)?;
    Ok(HTTP_CLIENT.get_or_init(|| client))
}
