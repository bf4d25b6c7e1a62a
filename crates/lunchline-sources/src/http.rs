//! Shared HTTP plumbing for the API clients.

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::error::{Error, Result};

/// Per-request timeout applied by [`build_client`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("lunchline/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by every source and notifier in a run.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// GETs `url` and parses the body as JSON, failing on non-2xx statuses.
pub async fn get_json(client: &reqwest::Client, url: &str) -> Result<Value> {
    tracing::debug!(url = %url, "GET");
    let started = Instant::now();

    let response = client.get(url).send().await?;
    let status = response.status();
    tracing::debug!(
        url = %url,
        status = %status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Response received"
    );

    if !status.is_success() {
        tracing::error!(url = %url, status = %status, "Request failed");
        return Err(Error::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| Error::Json {
        url: url.to_string(),
        source,
    })
}
