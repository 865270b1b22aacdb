use std::time::Duration;

use tracing::warn;

use crate::error::{ApiError, Result};

/// Retry behaviour for upsert-style POST requests (job tracking).
/// The streaming search layer has no retry policy by design; a dropped
/// stream surfaces as a failed session and retry is a user decision.
pub struct RetryConfig {
    pub max_retries: usize,
    pub delays: Vec<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delays: vec![1, 2, 4],
        }
    }
}

/// Retry an HTTP POST with bounded backoff.
///
/// Retries on network errors and 5xx responses.
/// Returns immediately on success or 4xx.
pub async fn retry_post(
    client: &reqwest::Client,
    url: &str,
    auth_token: Option<&str>,
    query: &[(&str, &str)],
    body: &serde_json::Value,
    config: &RetryConfig,
) -> Result<reqwest::Response> {
    let max_attempts = config.max_retries + 1;

    for attempt in 0..max_attempts {
        let mut req = client.post(url).query(query);
        if let Some(token) = auth_token {
            req = req.bearer_auth(token);
        }

        match req.json(body).send().await {
            Ok(resp) if resp.status().is_server_error() => {
                if attempt < config.delays.len() {
                    let status = resp.status();
                    warn!(
                        "POST attempt {}/{} failed (HTTP {}), retrying in {}s…",
                        attempt + 1,
                        max_attempts,
                        status,
                        config.delays[attempt],
                    );
                    tokio::time::sleep(Duration::from_secs(config.delays[attempt])).await;
                } else {
                    return Ok(resp);
                }
            }
            Ok(resp) => return Ok(resp),
            Err(e) => {
                if attempt < config.delays.len() {
                    warn!(
                        "POST attempt {}/{} failed ({}), retrying in {}s…",
                        attempt + 1,
                        max_attempts,
                        e,
                        config.delays[attempt],
                    );
                    tokio::time::sleep(Duration::from_secs(config.delays[attempt])).await;
                } else {
                    return Err(ApiError::from(e));
                }
            }
        }
    }

    unreachable!()
}
