//! JSON fetching with retries for the third-party content APIs.
//!
//! Content APIs are flaky and entirely optional: every failure degrades to `None` so the
//! calling command can fall back to another source or a friendly message.

use std::time::Duration;

use serde::de::DeserializeOwned;

/// Extra attempts after the first request.
const RETRIES: u32 = 2;

/// Wait before the first retry, in milliseconds.
const INITIAL_BACKOFF_MS: u64 = 600;

/// Multiplier applied to the wait after every retry, in tenths (1.7x).
const BACKOFF_FACTOR_TENTHS: u64 = 17;

/// Fetches JSON from third-party APIs using the shared reqwest client.
pub struct JsonFetcher<'a> {
    client: &'a reqwest::Client,
}

impl<'a> JsonFetcher<'a> {
    pub fn new(client: &'a reqwest::Client) -> Self {
        Self { client }
    }

    /// GETs `url` and decodes the body as `T`.
    ///
    /// Connection errors, timeouts and non-200 responses are retried with exponential
    /// backoff. A 200 response whose body doesn't decode is not retried.
    ///
    /// # Returns
    /// - `Some(T)` - Decoded response body
    /// - `None` - Every attempt failed or the body wasn't the expected JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        let mut delays = backoff_delays();

        loop {
            match self.client.get(url).send().await {
                Ok(response) if response.status() == reqwest::StatusCode::OK => {
                    return match response.json::<T>().await {
                        Ok(body) => Some(body),
                        Err(e) => {
                            tracing::warn!("Undecodable JSON from {}: {}", url, e);
                            None
                        }
                    };
                }
                Ok(response) => {
                    tracing::debug!("GET {} returned {}", url, response.status());
                }
                Err(e) => {
                    tracing::debug!("GET {} failed: {}", url, e);
                }
            }

            let Some(delay) = delays.next() else {
                tracing::warn!("Giving up on {} after {} attempts", url, RETRIES + 1);
                return None;
            };
            tokio::time::sleep(delay).await;
        }
    }
}

/// Waits between attempts: 600ms, then 1.7 times longer each retry.
fn backoff_delays() -> impl Iterator<Item = Duration> {
    (0..RETRIES).map(|retry| {
        Duration::from_millis(
            INITIAL_BACKOFF_MS * BACKOFF_FACTOR_TENTHS.pow(retry) / 10u64.pow(retry),
        )
    })
}
