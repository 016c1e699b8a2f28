use super::Fetch;
use crate::Error;
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

/// Settings for the [`RetryClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per request timeout
    pub timeout: Duration,
    /// Number of attempts per request before giving up
    pub attempts: usize,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: Duration::from_secs(10),
            attempts: 3,
            user_agent: format!("geoshift/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A blocking HTTP client retrying failed requests a bounded number of times.
///
/// The client holds no mutable state, and can be shared between threads.
/// Construct one and hand it to [`trip_distance`](super::trip_distance).
#[derive(Debug, Clone)]
pub struct RetryClient {
    client: Client,
    attempts: usize,
}

impl RetryClient {
    pub fn new(config: &ClientConfig) -> Result<RetryClient, Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Http(format!("cannot create HTTP client: {e}")))?;
        Ok(RetryClient {
            client,
            attempts: config.attempts.max(1),
        })
    }

    // One request. The flag accompanying an error tells whether a retry may help
    fn get_once(&self, url: &str) -> Result<serde_json::Value, (Error, bool)> {
        let response = self.client.get(url).send().map_err(|e| {
            let error = Error::Http(format!("request failed: {}", e.without_url()));
            (error, true)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error = Error::Http(format!("request failed with status: {status}"));
            return Err((error, retryable(status)));
        }

        response.json::<serde_json::Value>().map_err(|e| {
            let error = Error::Http(format!("malformed response: {}", e.without_url()));
            (error, false)
        })
    }
}

impl Fetch for RetryClient {
    fn get_json(&self, url: &str) -> Result<serde_json::Value, Error> {
        let mut attempt = 1;
        loop {
            match self.get_once(url) {
                Ok(value) => return Ok(value),
                Err((e, true)) if attempt < self.attempts => {
                    warn!("attempt {attempt} of {}: {e}", self.attempts);
                    attempt += 1;
                }
                Err((e, retry)) => {
                    if retry {
                        debug!("giving up after {attempt} attempts");
                    } else {
                        debug!("not retrying: {e}");
                    }
                    return Err(e);
                }
            }
        }
    }
}

// Server side failures may be transient. Client errors (bad request,
// rejected credentials, ...) come back the same on every attempt
fn retryable(status: StatusCode) -> bool {
    status.is_server_error()
}

// ----- T E S T S ---------------------------------------------------------------------
