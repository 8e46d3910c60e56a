//! Shared HTTP client for content-type probes and PDF downloads

use std::time::Duration;

use reqwest::Client;

use crate::utils::constants::CHROME_USER_AGENT;

const CONNECT_TIMEOUT_SECS: u64 = 20;

/// Build the client used outside the browser
///
/// Sends the same user agent as the browser so servers answer a probe the
/// way they would answer the page visit. `timeout` bounds a whole request,
/// body included.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
        .timeout(timeout)
        .user_agent(CHROME_USER_AGENT)
        .build()
}
