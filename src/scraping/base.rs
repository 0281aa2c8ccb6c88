use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

const USER_AGENT: &str = "brentford-calendar/0.1 (+https://github.com/brentford-calendar)";

pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("unable to build http client")
}

pub fn fetch_html(url: &str, timeout: Duration) -> Result<String> {
    tracing::info!(url, timeout_secs = timeout.as_secs(), "fetching page");
    let response = http_client(timeout)?
        .get(url)
        .send()
        .with_context(|| format!("request failed for {url}"))?;
    let response = response
        .error_for_status()
        .with_context(|| format!("non-success status for {url}"))?;
    let body = response
        .text()
        .with_context(|| format!("unable to read response body for {url}"))?;
    tracing::debug!(bytes = body.len(), "received page");
    Ok(body)
}

/// Short prefix of a payload for log lines.
pub fn excerpt(input: &str, max_chars: usize) -> String {
    let mut out: String = input.chars().take(max_chars).collect();
    if input.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_truncates_long_payloads() {
        assert_eq!(excerpt("abcdef", 3), "abc...");
        assert_eq!(excerpt("abc", 3), "abc");
        assert_eq!(excerpt("", 10), "");
    }
}
