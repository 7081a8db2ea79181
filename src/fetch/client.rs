// src/fetch/client.rs
use crate::utils::error::FetchError;
use reqwest::header;
use std::time::Duration;

const USER_AGENT: &str = concat!("gdp_extractor/", env!("CARGO_PKG_VERSION"));

/// Upper bound on the single blocking point of an extraction.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw response body plus the charset the server declared for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    pub charset: Option<String>,
}

/// Thin wrapper around a reqwest client configured for fetching HTML pages.
#[derive(Debug, Clone)]
pub struct PageClient {
    http: reqwest::Client,
}

impl PageClient {
    /// Creates a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self { http })
    }

    /// Downloads the document at `url` and returns the raw body.
    /// Any non-2xx status is treated as a failure.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        tracing::info!("Downloading document from: {}", url);
        tracing::debug!("Using User-Agent: {}", USER_AGENT);

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, url))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(FetchError::Http(status));
        }

        let charset = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_param);

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, url))?;
        tracing::debug!(
            "Successfully downloaded {} bytes from {} (charset: {:?})",
            body.len(),
            url,
            charset
        );

        Ok(FetchedPage {
            body: body.to_vec(),
            charset,
        })
    }
}

/// Pulls the `charset` parameter out of a Content-Type value.
fn charset_param(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
