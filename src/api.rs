// API client module: a small blocking HTTP client for the IMEI / serial
// number lookup service. One call, one GET, no retries. The response body
// uses `<br>` markers for line breaks and is normalized before display.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;

/// Base URL used when `IMEICHECK_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://alpha.imeicheck.com";

const LOOKUP_PATH: &str = "/api/modelBrandName";

/// Failure of a single lookup. Every transport problem (DNS, refused
/// connection, non-2xx status, broken body) lands in the same variant and
/// is shown to the user the same way.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Connection settings for the lookup service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub base_url: String,
    /// `None` means the request may block indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: None,
        }
    }
}

impl LookupConfig {
    /// Read `IMEICHECK_API_URL` and `IMEICHECK_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var("IMEICHECK_API_URL").ok(),
            std::env::var("IMEICHECK_TIMEOUT_SECS").ok(),
        )
    }

    /// Build a config from raw (possibly absent) setting values.
    pub fn from_values(base_url: Option<String>, timeout_secs: Option<String>) -> Result<Self> {
        let base_url = base_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let timeout = match timeout_secs.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .with_context(|| format!("Invalid IMEICHECK_TIMEOUT_SECS value: {raw:?}"))?;
                if secs == 0 {
                    anyhow::bail!("IMEICHECK_TIMEOUT_SECS must be greater than zero");
                }
                Some(Duration::from_secs(secs))
            }
        };

        Ok(LookupConfig { base_url, timeout })
    }
}

/// Blocking client for the lookup endpoint.
#[derive(Clone)]
pub struct LookupClient {
    client: Client,
    base_url: String,
}

impl LookupClient {
    pub fn new(config: LookupConfig) -> Result<Self> {
        // reqwest's blocking client defaults to a 30s timeout; only set one
        // when it was asked for.
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(LookupClient {
            client,
            base_url: config.base_url,
        })
    }

    /// Create a client configured from the environment, falling back to
    /// the public service with no timeout.
    pub fn from_env() -> Result<Self> {
        Self::new(LookupConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `identifier`. The identifier is percent-encoded
    /// so spaces or `&` can't corrupt the query string.
    pub fn request_url(&self, identifier: &str) -> String {
        format!(
            "{}{}?imei={}&format=html",
            self.base_url,
            LOOKUP_PATH,
            urlencoding::encode(identifier)
        )
    }

    /// Look up a serial number or IMEI. Blocks until the service answers
    /// or the transport fails. The caller is expected to pass a trimmed,
    /// non-empty identifier.
    pub fn lookup(&self, identifier: &str) -> Result<String, LookupError> {
        let url = self.request_url(identifier);
        log::debug!("GET {url}");

        let body = self
            .client
            .get(&url)
            .send()
            .and_then(|res| {
                log::info!("lookup responded with {}", res.status());
                res.error_for_status()
            })
            .and_then(|res| res.text())
            .map_err(|e| {
                log::warn!("lookup failed: {e}");
                LookupError::from(e)
            })?;

        Ok(normalize_response(&body))
    }
}

/// Turn the service's `<br>`-separated body into plain lines: trim the
/// body, split on `<br>` and real newlines, trim every line and drop the
/// blank ones.
pub fn normalize_response(raw: &str) -> String {
    raw.trim()
        .replace("<br>", "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text shown in the output area for a lookup outcome. Success and failure
/// render the same way: as one string that replaces the display.
pub fn render(outcome: &Result<String, LookupError>) -> String {
    match outcome {
        Ok(text) => text.clone(),
        Err(e) => e.to_string(),
    }
}
