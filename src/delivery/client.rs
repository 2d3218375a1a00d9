//! Content sources
//!
//! [`DeliveryClient`] talks to the hosted delivery API. [`FileSource`]
//! serves a saved response body from disk, for offline rendering.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};

use super::{DeliveryError, EntriesResponse, EntryQuery};
use crate::config::DeliveryConfig;
use crate::domain::from_json_str;

/// Anything that can answer an entry query
pub trait ContentSource {
    fn fetch_entries(&self, query: &EntryQuery) -> Result<EntriesResponse, DeliveryError>;

    /// Human-readable origin, for log lines
    fn describe(&self) -> String;
}

/// Blocking HTTP client for the delivery API
///
/// One attempt per query, bounded by the configured timeout.
pub struct DeliveryClient {
    http: reqwest::blocking::Client,
    config: DeliveryConfig,
    token: String,
}

impl DeliveryClient {
    pub fn new(config: &DeliveryConfig) -> Result<Self, DeliveryError> {
        config.require_space_id()?;
        let token = config.require_token()?.to_string();

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
            token,
        })
    }
}

impl ContentSource for DeliveryClient {
    fn fetch_entries(&self, query: &EntryQuery) -> Result<EntriesResponse, DeliveryError> {
        let url = query.url(&self.config)?;
        tracing::debug!(url = %url, "fetching entries");

        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "delivery response");
        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        from_json_str(&body).map_err(DeliveryError::Decode)
    }

    fn describe(&self) -> String {
        format!(
            "{} (space {})",
            self.config.base_url,
            self.config.space_id.as_deref().unwrap_or_default()
        )
    }
}

/// A saved response body on disk
///
/// Queries are answered by filtering the saved `items` on content type and
/// field equality; the include depth is ignored and the saved `includes`
/// are returned as-is.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for FileSource {
    fn fetch_entries(&self, query: &EntryQuery) -> Result<EntriesResponse, DeliveryError> {
        let content = fs::read_to_string(&self.path).map_err(|source| DeliveryError::Io {
            path: self.path.clone(),
            source,
        })?;

        let mut response: EntriesResponse =
            from_json_str(&content).map_err(DeliveryError::Decode)?;

        let before = response.items.len();
        response.items.retain(|entry| {
            let kind_matches = entry
                .kind()
                .map(|kind| kind == query.content_type)
                .unwrap_or(true);

            kind_matches
                && query
                    .field_filters
                    .iter()
                    .all(|(field, expected)| field_matches(entry.field(field), expected))
        });

        tracing::debug!(
            path = %self.path.display(),
            kept = response.items.len(),
            of = before,
            "filtered saved response"
        );

        Ok(response)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn field_matches(value: Option<&serde_json::Value>, expected: &str) -> bool {
    match value {
        Some(serde_json::Value::String(s)) => s == expected,
        Some(serde_json::Value::Number(n)) => n.to_string() == expected,
        Some(serde_json::Value::Bool(b)) => b.to_string() == expected,
        _ => false,
    }
}
