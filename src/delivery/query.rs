//! Entry queries
//!
//! An [`EntryQuery`] names a content type plus optional equality filters
//! and include depth. It renders to a delivery URL of the form
//! `{base}/spaces/{space}[/environments/{env}]/entries?content_type=...`.

use url::Url;

use super::DeliveryError;
use crate::config::DeliveryConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub content_type: String,

    /// `fields.<name>=<value>` equality filters, in insertion order
    pub field_filters: Vec<(String, String)>,

    /// Depth of linked records to side-load
    pub include: Option<u8>,
}

impl EntryQuery {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            field_filters: Vec::new(),
            include: None,
        }
    }

    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_filters.push((field.into(), value.into()));
        self
    }

    pub fn include(mut self, depth: u8) -> Self {
        self.include = Some(depth);
        self
    }

    /// Builds the request URL for the configured space
    pub fn url(&self, config: &DeliveryConfig) -> Result<Url, DeliveryError> {
        let space_id = config.require_space_id()?;
        let mut url = Url::parse(&config.base_url)
            .map_err(|e| DeliveryError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DeliveryError::InvalidUrl(config.base_url.clone()))?;
            segments.pop_if_empty().extend(["spaces", space_id]);
            if let Some(environment) = config.environment.as_deref().filter(|e| !e.is_empty()) {
                segments.extend(["environments", environment]);
            }
            segments.push("entries");
        }

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("content_type", &self.content_type);
            for (field, value) in &self.field_filters {
                pairs.append_pair(&format!("fields.{}", field), value);
            }
            if let Some(depth) = self.include {
                pairs.append_pair("include", &depth.to_string());
            }
        }

        Ok(url)
    }
}
