//! Delivery API response body

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Entry, IncludeTable, ResolveError};

/// Body of an entries request: matched items plus side-loaded includes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntriesResponse {
    #[serde(default)]
    pub items: Vec<Entry>,

    /// Kept raw so a malformed table is reported when resolution starts
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub includes: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl EntriesResponse {
    pub fn first(&self) -> Option<&Entry> {
        self.items.first()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn include_table(&self) -> Result<IncludeTable, ResolveError> {
        IncludeTable::from_value(&self.includes)
    }
}
