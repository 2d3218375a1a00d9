//! Include table and reference resolution
//!
//! A delivery response side-loads linked records under `includes.Entry[]`
//! and `includes.Asset[]`. Resolution joins an owning entry's link fields
//! against that table. Links that cannot be resolved are dropped rather
//! than reported, so one unpublished record never breaks a whole page.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use super::entry::{Asset, Entry, LinkType, Reference};
use super::wire::from_json_value;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid include table: {0}")]
    InvalidInput(String),
}

/// Response-scoped lookup of linked entries and assets by id
#[derive(Debug, Clone, Default)]
pub struct IncludeTable {
    entries: HashMap<String, Entry>,
    assets: HashMap<String, Asset>,
}

impl IncludeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a raw `includes` payload
    ///
    /// Null yields an empty table. Anything other than an object whose
    /// `Entry`/`Asset` members are arrays of records is rejected.
    pub fn from_value(value: &Value) -> Result<Self, ResolveError> {
        let map = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(map) => map,
            other => {
                return Err(ResolveError::InvalidInput(format!(
                    "expected an object, got {}",
                    json_kind(other)
                )))
            }
        };

        let mut table = Self::new();

        if let Some(entries) = map.get("Entry").filter(|v| !v.is_null()) {
            let entries: Vec<Entry> = from_json_value(entries)
                .map_err(|e| ResolveError::InvalidInput(format!("Entry: {}", e)))?;
            table.extend_entries(entries);
        }

        if let Some(assets) = map.get("Asset").filter(|v| !v.is_null()) {
            let assets: Vec<Asset> = from_json_value(assets)
                .map_err(|e| ResolveError::InvalidInput(format!("Asset: {}", e)))?;
            table.extend_assets(assets);
        }

        Ok(table)
    }

    pub fn insert_entry(&mut self, entry: Entry) {
        self.entries.insert(entry.sys.id.clone(), entry);
    }

    pub fn insert_asset(&mut self, asset: Asset) {
        self.assets.insert(asset.sys.id.clone(), asset);
    }

    pub fn extend_entries(&mut self, entries: impl IntoIterator<Item = Entry>) {
        for entry in entries {
            self.insert_entry(entry);
        }
    }

    pub fn extend_assets(&mut self, assets: impl IntoIterator<Item = Asset>) {
        for asset in assets {
            self.insert_asset(asset);
        }
    }

    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.get(id)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Resolves every link in `field` on `owner`, keeping reference order
    pub fn resolve_list<'a>(&'a self, owner: &Entry, field: &str) -> Vec<ResolvedEntry<'a>> {
        owner
            .references(field)
            .iter()
            .filter_map(|reference| self.resolve_reference(owner, field, reference))
            .collect()
    }

    /// Resolves a single link in `field`; for a list, the first resolvable one
    pub fn resolve_one<'a>(&'a self, owner: &Entry, field: &str) -> Option<ResolvedEntry<'a>> {
        owner
            .references(field)
            .iter()
            .find_map(|reference| self.resolve_reference(owner, field, reference))
    }

    fn resolve_reference<'a>(
        &'a self,
        owner: &Entry,
        field: &str,
        reference: &Reference,
    ) -> Option<ResolvedEntry<'a>> {
        if reference.link_type != LinkType::Entry {
            tracing::debug!(
                owner = owner.id(),
                field,
                id = %reference.id,
                "skipping asset link in entry field"
            );
            return None;
        }

        match self.entries.get(&reference.id) {
            Some(entry) if !entry.is_empty() => Some(self.attach_assets(entry)),
            Some(_) => {
                tracing::debug!(
                    owner = owner.id(),
                    field,
                    id = %reference.id,
                    "dropping linked entry with no fields"
                );
                None
            }
            None => {
                tracing::debug!(
                    owner = owner.id(),
                    field,
                    id = %reference.id,
                    "dropping unresolved link"
                );
                None
            }
        }
    }

    /// Attaches every asset the entry links to directly
    fn attach_assets<'a>(&'a self, entry: &'a Entry) -> ResolvedEntry<'a> {
        let mut assets = HashMap::new();

        for (name, value) in &entry.fields {
            let Some(reference) = Reference::from_value(value) else {
                continue;
            };
            if reference.link_type != LinkType::Asset {
                continue;
            }
            if let Some(asset) = self.assets.get(&reference.id) {
                assets.insert(name.clone(), asset);
            }
        }

        ResolvedEntry { entry, assets }
    }
}

/// A linked entry joined with the assets its fields point at
///
/// This is a derived view; the underlying entry is never modified.
#[derive(Debug, Clone)]
pub struct ResolvedEntry<'a> {
    entry: &'a Entry,
    assets: HashMap<String, &'a Asset>,
}

impl<'a> ResolvedEntry<'a> {
    pub fn entry(&self) -> &'a Entry {
        self.entry
    }

    pub fn id(&self) -> &'a str {
        self.entry.id()
    }

    /// The asset attached under `field`, if the link resolved
    pub fn asset(&self, field: &str) -> Option<&'a Asset> {
        self.assets.get(field).copied()
    }

    pub fn order(&self) -> f64 {
        self.entry.order()
    }
}

impl std::ops::Deref for ResolvedEntry<'_> {
    type Target = Entry;

    fn deref(&self) -> &Self::Target {
        self.entry
    }
}

/// Stable ascending sort on the `order` field (absent reads as 0)
///
/// Orders compare numerically, so `-0.0` ties with `0` and keeps its place.
pub fn sort_by_order(entries: &mut [ResolvedEntry<'_>]) {
    entries.sort_by(|a, b| a.order().partial_cmp(&b.order()).unwrap_or(Ordering::Equal));
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
