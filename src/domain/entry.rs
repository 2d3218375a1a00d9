//! Entry, asset and reference models
//!
//! These mirror the delivery API's wire shape: every record carries a `sys`
//! block (identity and type) and a free-form `fields` mapping. Field values
//! stay as raw JSON; typed accessors interpret them on demand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    Entry,
    Asset,
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::Entry => write!(f, "Entry"),
            LinkType::Asset => write!(f, "Asset"),
        }
    }
}

/// A pointer-by-id to another entry or asset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub id: String,
    pub link_type: LinkType,
}

impl Reference {
    pub fn entry(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link_type: LinkType::Entry,
        }
    }

    pub fn asset(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link_type: LinkType::Asset,
        }
    }

    /// Interprets a field value as a link
    ///
    /// Accepts `{"sys": {"type": "Link", "linkType": "...", "id": "..."}}`.
    /// A missing `linkType` is read as an entry link.
    pub fn from_value(value: &Value) -> Option<Self> {
        let sys = value.get("sys")?;
        if let Some(kind) = sys.get("type").and_then(Value::as_str) {
            if kind != "Link" {
                return None;
            }
        }

        let id = sys.get("id")?.as_str()?;
        let link_type = match sys.get("linkType").and_then(Value::as_str) {
            Some("Asset") => LinkType::Asset,
            Some("Entry") | None => LinkType::Entry,
            Some(_) => return None,
        };

        Some(Self {
            id: id.to_string(),
            link_type,
        })
    }
}

/// A link to a content type, as carried in `sys.contentType`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeLink {
    #[serde(default)]
    pub sys: LinkSys,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkSys {
    #[serde(default)]
    pub id: String,
}

/// System metadata shared by entries and assets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentTypeLink>,
}

/// An identified content record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub sys: Sys,

    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Entry {
    /// Creates an entry of the given kind with no fields
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            sys: Sys {
                id: id.into(),
                record_type: Some("Entry".to_string()),
                content_type: Some(ContentTypeLink {
                    sys: LinkSys { id: kind.into() },
                }),
            },
            fields: Map::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    /// Content type id (e.g. `guide`, `landingPage`)
    pub fn kind(&self) -> Option<&str> {
        self.sys
            .content_type
            .as_ref()
            .map(|ct| ct.sys.id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Returns a non-empty string field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(Value::as_f64)
    }

    /// Sort key for section-like entries; absent or non-numeric reads as 0
    pub fn order(&self) -> f64 {
        self.number("order").unwrap_or(0.0)
    }

    /// Interprets a field as a single link
    pub fn reference(&self, name: &str) -> Option<Reference> {
        self.field(name).and_then(Reference::from_value)
    }

    /// Interprets a field as a list of links
    ///
    /// A single link is returned as a one-element list; non-link items
    /// are skipped.
    pub fn references(&self, name: &str) -> Vec<Reference> {
        match self.field(name) {
            Some(Value::Array(items)) => items.iter().filter_map(Reference::from_value).collect(),
            Some(value) => Reference::from_value(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// True when the entry carries no field data (unpublished or stripped)
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An identified binary resource, used as an image source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub sys: Sys,

    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Asset {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("file".to_string(), serde_json::json!({ "url": url.into() }));
        Self {
            sys: Sys {
                id: id.into(),
                record_type: Some("Asset".to_string()),
                content_type: None,
            },
            fields,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.fields
            .insert("title".to_string(), Value::String(title.into()));
        self
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn title(&self) -> Option<&str> {
        self.fields
            .get("title")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// File URL as stored (usually protocol-relative, `//images.ctfassets.net/...`)
    pub fn url(&self) -> Option<&str> {
        self.fields
            .get("file")
            .and_then(|f| f.get("url"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// File URL with a scheme, suitable for an `<img src>`
    pub fn absolute_url(&self) -> Option<String> {
        self.url().map(|url| {
            if url.starts_with("//") {
                format!("https:{}", url)
            } else {
                url.to_string()
            }
        })
    }
}
