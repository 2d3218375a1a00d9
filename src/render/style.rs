//! Per-page style tables for rich-text rendering
//!
//! Page variants share one renderer and differ only in the classes they
//! attach to each element and a few behaviour switches.

use serde::{Deserialize, Serialize};

/// What to do with a paragraph whose rendered content is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyParagraphs {
    /// Emit `<p></p>`
    #[default]
    Keep,
    /// Emit nothing
    Omit,
}

/// How list items are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListItemContent {
    /// Full recursive rendering of the item's children
    #[default]
    Rich,
    /// Plain text of the item's first block only; empty items are dropped
    FirstBlockPlain,
}

/// Which hyperlink targets are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPolicy {
    /// http, https, mailto, tel and relative targets; anything else becomes `#`
    #[default]
    Safe,
    /// Any target, escaped but unchecked
    Permissive,
}

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

impl LinkPolicy {
    /// Returns the href to emit for `uri`
    pub fn href<'a>(&self, uri: Option<&'a str>) -> &'a str {
        let Some(uri) = uri.filter(|u| !u.trim().is_empty()) else {
            return "#";
        };

        match self {
            LinkPolicy::Permissive => uri,
            LinkPolicy::Safe if is_safe_target(uri) => uri,
            LinkPolicy::Safe => {
                tracing::warn!(uri, "rejected hyperlink target");
                "#"
            }
        }
    }
}

fn is_safe_target(uri: &str) -> bool {
    // Browsers ignore whitespace and control characters when reading a scheme
    let normalized: String = uri
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    let Some(colon) = normalized.find(':') else {
        return true;
    };

    let candidate = &normalized[..colon];
    if candidate.contains(['/', '?', '#']) {
        return true;
    }

    let scheme = candidate.to_ascii_lowercase();
    SAFE_SCHEMES.contains(&scheme.as_str())
}

/// Element classes and behaviour switches for one page variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    pub heading_1: Option<String>,
    pub heading_2: Option<String>,
    pub heading_3: Option<String>,
    pub heading_4: Option<String>,
    pub paragraph: Option<String>,
    pub unordered_list: Option<String>,
    pub ordered_list: Option<String>,
    pub list_item: Option<String>,
    pub blockquote: Option<String>,
    pub horizontal_rule: Option<String>,
    pub hyperlink: Option<String>,

    /// Element used for block quotes
    pub blockquote_tag: String,

    pub empty_paragraphs: EmptyParagraphs,
    pub list_items: ListItemContent,
    pub links: LinkPolicy,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::plain()
    }
}

fn class(name: &str) -> Option<String> {
    Some(name.to_string())
}

impl StyleTable {
    /// Bare semantic markup, no classes
    pub fn plain() -> Self {
        Self {
            heading_1: None,
            heading_2: None,
            heading_3: None,
            heading_4: None,
            paragraph: None,
            unordered_list: None,
            ordered_list: None,
            list_item: None,
            blockquote: None,
            horizontal_rule: None,
            hyperlink: None,
            blockquote_tag: "blockquote".to_string(),
            empty_paragraphs: EmptyParagraphs::Keep,
            list_items: ListItemContent::Rich,
            links: LinkPolicy::Safe,
        }
    }

    /// Guide sections
    pub fn guide() -> Self {
        Self {
            heading_1: class("bruv-heading-xl"),
            heading_2: class("bruv-heading-l"),
            heading_3: class("bruv-heading-m"),
            heading_4: class("bruv-heading-s"),
            paragraph: None,
            unordered_list: class("bruv-list bruv-list--bullet"),
            ordered_list: class("bruv-list bruv-list--number"),
            list_item: None,
            blockquote: class("bruv-inset-text"),
            horizontal_rule: class("bruv-section-break bruv-section-break--visible"),
            hyperlink: class("bruv-link"),
            blockquote_tag: "div".to_string(),
            empty_paragraphs: EmptyParagraphs::Keep,
            list_items: ListItemContent::Rich,
            links: LinkPolicy::Safe,
        }
    }

    /// Generic content pages (get started, support, ...)
    pub fn content_page() -> Self {
        Self {
            heading_1: class("bruv-heading-l"),
            heading_2: class("bruv-heading-m"),
            heading_3: class("bruv-heading-s"),
            heading_4: class("bruv-heading-s"),
            paragraph: class("bruv-body"),
            unordered_list: class("bruv-list bruv-list--bullet"),
            ordered_list: class("bruv-list bruv-list--number"),
            list_item: None,
            blockquote: class("bruv-inset-text"),
            horizontal_rule: class("bruv-section-break bruv-section-break--visible"),
            hyperlink: class("bruv-link"),
            blockquote_tag: "div".to_string(),
            empty_paragraphs: EmptyParagraphs::Omit,
            list_items: ListItemContent::FirstBlockPlain,
            links: LinkPolicy::Safe,
        }
    }

    /// Checks values that are written into markup unescaped
    ///
    /// `blockquote_tag` must be a bare element name: an ASCII letter followed
    /// by letters, digits or `-`.
    pub fn validate(&self) -> Result<(), String> {
        let tag = &self.blockquote_tag;
        let mut chars = tag.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');

        if !valid {
            return Err(format!("blockquote_tag '{}' is not an element name", tag));
        }
        Ok(())
    }

    /// Class for a heading level (1-based)
    pub fn heading(&self, level: u8) -> Option<&str> {
        match level {
            1 => self.heading_1.as_deref(),
            2 => self.heading_2.as_deref(),
            3 => self.heading_3.as_deref(),
            _ => self.heading_4.as_deref(),
        }
    }
}
