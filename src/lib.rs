//! content-pages - Render headless-CMS content into HTML page fragments
//!
//! Entries are fetched from a content delivery API, their linked entries
//! and assets are resolved from the response's include table, and their
//! rich-text fields are rendered into markup for each page variant.

pub mod domain;
pub mod render;
pub mod delivery;
pub mod config;
pub mod site;
pub mod cli;

pub use domain::{Asset, Entry, IncludeTable, Node, Reference, ResolvedEntry};
pub use render::{RichTextRenderer, StyleTable};
pub use site::{PageError, PageRequest, Site};
