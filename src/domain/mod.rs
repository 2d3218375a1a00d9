//! Domain models for content pages
//!
//! Contains the entry/asset model, reference resolution and the rich-text
//! tree, without any I/O concerns.

mod entry;
mod include;
mod rich_text;
mod wire;

pub use entry::{Asset, ContentTypeLink, Entry, LinkSys, LinkType, Reference, Sys};
pub use include::{sort_by_order, IncludeTable, ResolveError, ResolvedEntry};
pub use rich_text::{HeadingLevel, Mark, Node};
pub use wire::{from_json_str, from_json_value};
