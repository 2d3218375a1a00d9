//! # Rendering
//!
//! Turns resolved entries and rich-text trees into HTML fragments.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `html` | Text and attribute escaping |
//! | `style` | Per-page class tables and behaviour switches |
//! | `rich_text` | Node-tree dispatch into markup |
//! | `pages` | Layout markup for each page variant |
//!
//! Rich-text rendering is pure and never fails; page layouts are askama
//! templates and only fail if a template does. Every literal text value
//! passes through [`escape_text`] before it reaches the output.

mod html;
mod pages;
mod rich_text;
mod style;

pub use html::{escape_attr, escape_text};
pub use pages::{
    content_page, error_box, format_date, guide_detail, guide_url, guides_list, landing_page,
    LandingView, PageKind,
};
pub use rich_text::{RichTextRenderer, DEFAULT_MAX_DEPTH};
pub use style::{EmptyParagraphs, LinkPolicy, ListItemContent, StyleTable};
