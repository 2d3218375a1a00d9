//! Render a standalone rich-text document

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::config::Config;
use crate::domain::from_json_str;
use crate::render::{RichTextRenderer, StyleTable};

/// Style table to render with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StyleChoice {
    #[default]
    Guide,
    ContentPage,
    Plain,
}

impl StyleChoice {
    fn table(self, config: &Config) -> StyleTable {
        match self {
            StyleChoice::Guide => config.style.guide.clone(),
            StyleChoice::ContentPage => config.style.content_page.clone(),
            StyleChoice::Plain => StyleTable::plain(),
        }
    }
}

/// Renders the document JSON at `path`
///
/// The file may hold a document node or any field value the renderer
/// accepts (a bare string renders as escaped text).
pub fn run(
    output: &Output,
    config: &Config,
    path: &Path,
    style: StyleChoice,
    max_depth: Option<usize>,
) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    let value: serde_json::Value = from_json_str(&content)
        .with_context(|| format!("Failed to parse document: {}", path.display()))?;

    output.verbose_ctx("render", &format!("Rendering {} with {:?} style", path.display(), style));

    let mut renderer = RichTextRenderer::new(style.table(config));
    if let Some(depth) = max_depth {
        renderer = renderer.with_max_depth(depth);
    }
    let html = renderer.render_value(Some(&value));

    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "html": html,
        }));
    } else {
        output.html(&html);
    }

    Ok(())
}
