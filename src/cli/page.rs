//! Page commands (landing, guides, page)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::config::Config;
use crate::delivery::{ContentSource, DeliveryClient, FileSource};
use crate::site::{PageRequest, Site};

/// Builds one page and writes it to stdout or `out`
///
/// A page-level failure still emits the error box, then returns an error
/// so the process exits non-zero.
pub fn run(
    output: &Output,
    config: &Config,
    request: PageRequest,
    input: Option<&Path>,
    out: Option<&Path>,
) -> Result<()> {
    let context = request.kind().to_string();

    match input {
        Some(path) => {
            output.verbose_ctx(&context, &format!("Reading saved response: {}", path.display()));
            build(output, config, FileSource::new(path), &request, out)
        }
        None => {
            let client = DeliveryClient::new(&config.delivery)?;
            output.verbose_ctx(&context, &format!("Fetching from {}", client.describe()));
            build(output, config, client, &request, out)
        }
    }
}

fn build<S: ContentSource>(
    output: &Output,
    config: &Config,
    source: S,
    request: &PageRequest,
    out: Option<&Path>,
) -> Result<()> {
    let context = request.kind().to_string();
    let site = Site::new(source, &config.style);
    let outcome = site.build(request);

    output.verbose_ctx(
        &context,
        &format!("Rendered {} bytes of HTML", outcome.html.len()),
    );

    if let Some(path) = out {
        fs::write(path, &outcome.html)
            .with_context(|| format!("Failed to write output: {}", path.display()))?;
        output.verbose_ctx(&context, &format!("Wrote {}", path.display()));
    }

    if output.is_json() {
        let mut body = serde_json::json!({
            "success": outcome.is_ok(),
            "page": context,
            "html": outcome.html,
        });
        if let Some(error) = &outcome.error {
            body["error"] = serde_json::Value::String(error.message());
        }
        if let Some(path) = out {
            body["path"] = serde_json::Value::String(path.display().to_string());
        }
        output.data(&body);
    } else if let Some(path) = out {
        if outcome.is_ok() {
            output.success(&format!("Wrote {} page to {}", context, path.display()));
        }
    } else {
        output.html(&outcome.html);
    }

    match outcome.error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}
