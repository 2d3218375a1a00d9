//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `landing` | Landing page with features and featured guide |
//! | `guides` | Guides list, or one guide with `--slug` |
//! | `page` | Content page selected by `--type` |
//! | `render` | Render a rich-text document file |
//! | `config` | Show effective configuration |
//!
//! ## Content Source
//!
//! Pages are fetched from the delivery API using `--space-id`/`--token`
//! (or `CONTENTFUL_SPACE_ID`/`CONTENTFUL_DELIVERY_TOKEN`, or the config
//! file). Pass `--input response.json` to render a saved response instead.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - The HTML fragment
//! - `json` - `{"success": ..., "html": ...}`
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! content-pages --verbose guides --slug getting-started
//! ```

mod app;
mod output;
mod page;
mod render_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
