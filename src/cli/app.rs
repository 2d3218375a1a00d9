//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::render_cmd::StyleChoice;
use super::{page, render_cmd};
use crate::config::Config;
use crate::site::PageRequest;

#[derive(Parser)]
#[command(name = "content-pages")]
#[command(author, version, about = "Render headless-CMS content into HTML page fragments")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to content-pages.toml in this or a parent directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read a saved delivery response instead of calling the API
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Write the HTML fragment to a file instead of stdout
    #[arg(long, short = 'o', global = true)]
    pub out: Option<PathBuf>,

    /// Space identifier
    #[arg(long, global = true, env = "CONTENTFUL_SPACE_ID")]
    pub space_id: Option<String>,

    /// Delivery API token
    #[arg(long, global = true, env = "CONTENTFUL_DELIVERY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the landing page
    Landing,

    /// Render the guides list, or one guide with --slug
    Guides {
        /// Guide slug
        #[arg(long)]
        slug: Option<String>,
    },

    /// Render a content page (get started, support, ...)
    Page {
        /// Page type (defaults to pages.default_page_type)
        #[arg(long = "type")]
        page_type: Option<String>,
    },

    /// Render a rich-text document from a JSON file
    Render {
        /// Path to the document JSON
        file: PathBuf,

        /// Style table to use
        #[arg(long, value_enum, default_value_t = StyleChoice::Guide)]
        style: StyleChoice,

        /// Maximum nesting depth to render
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Show the effective configuration (token masked)
    Config,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "content_pages=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("content-pages starting");

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli.space_id, cli.token);
    output.verbose_ctx(
        "config",
        &format!(
            "space: {}, environment: {}",
            config.delivery.space_id.as_deref().unwrap_or("<unset>"),
            config.delivery.environment.as_deref().unwrap_or("<default>")
        ),
    );

    let input = cli.input.as_deref();
    let out = cli.out.as_deref();

    match cli.command {
        Commands::Landing => page::run(&output, &config, PageRequest::Landing, input, out)?,

        Commands::Guides { slug } => {
            let request = match slug {
                Some(slug) => PageRequest::Guide { slug },
                None => PageRequest::GuidesList,
            };
            page::run(&output, &config, request, input, out)?
        }

        Commands::Page { page_type } => {
            let page_type = page_type.unwrap_or_else(|| config.pages.default_page_type.clone());
            output.verbose_ctx("page", &format!("Page type: {}", page_type));
            page::run(&output, &config, PageRequest::Content { page_type }, input, out)?
        }

        Commands::Render { file, style, max_depth } => {
            render_cmd::run(&output, &config, &file, style, max_depth)?
        }

        Commands::Config => {
            let redacted = config.redacted();
            if output.is_json() {
                output.data(&redacted);
            } else {
                print!("{}", toml::to_string_pretty(&redacted)?);
            }
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
