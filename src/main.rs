//! content-pages - Render headless-CMS content into HTML page fragments

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = content_pages::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
