//! # Delivery
//!
//! Fetches entries from the hosted delivery API (or a saved response).
//!
//! ## Request Shape
//!
//! ```text
//! GET {base_url}/spaces/{space}/entries?content_type=guide&fields.slug=intro&include=2
//! Authorization: Bearer {delivery_token}
//! ```
//!
//! The body carries `items[]` and `includes.{Entry,Asset}[]`, decoded into
//! [`EntriesResponse`].
//!
//! ## Failure Policy
//!
//! A failed request (transport error, timeout, non-success status,
//! undecodable body) is terminal for the page being built. There is no
//! retry.

mod client;
mod query;
mod response;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

pub use client::{ContentSource, DeliveryClient, FileSource};
pub use query::EntryQuery;
pub use response::EntriesResponse;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid delivery URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Status { status: u16, url: String },

    #[error("Invalid response body")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
