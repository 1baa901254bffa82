use thiserror::Error;
use vitrine_model::PageId;

/// Errors from page and object storage
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(PageId),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed row payload: {0}")]
    Decode(#[from] serde_json::Error),
}
