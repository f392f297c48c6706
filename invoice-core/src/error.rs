use thiserror::Error;

/// Errors surfaced by invoice-core.
///
/// Asset loading failures are deliberately absent: a missing logo or
/// signature is recovered with a text fallback and never reaches the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Required fields are missing; nothing was drawn.
    #[error("invalid invoice: {0}")]
    Validation(String),

    #[error("drawing failed: {0}")]
    Draw(#[from] pdf_draw::DrawError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// The invoice store file exists but cannot be used.
    #[error("invoice store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;
