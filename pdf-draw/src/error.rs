use thiserror::Error;

/// Errors raised by the drawing layer.
#[derive(Error, Debug)]
pub enum DrawError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are neither JPEG nor PNG.
    #[error("unsupported image format: {0}")]
    UnsupportedImage(String),

    /// The bytes look like a known format but could not be decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    /// `open_page` was asked for a page that has not been written.
    #[error("page {page} out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, DrawError>;
