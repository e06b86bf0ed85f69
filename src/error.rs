//! Error types for the icon-corner-mask crate.

/// Errors that can occur while masking icon corners.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A masking parameter or the image shape cannot produce valid corner regions.
    ///
    /// Always raised before any pixel is touched.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output format cannot carry an alpha channel, or is not recognised.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred while decoding or encoding an image.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
