use image::ImageError;

/// Reasons a selected photo cannot be attached
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("Please select an image file")]
    NotAnImage { media_type: String },

    #[error("Failed to load image for compression: {0}")]
    Decode(#[source] ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] ImageError),

    #[error("Image is too large ({size_mb:.1} MB even after compression). Please use a smaller image.")]
    TooLarge { size_mb: f64 },
}

/// Result type for photo operations
pub type Result<T> = std::result::Result<T, PhotoError>;
