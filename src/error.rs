/// Result type for stay-scout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stay-scout
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid price range: min {min} exceeds max {max}")]
    InvalidPriceRange { min: u32, max: u32 },

    #[error("Unknown property type: {0}")]
    UnknownCategory(String),

    #[error("Unknown campus: {0}")]
    UnknownCampus(String),

    #[error("Invalid photo reference: {0}")]
    InvalidPhoto(String),

    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("Enquiry rejected: {0}")]
    EnquiryRejected(#[from] crate::enquiry::EnquiryRejection),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
