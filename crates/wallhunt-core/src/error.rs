//! Error types for the wallpaper scraper
//!
//! Provides a comprehensive error enum with human-readable messages
//! and JSON-compatible serialization.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all wallhunt operations
///
/// Implements Display for human-readable messages and Serialize
/// so errors can be embedded in API responses.
#[derive(Error, Debug)]
pub enum WallhuntError {
    /// Search request rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Home page bootstrap failed
    #[error("Session bootstrap failed: {0}")]
    Session(String),

    /// Listing (search results) page could not be fetched
    #[error("Listing fetch failed: {0}")]
    ListingFetch(String),

    /// Detail page for one candidate could not be fetched
    #[error("Detail fetch failed for candidate {index}: {reason}")]
    DetailFetch { index: usize, reason: String },

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    Parse(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a status we do not accept
    #[error("Unexpected upstream status {status} from {url}")]
    UpstreamStatus { status: u16, url: String },

    /// Stable JSON search API failure
    #[error("Unsplash API error: {0}")]
    Unsplash(String),
}

impl WallhuntError {
    /// Whether the error aborts a whole search (as opposed to a single candidate)
    pub fn is_hard_failure(&self) -> bool {
        !matches!(
            self,
            WallhuntError::Validation(_) | WallhuntError::DetailFetch { .. }
        )
    }
}

impl Serialize for WallhuntError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for wallhunt operations
pub type Result<T> = std::result::Result<T, WallhuntError>;
