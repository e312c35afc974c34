//! Core data types for the wallpaper scraper
//!
//! Contains the data structures that flow through one search execution.
//! None of them outlive the call that created them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WallhuntError};

/// Message returned when the search query is missing or blank
pub const QUERY_REQUIRED: &str = "Query parameter is required";

/// A validated, normalized search request
///
/// The query is trimmed and its spaces are replaced with hyphens, which is
/// the form the listing URL expects. Pages start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    page: u32,
}

impl SearchRequest {
    /// Validate and normalize a raw query
    ///
    /// # Errors
    /// - `Validation` if the query is empty or whitespace only
    ///
    /// # Example
    /// ```
    /// use wallhunt_core::SearchRequest;
    /// let request = SearchRequest::new("  mountain sunset ", 2).unwrap();
    /// assert_eq!(request.query(), "mountain-sunset");
    /// assert_eq!(request.page(), 2);
    /// ```
    pub fn new(query: &str, page: u32) -> Result<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(WallhuntError::Validation(QUERY_REQUIRED.to_string()));
        }

        Ok(Self {
            query: trimmed.replace(' ', "-"),
            page: page.max(1),
        })
    }

    /// Normalized query (no spaces)
    pub fn query(&self) -> &str {
        &self.query
    }

    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// An entry discovered on the listing page
///
/// Not yet confirmed to have a resolvable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCandidate {
    /// 1-based position in listing order
    pub index: usize,
    /// Absolute URL of the detail page
    pub detail_url: String,
    pub title: String,
    pub author: String,
}

/// One `url width` entry of a responsive image descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageVariant {
    pub url: String,
    pub width: u32,
}

/// Final wallpaper record
///
/// Serialized with camelCase keys for the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallpaper {
    /// Listing position of the candidate this record came from
    pub id: usize,

    /// Highest-resolution image URL
    pub url: String,

    pub title: String,

    pub author: String,

    /// Absolute URL of the detail page
    pub detail_url: String,
}

/// Why a search produced nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The listing page had no extractable entries
    EmptyListing,
    /// Every candidate was dropped during detail resolution
    ZeroAssembled,
}

/// Result of a search that did not fail hard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<Wallpaper>),
    NotFound(NotFoundReason),
}

impl SearchOutcome {
    /// Wallpapers found, empty for a not-found outcome
    pub fn into_wallpapers(self) -> Vec<Wallpaper> {
        match self {
            SearchOutcome::Found(wallpapers) => wallpapers,
            SearchOutcome::NotFound(_) => Vec::new(),
        }
    }
}
