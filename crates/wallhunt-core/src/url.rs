//! URL helper functions for the target site
//!
//! Provides functions for building listing URLs and resolving the
//! relative links found in listing markup.

use url::Url;

use crate::error::{Result, WallhuntError};

/// Default target site root
pub const DEFAULT_BASE_URL: &str = "https://www.freepik.com";

/// Builds the paginated listing URL for a normalized query
///
/// The query is percent-encoded as a single path segment.
///
/// # Example
/// ```
/// use wallhunt_core::url::build_listing_url;
/// let url = build_listing_url("https://www.freepik.com", "mountain-lake", 2);
/// assert_eq!(url, "https://www.freepik.com/free-photos-vectors/mountain-lake/2");
/// ```
pub fn build_listing_url(base_url: &str, query: &str, page: u32) -> String {
    let encoded = urlencoding::encode(query);
    format!(
        "{}/free-photos-vectors/{}/{}",
        base_url.trim_end_matches('/'),
        encoded,
        page
    )
}

/// URL of the site root, always with a trailing slash
///
/// # Example
/// ```
/// use wallhunt_core::url::site_root;
/// assert_eq!(site_root("https://www.freepik.com"), "https://www.freepik.com/");
/// ```
pub fn site_root(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// Resolves a link from listing markup against the site root
///
/// Absolute links are returned unchanged; relative ones are joined.
///
/// # Errors
/// - `InvalidUrl` if the base or the joined link is not a valid URL
pub fn resolve_link(base_url: &str, href: &str) -> Result<String> {
    let base = Url::parse(&site_root(base_url))
        .map_err(|e| WallhuntError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    base.join(href.trim())
        .map(|u| u.to_string())
        .map_err(|e| WallhuntError::InvalidUrl(format!("{}: {}", href, e)))
}
