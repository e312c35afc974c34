//! Listing page parser
//!
//! Parses HTML from the paginated search results page and extracts
//! wallpaper candidates.

use tracing::debug;

use super::document::{Document, Selectors, attr, compile, first_in, text};
use crate::error::Result;
use crate::types::ListingCandidate;
use crate::url::resolve_link;

/// Title used when a thumbnail has no usable `alt` text
pub const DEFAULT_TITLE: &str = "Untitled";

/// Author used when a thumbnail names no author
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// Parses listing HTML and returns at most `max_candidates` candidates
///
/// Thumbnails without a usable detail link are skipped and do not take a
/// slot. Indexes are 1-based and follow listing order.
///
/// # Arguments
/// * `html` - Raw HTML string from the listing page
/// * `base_url` - Site root used to resolve relative links
/// * `selectors` - Markup selectors for the target site
/// * `max_candidates` - Cap on the number of candidates returned
///
/// # Errors
/// Returns `Parse` if one of the configured selectors is invalid
pub fn parse_listing(
    html: &str,
    base_url: &str,
    selectors: &Selectors,
    max_candidates: usize,
) -> Result<Vec<ListingCandidate>> {
    let thumbnail_selector = compile(&selectors.thumbnail)?;
    let link_selector = compile(&selectors.detail_link)?;
    let title_selector = compile(&selectors.title_image)?;
    let author_selector = compile(&selectors.author)?;

    let document = Document::parse(html);
    let thumbnails = document.find(&thumbnail_selector);
    debug!(found = thumbnails.len(), "Listing thumbnails found");

    let mut candidates = Vec::new();

    for thumbnail in thumbnails {
        if candidates.len() >= max_candidates {
            break;
        }

        let Some(href) = first_in(&thumbnail, &link_selector).and_then(|a| attr(&a, "href"))
        else {
            debug!("Skipping thumbnail without detail link");
            continue;
        };

        let detail_url = match resolve_link(base_url, href) {
            Ok(url) => url,
            Err(e) => {
                debug!(href, error = %e, "Skipping thumbnail with unusable link");
                continue;
            }
        };

        let title = first_in(&thumbnail, &title_selector)
            .and_then(|img| attr(&img, "alt"))
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        let author = first_in(&thumbnail, &author_selector)
            .map(|el| text(&el))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        candidates.push(ListingCandidate {
            index: candidates.len() + 1,
            detail_url,
            title,
            author,
        });
    }

    Ok(candidates)
}
