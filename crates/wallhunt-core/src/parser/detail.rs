//! Detail page parser
//!
//! Extracts the responsive image descriptor (`srcset`-style list) from a
//! detail page and resolves the widest image variant.

use tracing::debug;

use super::document::{Document, Selectors, attr, compile};
use crate::error::Result;
use crate::types::ImageVariant;

/// Extracts the descriptor attribute from detail page HTML
///
/// # Returns
/// `None` if the preview image or its descriptor attribute is missing
///
/// # Errors
/// Returns `Parse` if the configured preview selector is invalid
pub fn extract_descriptor(html: &str, selectors: &Selectors) -> Result<Option<String>> {
    let preview_selector = compile(&selectors.preview_image)?;
    let document = Document::parse(html);

    Ok(document
        .first(&preview_selector)
        .and_then(|img| attr(&img, &selectors.descriptor_attr))
        .map(str::to_string))
}

/// Parses a comma-separated `url width` descriptor list
///
/// Each entry is split on its first run of whitespace. The width token may
/// carry a trailing `w`; what remains must be an unsigned integer. Entries
/// with a missing or non-numeric width are rejected rather than guessed.
///
/// # Example
/// ```
/// use wallhunt_core::parser::parse_descriptor;
/// let variants = parse_descriptor("a.jpg 400w, b.jpg 1200w");
/// assert_eq!(variants.len(), 2);
/// assert_eq!(variants[1].width, 1200);
/// ```
pub fn parse_descriptor(descriptor: &str) -> Vec<ImageVariant> {
    descriptor
        .split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            let variant = parse_entry(entry);
            if variant.is_none() {
                debug!(entry, "Rejecting descriptor entry");
            }
            variant
        })
        .collect()
}

fn parse_entry(entry: &str) -> Option<ImageVariant> {
    let (url, rest) = entry.split_once(char::is_whitespace)?;
    let token = rest.split_whitespace().next()?;
    let digits = token.strip_suffix('w').unwrap_or(token);
    let width = digits.parse::<u32>().ok()?;

    Some(ImageVariant {
        url: url.to_string(),
        width,
    })
}

/// Picks the widest variant
///
/// Variants are ordered by width descending with a stable sort, so the
/// first-seen variant wins a tie.
pub fn best_variant(mut variants: Vec<ImageVariant>) -> Option<ImageVariant> {
    variants.sort_by(|a, b| b.width.cmp(&a.width));
    variants.into_iter().next()
}

/// Resolves the highest-resolution image URL from detail page HTML
///
/// # Returns
/// `None` if the page has no descriptor or no entry parses
///
/// # Errors
/// Returns `Parse` if the configured preview selector is invalid
pub fn parse_detail(html: &str, selectors: &Selectors) -> Result<Option<String>> {
    let Some(descriptor) = extract_descriptor(html, selectors)? else {
        return Ok(None);
    };

    Ok(best_variant(parse_descriptor(&descriptor)).map(|v| v.url))
}
