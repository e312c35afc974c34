//! HTML parsers for the target site
//!
//! Contains modules for parsing the listing and detail page types, plus
//! the document query adapter both are written against.

pub mod detail;
pub mod document;
pub mod listing;

pub use detail::{best_variant, parse_descriptor, parse_detail};
pub use document::Selectors;
pub use listing::{DEFAULT_AUTHOR, DEFAULT_TITLE, parse_listing};
