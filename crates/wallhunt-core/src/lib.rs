//! Wallhunt Scraper Core Library
//!
//! Provides an async API for locating high-resolution wallpapers on a
//! content site that offers no programmatic access.
//!
//! # Overview
//!
//! One search runs a short pipeline:
//! - Bootstrap a session against the home page (cookies + browser headers)
//! - Pause for a randomized delay
//! - Fetch and parse the paginated listing page into candidates
//! - Fetch each candidate's detail page and pick the widest image variant
//!
//! Failures of a single candidate only drop that candidate. Only session
//! and listing failures abort the search.
//!
//! # Example
//!
//! ```no_run
//! use wallhunt_core::{Result, SearchOutcome, SearchRequest, WallpaperScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = WallpaperScraper::new()?;
//!     let request = SearchRequest::new("misty mountains", 1)?;
//!
//!     match scraper.search(&request).await? {
//!         SearchOutcome::Found(wallpapers) => {
//!             for wallpaper in &wallpapers {
//!                 println!("#{} {} by {}: {}", wallpaper.id, wallpaper.title, wallpaper.author, wallpaper.url);
//!             }
//!         }
//!         SearchOutcome::NotFound(reason) => println!("Nothing found ({:?})", reason),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Statelessness
//!
//! Sessions, headers and delays are drawn per search. Nothing is cached
//! between calls, so concurrent searches never share cookies.

mod client;
mod error;
pub mod headers;
pub mod parser;
mod scraper;
mod session;
mod types;
pub mod unsplash;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, RateLimiter, WallhuntClient};

// Re-export error types
pub use error::{Result, WallhuntError};

// Re-export parser functions
pub use parser::{Selectors, parse_descriptor, parse_detail, parse_listing};

// Re-export main scraper API
pub use scraper::{SearchPlan, WallpaperScraper};

// Re-export data types
pub use session::Session;
pub use types::{
    ImageVariant, ListingCandidate, NotFoundReason, QUERY_REQUIRED, SearchOutcome, SearchRequest,
    Wallpaper,
};

// Re-export the alternative source
pub use unsplash::{UnsplashClient, UnsplashImage};

// Re-export URL helper functions for convenience
pub use url::{build_listing_url, resolve_link};
