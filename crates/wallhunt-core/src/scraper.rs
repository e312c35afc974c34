//! Main scraper API for wallpaper search
//!
//! Provides the high-level pipeline combining the HTTP client and parsers:
//! session bootstrap, randomized delay, listing fetch and parse, then one
//! detail round-trip per candidate.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::StreamExt;
use futures::stream;
use rand::Rng;
use reqwest::header::HeaderMap;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use crate::client::{ClientConfig, RateLimiter, WallhuntClient};
use crate::error::{Result, WallhuntError};
use crate::headers::choose_headers;
use crate::parser::{parse_detail, parse_listing};
use crate::session::Session;
use crate::types::{ListingCandidate, NotFoundReason, SearchOutcome, SearchRequest, Wallpaper};

/// Per-search random choices, drawn before any request is made
#[derive(Debug, Clone)]
pub struct SearchPlan {
    /// Fingerprint headers for every request of the search
    pub headers: HeaderMap,
    /// Pause between session bootstrap and listing request
    pub delay: Duration,
}

/// Main scraper API
///
/// Holds only immutable configuration and a connection pool; every call
/// to [`search`](Self::search) builds and discards its own session.
pub struct WallpaperScraper {
    client: WallhuntClient,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl WallpaperScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new scraper with custom configuration
    ///
    /// A zero candidate cap or zero concurrency is raised to 1.
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(mut config: ClientConfig) -> Result<Self> {
        config.max_candidates = config.max_candidates.max(1);
        config.detail_concurrency = config.detail_concurrency.max(1);

        let client = WallhuntClient::with_config(&config)?;
        let rate_limiter = RateLimiter::new(config.min_delay, config.max_delay);

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    /// Effective configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Draw the random choices for one search
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> SearchPlan {
        SearchPlan {
            headers: choose_headers(rng),
            delay: self.rate_limiter.delay(rng),
        }
    }

    /// Search for wallpapers
    ///
    /// # Returns
    /// `Found` with at least one wallpaper, or `NotFound` when the listing
    /// is empty or no candidate resolved to an image
    ///
    /// # Errors
    /// - `Session` if the home page bootstrap fails
    /// - `ListingFetch` if the listing page cannot be fetched
    /// - `Parse` if a configured selector is invalid
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> wallhunt_core::Result<()> {
    /// use wallhunt_core::{SearchOutcome, SearchRequest, WallpaperScraper};
    /// let scraper = WallpaperScraper::new()?;
    /// let request = SearchRequest::new("northern lights", 1)?;
    /// if let SearchOutcome::Found(wallpapers) = scraper.search(&request).await? {
    ///     for wallpaper in wallpapers {
    ///         println!("{}: {}", wallpaper.title, wallpaper.url);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let plan = self.plan(&mut rand::rng());
        self.execute(request, plan, None).await
    }

    /// Search, giving up on remaining detail pages at `deadline`
    ///
    /// Wallpapers assembled before the deadline are returned as a normal
    /// result. A deadline that passes before the listing arrives is a
    /// `ListingFetch` error.
    pub async fn search_until(
        &self,
        request: &SearchRequest,
        deadline: Instant,
    ) -> Result<SearchOutcome> {
        let plan = self.plan(&mut rand::rng());
        self.execute(request, plan, Some(deadline)).await
    }

    /// Run the pipeline with pre-drawn random choices
    pub async fn execute(
        &self,
        request: &SearchRequest,
        plan: SearchPlan,
        deadline: Option<Instant>,
    ) -> Result<SearchOutcome> {
        let SearchPlan { headers, delay } = plan;

        let listing = within(deadline, async {
            let session = self.client.bootstrap(headers).await?;
            self.rate_limiter.pause(delay).await;
            let (listing_url, body) = self.client.fetch_listing(&session, request).await?;
            Ok::<_, WallhuntError>((session, listing_url, body))
        })
        .await
        .ok_or_else(|| {
            WallhuntError::ListingFetch("Deadline elapsed before listing response".to_string())
        })?;
        let (session, listing_url, body) = listing?;

        let candidates = parse_listing(
            &body,
            self.client.base_url(),
            &self.config.selectors,
            self.config.max_candidates,
        )?;
        info!(count = candidates.len(), "Listing parsed");

        if candidates.is_empty() {
            return Ok(SearchOutcome::NotFound(NotFoundReason::EmptyListing));
        }

        let wallpapers = self
            .resolve_candidates(&session, &listing_url, candidates, deadline)
            .await;
        info!(count = wallpapers.len(), "Wallpapers assembled");

        if wallpapers.is_empty() {
            Ok(SearchOutcome::NotFound(NotFoundReason::ZeroAssembled))
        } else {
            Ok(SearchOutcome::Found(wallpapers))
        }
    }

    /// Resolve candidates in listing order, dropping the ones that fail
    async fn resolve_candidates(
        &self,
        session: &Session,
        listing_url: &str,
        candidates: Vec<ListingCandidate>,
        deadline: Option<Instant>,
    ) -> Vec<Wallpaper> {
        let total = candidates.len();
        let mut resolved = pin!(
            stream::iter(candidates)
                .map(|candidate| async move {
                    let index = candidate.index;
                    (index, self.resolve_candidate(session, listing_url, candidate).await)
                })
                .buffered(self.config.detail_concurrency)
        );

        let mut wallpapers = Vec::with_capacity(total);

        loop {
            let Some(next) = within(deadline, resolved.next()).await else {
                warn!(
                    assembled = wallpapers.len(),
                    total, "Deadline elapsed, returning partial results"
                );
                break;
            };
            let Some((index, result)) = next else {
                break;
            };

            match result {
                Ok(Some(wallpaper)) => wallpapers.push(wallpaper),
                Ok(None) => debug!(index, "Candidate has no resolvable image"),
                Err(e) => warn!(index, error = %e, "Dropping candidate"),
            }
        }

        wallpapers
    }

    /// Fetch and parse one detail page
    async fn resolve_candidate(
        &self,
        session: &Session,
        listing_url: &str,
        candidate: ListingCandidate,
    ) -> Result<Option<Wallpaper>> {
        let html = self
            .client
            .fetch_detail(session, listing_url, &candidate)
            .await?;

        Ok(parse_detail(&html, &self.config.selectors)?.map(|url| assemble(candidate, url)))
    }
}

/// Build the final record; the id is the candidate's listing position
fn assemble(candidate: ListingCandidate, url: String) -> Wallpaper {
    Wallpaper {
        id: candidate.index,
        url,
        title: candidate.title,
        author: candidate.author,
        detail_url: candidate.detail_url,
    }
}

/// Await `future`, or `None` once `deadline` passes
async fn within<F: Future>(deadline: Option<Instant>, future: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => timeout_at(deadline, future).await.ok(),
        None => Some(future.await),
    }
}
