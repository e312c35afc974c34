//! HTTP client with randomized pacing for the target site
//!
//! Provides the three round-trips of a search (session bootstrap, listing
//! page, detail page) and the random delay inserted between the first two.
//! The client keeps no cookie jar: all session state travels in a
//! [`Session`] owned by the caller.

use std::time::Duration;

use rand::Rng;
use reqwest::header::HeaderMap;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::{Result, WallhuntError};
use crate::headers::same_origin;
use crate::parser::Selectors;
use crate::session::Session;
use crate::types::{ListingCandidate, SearchRequest};
use crate::url::{DEFAULT_BASE_URL, build_listing_url, site_root};

/// Configuration for the client and the search pipeline
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Target site root (default: https://www.freepik.com)
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Redirects followed per request (default: 5)
    pub max_redirects: usize,
    /// Lower bound of the pre-listing delay (default: 1s)
    pub min_delay: Duration,
    /// Upper bound of the pre-listing delay (default: 6s)
    pub max_delay: Duration,
    /// Candidates taken from one listing page (default: 12)
    pub max_candidates: usize,
    /// Detail requests in flight at once (default: 1)
    pub detail_concurrency: usize,
    /// Markup selectors for the target site
    pub selectors: Selectors,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_redirects: 5,
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(6),
            max_candidates: 12,
            detail_concurrency: 1,
            selectors: Selectors::default(),
        }
    }
}

impl ClientConfig {
    /// Same configuration with the pre-listing delay disabled
    pub fn without_delay(mut self) -> Self {
        self.min_delay = Duration::ZERO;
        self.max_delay = Duration::ZERO;
        self
    }

    /// Same configuration against another site root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Randomized pause between session bootstrap and the listing request
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_delay: Duration,
    max_delay: Duration,
}

impl RateLimiter {
    /// Create a limiter drawing delays from `min_delay..=max_delay`
    ///
    /// A maximum below the minimum is raised to the minimum.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
        }
    }

    /// Draw a delay uniformly from the configured range
    pub fn delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max_delay == self.min_delay {
            return self.min_delay;
        }
        rng.random_range(self.min_delay..=self.max_delay)
    }

    /// Suspend for `delay`
    pub async fn pause(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        debug!(?delay, "Pausing before listing request");
        sleep(delay).await;
    }

    /// Configured delay bounds
    pub fn range(&self) -> (Duration, Duration) {
        (self.min_delay, self.max_delay)
    }
}

/// HTTP client wrapper for the target site
///
/// Handles all HTTP communication of the scraping pipeline:
/// - Session bootstrap against the home page
/// - Listing and detail requests carrying the session cookies
/// - Status policy: 5xx is a failure, anything lower is data
pub struct WallhuntClient {
    client: reqwest::Client,
    base_url: String,
}

impl WallhuntClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(WallhuntError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Site root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Visit the home page and capture its cookies
    ///
    /// # Arguments
    /// * `headers` - Fingerprint headers chosen for this search
    ///
    /// # Errors
    /// - `Session` on transport failure or a 5xx response
    pub async fn bootstrap(&self, headers: HeaderMap) -> Result<Session> {
        let url = site_root(&self.base_url);
        info!(%url, "Bootstrapping session");

        let response = self
            .client
            .get(&url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(|e| WallhuntError::Session(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(WallhuntError::Session(format!("{} returned {}", url, status)));
        }

        let session = Session::from_response(headers, response.headers());
        debug!(cookies = session.cookies.len(), %status, "Session established");
        Ok(session)
    }

    /// Fetch the listing page for a search
    ///
    /// # Returns
    /// The listing URL (used as referer for detail requests) and the body
    ///
    /// # Errors
    /// - `ListingFetch` on transport failure or a 5xx response
    pub async fn fetch_listing(
        &self,
        session: &Session,
        request: &SearchRequest,
    ) -> Result<(String, String)> {
        let url = build_listing_url(&self.base_url, request.query(), request.page());
        let headers = same_origin(
            &session.headers,
            &site_root(&self.base_url),
            session.cookie_header().as_deref(),
        );
        info!(%url, "Fetching listing");

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| WallhuntError::ListingFetch(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(WallhuntError::ListingFetch(format!(
                "{} returned {}",
                url, status
            )));
        }
        if !status.is_success() {
            debug!(%status, "Listing returned non-success status, parsing body anyway");
        }

        let body = response
            .text()
            .await
            .map_err(|e| WallhuntError::ListingFetch(e.to_string()))?;

        Ok((url, body))
    }

    /// Fetch one candidate's detail page
    ///
    /// # Errors
    /// - `DetailFetch` on transport failure or any non-2xx response
    pub async fn fetch_detail(
        &self,
        session: &Session,
        listing_url: &str,
        candidate: &ListingCandidate,
    ) -> Result<String> {
        let headers = same_origin(
            &session.headers,
            listing_url,
            session.cookie_header().as_deref(),
        );
        let fail = |reason: String| WallhuntError::DetailFetch {
            index: candidate.index,
            reason,
        };

        let response = self
            .client
            .get(&candidate.detail_url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("{} returned {}", candidate.detail_url, status)));
        }

        response.text().await.map_err(|e| fail(e.to_string()))
    }
}
