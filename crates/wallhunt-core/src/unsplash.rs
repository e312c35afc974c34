//! Unsplash API client
//!
//! A stable JSON search API used as an alternative image source. It is
//! independent of the scraping pipeline and shares only the record
//! conventions (`"Untitled"` and `"Unknown"` fallbacks).

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, WallhuntError};
use crate::parser::{DEFAULT_AUTHOR, DEFAULT_TITLE};

/// Default Unsplash API root
pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

/// Query used when the caller gives none
pub const DEFAULT_QUERY: &str = "space";

/// Page size used when the caller gives none
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Image record returned by the alternative source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsplashImage {
    pub id: String,
    pub url: String,
    pub title: String,
    pub author: String,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    results: Vec<Photo>,
}

#[derive(Deserialize, Debug)]
struct Photo {
    id: String,
    urls: PhotoUrls,
    description: Option<String>,
    alt_description: Option<String>,
    user: Option<PhotoUser>,
}

#[derive(Deserialize, Debug)]
struct PhotoUrls {
    regular: String,
}

#[derive(Deserialize, Debug)]
struct PhotoUser {
    name: Option<String>,
}

impl From<Photo> for UnsplashImage {
    fn from(photo: Photo) -> Self {
        let title = [photo.description, photo.alt_description]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let author = photo
            .user
            .and_then(|u| u.name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        Self {
            id: photo.id,
            url: photo.urls.regular,
            title,
            author,
        }
    }
}

/// Unsplash search client
///
/// The access key travels as `Authorization: Client-ID <key>`.
pub struct UnsplashClient {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl UnsplashClient {
    /// Create a client against the public API
    pub fn new(access_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_API_URL, access_key)
    }

    /// Create a client against another API root
    pub fn with_base_url(base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
        }
    }

    /// Search photos
    ///
    /// # Errors
    /// - `Http` on transport failure
    /// - `UpstreamStatus` on a non-2xx response
    /// - `Unsplash` if the body is not the expected JSON
    pub async fn search(&self, query: &str, per_page: u32, page: u32) -> Result<Vec<UnsplashImage>> {
        let url = format!("{}/search/photos", self.base_url);
        info!(query, per_page, page, "Searching Unsplash");

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Client-ID {}", self.access_key),
            )
            .query(&[
                ("query", query.to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WallhuntError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| WallhuntError::Unsplash(e.to_string()))?;

        Ok(body.results.into_iter().map(UnsplashImage::from).collect())
    }
}
