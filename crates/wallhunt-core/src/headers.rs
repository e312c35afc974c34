//! Browser-like request headers
//!
//! Header selection is a pure function of the random source it is given,
//! so every search picks its own fingerprint and tests can seed it.

use rand::Rng;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, COOKIE, DNT, HeaderMap, HeaderValue, PRAGMA,
    REFERER, UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};

/// Desktop browser user agents rotated per search
pub const USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    // Chrome on Mac
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:123.0) Gecko/20100101 Firefox/123.0",
];

const SEARCH_ENGINE_REFERER: &str = "https://www.google.com/";

const SEC_FETCH_DEST: &str = "sec-fetch-dest";
const SEC_FETCH_MODE: &str = "sec-fetch-mode";
const SEC_FETCH_SITE: &str = "sec-fetch-site";
const SEC_FETCH_USER: &str = "sec-fetch-user";

/// Picks a browser fingerprint for one search
///
/// The result describes a top-level navigation arriving from a search
/// engine. Follow-up requests derive from it with [`same_origin`].
pub fn choose_headers<R: Rng + ?Sized>(rng: &mut R) -> HeaderMap {
    let user_agent = USER_AGENTS[rng.random_range(0..USER_AGENTS.len())];

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(user_agent));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(SEC_FETCH_DEST, HeaderValue::from_static("document"));
    headers.insert(SEC_FETCH_MODE, HeaderValue::from_static("navigate"));
    headers.insert(SEC_FETCH_SITE, HeaderValue::from_static("none"));
    headers.insert(SEC_FETCH_USER, HeaderValue::from_static("?1"));
    headers.insert(REFERER, HeaderValue::from_static(SEARCH_ENGINE_REFERER));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers
}

/// Derives headers for an in-site request
///
/// Replaces the referer, marks the fetch as same-origin and attaches the
/// session cookie header when there is one. Values that are not valid
/// header text are left out.
pub fn same_origin(base: &HeaderMap, referer: &str, cookie: Option<&str>) -> HeaderMap {
    let mut headers = base.clone();
    headers.insert(SEC_FETCH_SITE, HeaderValue::from_static("same-origin"));

    match HeaderValue::from_str(referer) {
        Ok(value) => {
            headers.insert(REFERER, value);
        }
        Err(_) => {
            headers.remove(REFERER);
        }
    }

    if let Some(cookie) = cookie
        && let Ok(value) = HeaderValue::from_str(cookie)
    {
        headers.insert(COOKIE, value);
    }

    headers
}
