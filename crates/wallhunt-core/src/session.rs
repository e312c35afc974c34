//! Per-search browsing session
//!
//! A session is built from one home page visit and reused by every
//! request of the same search. It is never stored anywhere else.

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Cookie and header state established by the home page visit
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// `name=value` pairs in the order the server set them
    pub cookies: Vec<String>,
    /// Fingerprint headers chosen for this search
    pub headers: HeaderMap,
}

impl Session {
    /// Builds a session from the bootstrap response headers
    ///
    /// Every `set-cookie` entry contributes its leading `name=value` pair.
    /// Entries without a `=` or with non-UTF-8 bytes are ignored. No
    /// cookies is a valid (empty) session.
    pub fn from_response(headers: HeaderMap, response_headers: &HeaderMap) -> Self {
        let cookies = response_headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(cookie_pair)
            .collect();

        Self { cookies, headers }
    }

    /// Value for the `Cookie` request header, `None` without cookies
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            None
        } else {
            Some(self.cookies.join("; "))
        }
    }
}

/// Extracts `name=value` from a `set-cookie` value
fn cookie_pair(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?.trim();
    let (name, _) = pair.split_once('=')?;
    if name.trim().is_empty() {
        return None;
    }
    Some(pair.to_string())
}
