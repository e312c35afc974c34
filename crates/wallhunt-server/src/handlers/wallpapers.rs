//! Scraped wallpaper search.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{error, info};
use wallhunt_core::{QUERY_REQUIRED, SearchOutcome, SearchRequest};

use super::error_response;
use crate::AppState;

pub const NO_WALLPAPERS: &str = "No wallpapers found for this search term";
pub const FETCH_FAILED: &str = "Failed to fetch wallpapers. Please try again later.";
pub const INVALID_PAGE: &str = "Page must be a positive integer";

/// Query params for wallpaper search.
#[derive(Debug, Deserialize)]
pub struct WallpaperParams {
    pub query: Option<String>,
    pub page: Option<String>,
}

/// Parse the `page` param; missing or blank means 1, zero is raised to 1.
fn parse_page(raw: Option<&str>) -> Option<u32> {
    match raw.map(str::trim) {
        None | Some("") => Some(1),
        Some(value) => value.parse::<u32>().ok().map(|p| p.max(1)),
    }
}

/// `GET /wallpapers?query=&page=`
pub async fn search_wallpapers(
    State(state): State<AppState>,
    Query(params): Query<WallpaperParams>,
) -> Response {
    let query = params.query.unwrap_or_default();
    if query.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, QUERY_REQUIRED);
    }
    let Some(page) = parse_page(params.page.as_deref()) else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_PAGE);
    };
    let request = match SearchRequest::new(&query, page) {
        Ok(request) => request,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    info!(query = request.query(), page, "Wallpaper search");

    let result = match state.search_deadline {
        Some(budget) => {
            state
                .scraper
                .search_until(&request, Instant::now() + budget)
                .await
        }
        None => state.scraper.search(&request).await,
    };

    match result {
        Ok(SearchOutcome::Found(wallpapers)) => Json(wallpapers).into_response(),
        Ok(SearchOutcome::NotFound(reason)) => {
            info!(?reason, "No wallpapers found");
            error_response(StatusCode::NOT_FOUND, NO_WALLPAPERS)
        }
        Err(e) if !e.is_hard_failure() => {
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Wallpaper search failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
        }
    }
}
