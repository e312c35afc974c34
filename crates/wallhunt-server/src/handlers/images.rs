//! Unsplash-backed image search.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::error;
use wallhunt_core::unsplash::{DEFAULT_PER_PAGE, DEFAULT_QUERY};

use super::error_response;
use crate::AppState;

pub const MISSING_KEY: &str = "Missing Unsplash Access Key";
pub const FETCH_FAILED: &str = "Failed to fetch images";

#[derive(Debug, Deserialize)]
pub struct ImageParams {
    pub query: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

/// `GET /images?query=&per_page=&page=`
pub async fn search_images(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Response {
    let Some(client) = state.unsplash.as_ref() else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY);
    };

    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or(DEFAULT_QUERY);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
    let page = params.page.unwrap_or(1).max(1);

    match client.search(query, per_page, page).await {
        Ok(images) => Json(images).into_response(),
        Err(e) => {
            error!(error = %e, "Unsplash search failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
        }
    }
}
