//! Byte-proxying download endpoint.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;

pub const URL_REQUIRED: &str = "Image URL is required";
pub const DOWNLOAD_FAILED: &str = "Error downloading image";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const ATTACHMENT: &str = "attachment; filename=\"wallpaper.jpg\"";

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub url: Option<String>,
}

/// `GET /download?url=`
///
/// Streams the upstream body back as an attachment, keeping its content type.
pub async fn download_image(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Response {
    let Some(url) = params
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
    else {
        return (StatusCode::BAD_REQUEST, URL_REQUIRED).into_response();
    };

    info!(url, "Proxying download");

    let upstream = match state.http.get(url).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            error!(url, status = response.status().as_u16(), "Download rejected upstream");
            return (StatusCode::INTERNAL_SERVER_ERROR, DOWNLOAD_FAILED).into_response();
        }
        Err(e) => {
            error!(url, error = %e, "Download failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, DOWNLOAD_FAILED).into_response();
        }
    };

    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, ATTACHMENT.to_string()),
        ],
        Body::from_stream(upstream.bytes_stream()),
    )
        .into_response()
}
