//! Download an image and apply it as the desktop wallpaper.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::error_response;
use crate::AppState;
use crate::setter::apply_image;

pub const URL_REQUIRED: &str = "URL is required";

#[derive(Debug, Deserialize)]
pub struct SetWallpaperBody {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SetWallpaperResponse {
    pub success: bool,
}

/// `POST /set-wallpaper` with `{"url": "..."}`
pub async fn set_wallpaper(
    State(state): State<AppState>,
    payload: Option<Json<SetWallpaperBody>>,
) -> Response {
    let Some(url) = payload
        .and_then(|Json(body)| body.url)
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
    else {
        return error_response(StatusCode::BAD_REQUEST, URL_REQUIRED);
    };

    match fetch_and_apply(&state, &url).await {
        Ok(()) => {
            info!(url, "Wallpaper set");
            Json(SetWallpaperResponse { success: true }).into_response()
        }
        Err(message) => {
            error!(url, error = %message, "Setting wallpaper failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &message)
        }
    }
}

async fn fetch_and_apply(state: &AppState, url: &str) -> Result<(), String> {
    let response = state
        .http
        .get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to download image: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("Failed to download image: HTTP {}", status.as_u16()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Failed to download image: {}", e))?;

    let setter = state.setter.clone();
    tokio::task::spawn_blocking(move || apply_image(setter.as_ref(), &bytes))
        .await
        .map_err(|e| format!("Wallpaper task failed: {}", e))?
        .map_err(|e| e.to_string())
}
