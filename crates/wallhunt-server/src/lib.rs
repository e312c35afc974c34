//! HTTP API for the wallhunt wallpaper scraper.
//!
//! Routes:
//! - `GET /wallpapers?query=&page=` scraped search
//! - `GET /images?query=&per_page=&page=` Unsplash search
//! - `GET /download?url=` byte proxy
//! - `POST /set-wallpaper` apply an image as the desktop wallpaper

mod handlers;
mod routes;
pub mod setter;
pub mod settings;

pub use handlers::ErrorBody;
pub use routes::create_router;
pub use settings::Settings;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use wallhunt_core::{UnsplashClient, WallpaperScraper};

use setter::{OsWallpaperSetter, WallpaperSetter};

/// Shared state for the API server.
#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<WallpaperScraper>,
    /// Present only when an access key is configured.
    pub unsplash: Option<Arc<UnsplashClient>>,
    /// Plain client for the download proxy and wallpaper fetches.
    pub http: reqwest::Client,
    pub setter: Arc<dyn WallpaperSetter>,
    pub search_deadline: Option<Duration>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let scraper = WallpaperScraper::with_config(settings.client_config())?;
        let unsplash = settings
            .unsplash_key()
            .map(|key| Arc::new(UnsplashClient::new(key)));
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            scraper: Arc::new(scraper),
            unsplash,
            http,
            setter: Arc::new(OsWallpaperSetter),
            search_deadline: settings.search_deadline(),
        })
    }
}

/// Start the API server.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;
    use wallhunt_core::ClientConfig;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::setter::SetterError;

    #[derive(Default)]
    struct FakeSetter {
        applied: Mutex<Vec<Vec<u8>>>,
        fail: bool,
    }

    impl WallpaperSetter for FakeSetter {
        fn set(&self, path: &Path) -> Result<(), SetterError> {
            if self.fail {
                return Err(SetterError::InvalidPath(PathBuf::from(path)));
            }
            self.applied.lock().unwrap().push(std::fs::read(path)?);
            Ok(())
        }
    }

    fn state_for(site: &str, setter: Arc<dyn WallpaperSetter>) -> AppState {
        let config = ClientConfig::default().without_delay().with_base_url(site);
        AppState {
            scraper: Arc::new(WallpaperScraper::with_config(config).unwrap()),
            unsplash: None,
            http: reqwest::Client::new(),
            setter,
            search_deadline: None,
        }
    }

    fn test_app(site: &str) -> axum::Router {
        create_router(state_for(site, Arc::new(FakeSetter::default())))
    }

    async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn mount_site(server: &MockServer, listing: &str) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "sid=1; Path=/"))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex("^/free-photos-vectors/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing.to_string()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_wallpapers_requires_query() {
        let server = MockServer::start().await;
        let app = test_app(&server.uri());

        let response = get(app, "/wallpapers?query=%20%20").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Query parameter is required");

        // Validation happens before any upstream request
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wallpapers_rejects_bad_page() {
        let server = MockServer::start().await;
        let app = test_app(&server.uri());

        let response = get(app, "/wallpapers?query=sea&page=two").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Page must be a positive integer");
    }

    #[tokio::test]
    async fn test_wallpapers_not_found() {
        let server = MockServer::start().await;
        mount_site(&server, "<html><body><p>No results</p></body></html>").await;
        let app = test_app(&server.uri());

        let response = get(app, "/wallpapers?query=nothing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No wallpapers found for this search term");
    }

    #[tokio::test]
    async fn test_wallpapers_found() {
        let server = MockServer::start().await;
        mount_site(
            &server,
            r#"<figure data-cy="resource-thumbnail">
                <a href="/free-photo/dune_1.htm"><img alt="Dune"></a>
                <span class="showcase__author">Mira</span>
            </figure>"#,
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/free-photo/dune_1.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div data-cy="resource-detail-preview">
                    <img srcset="https://img.test/s.jpg 640w, https://img.test/l.jpg 2000w">
                </div>"#,
            ))
            .mount(&server)
            .await;
        let app = test_app(&server.uri());

        let response = get(app, "/wallpapers?query=dunes&page=0").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["url"], "https://img.test/l.jpg");
        assert_eq!(json[0]["title"], "Dune");
        assert_eq!(json[0]["author"], "Mira");
        assert_eq!(
            json[0]["detailUrl"],
            format!("{}/free-photo/dune_1.htm", server.uri())
        );
    }

    #[tokio::test]
    async fn test_wallpapers_upstream_failure_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("secret upstream detail"))
            .mount(&server)
            .await;
        let app = test_app(&server.uri());

        let response = get(app, "/wallpapers?query=sea").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(
            json["error"],
            "Failed to fetch wallpapers. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_images_without_key() {
        let app = test_app("http://127.0.0.1:1");

        let response = get(app, "/images?query=space").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing Unsplash Access Key");
    }

    #[tokio::test]
    async fn test_images_with_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/photos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{ "id": "u1", "urls": { "regular": "https://img.test/u1.jpg" } }]
            })))
            .mount(&server)
            .await;

        let mut state = state_for("http://127.0.0.1:1", Arc::new(FakeSetter::default()));
        state.unsplash = Some(Arc::new(UnsplashClient::with_base_url(server.uri(), "k")));

        let response = get(create_router(state), "/images").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json[0]["id"], "u1");
        assert_eq!(json[0]["title"], "Untitled");
        assert_eq!(json[0]["author"], "Unknown");
    }

    #[tokio::test]
    async fn test_download_requires_url() {
        let app = test_app("http://127.0.0.1:1");

        let response = get(app, "/download").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Image URL is required");
    }

    #[tokio::test]
    async fn test_download_streams_with_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pic.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(b"png-bytes".to_vec()),
            )
            .mount(&server)
            .await;
        let app = test_app(&server.uri());

        let uri = format!("/download?url={}/pic.png", server.uri());
        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"wallpaper.jpg\""
        );
        assert_eq!(body_text(response).await, "png-bytes");
    }

    #[tokio::test]
    async fn test_download_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let app = test_app(&server.uri());

        let uri = format!("/download?url={}/missing.jpg", server.uri());
        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Error downloading image");
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_set_wallpaper_requires_url() {
        let app = test_app("http://127.0.0.1:1");

        let response = app
            .oneshot(post_json("/set-wallpaper", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "URL is required");
    }

    #[tokio::test]
    async fn test_set_wallpaper_applies_download() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
            .mount(&server)
            .await;

        let setter = Arc::new(FakeSetter::default());
        let app = create_router(state_for(&server.uri(), setter.clone()));

        let response = app
            .oneshot(post_json(
                "/set-wallpaper",
                serde_json::json!({ "url": format!("{}/w.jpg", server.uri()) }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(setter.applied.lock().unwrap().as_slice(), &[b"jpeg".to_vec()]);
    }

    #[tokio::test]
    async fn test_set_wallpaper_reports_setter_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
            .mount(&server)
            .await;

        let setter = Arc::new(FakeSetter {
            fail: true,
            ..FakeSetter::default()
        });
        let app = create_router(state_for(&server.uri(), setter));

        let response = app
            .oneshot(post_json(
                "/set-wallpaper",
                serde_json::json!({ "url": format!("{}/w.jpg", server.uri()) }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("Invalid wallpaper path"));
    }
}
