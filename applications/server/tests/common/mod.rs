/// Common test utilities and fixtures
use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use stride_server::{create_router, AppState, ServerConfig, TrackerService};
use stride_storage::LocalStorageContext;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Storage backed by a real `SQLite` file that lives as long as the `TempDir`
pub async fn create_test_storage() -> Result<(Arc<LocalStorageContext>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let pool = stride_storage::connect(&db_url).await?;
    Ok((Arc::new(LocalStorageContext::new(pool)), temp_dir))
}

/// Test application with its storage handle
pub struct TestApp {
    pub router: Router,
    pub storage: Arc<LocalStorageContext>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn legacy() -> Self {
        let mut config = test_config();
        config.api.legacy_responses = true;
        Self::with_config(config).await
    }

    pub async fn with_config(config: ServerConfig) -> Self {
        let (storage, temp_dir) = create_test_storage()
            .await
            .expect("Failed to create test storage");
        let tracker = Arc::new(TrackerService::new(storage.clone()));
        let router = create_router(AppState::new(tracker), &config);

        Self {
            router,
            storage,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and collect status, content type and body text
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            content_type,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Create a user through the API and return its id
    pub async fn create_user(&self, username: &str) -> String {
        let response = self
            .post_json(
                "/api/exercise/new-user",
                serde_json::json!({ "username": username }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.json()["_id"].as_str().unwrap().to_string()
    }

    /// Log an exercise through the API
    pub async fn add_exercise(&self, user_id: &str, description: &str, duration: u32, date: &str) {
        let response = self
            .post_json(
                "/api/exercise/add",
                serde_json::json!({
                    "userId": user_id,
                    "description": description,
                    "duration": duration,
                    "date": date,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }

    pub fn is_plain_text(&self) -> bool {
        self.content_type.starts_with("text/plain")
    }
}

/// Configuration used by API tests: no static front-end
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.web.static_dir = None;
    config
}
