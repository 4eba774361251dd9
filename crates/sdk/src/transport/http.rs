//! HTTP transport layer for the Todoist SDK.

use crate::config::ClientConfig;
use crate::error::{TodoistError, TodoistResult};
use chrono::Utc;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use todoist_core::RateWindow;
use tracing::{debug, error, warn};

/// HTTP transport for making API requests.
///
/// Every request is checked against the local rate window before it is sent
/// and counted once it completes, whatever the outcome. Clones share the
/// same window.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
    window: Arc<Mutex<RateWindow>>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> TodoistResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| TodoistError::Config("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TodoistError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let window = RateWindow::with_limits(config.rate_limits, Utc::now());

        Ok(Self {
            client,
            config,
            window: Arc::new(Mutex::new(window)),
        })
    }

    /// Snapshot of the current rate window.
    pub fn rate_window(&self) -> RateWindow {
        self.lock_window().clone()
    }

    fn lock_window(&self) -> MutexGuard<'_, RateWindow> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Build a URL for the given path, relative to the base URL.
    fn build_url(&self, path: &str) -> TodoistResult<url::Url> {
        self.config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(TodoistError::unknown)
    }

    fn check_budget(&self) -> TodoistResult<()> {
        self.lock_window().check(Utc::now()).map_err(|exhausted| {
            warn!(reset_at = %exhausted.reset_at, "Local rate limit reached, request not sent");
            exhausted.into()
        })
    }

    fn record_completion(&self) {
        self.lock_window().record();
    }

    /// Check the budget, send the request, count it, and normalize failures.
    ///
    /// The check and the count are taken under separate locks, so requests
    /// racing between the two can overshoot the limit.
    async fn execute(&self, request: RequestBuilder) -> TodoistResult<Response> {
        self.check_budget()?;

        let outcome = request.send().await;
        self.record_completion();

        match outcome {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => Err(Self::normalize_failure(response).await),
            Err(e) => {
                let err = TodoistError::from_transport(e);
                error!(status = ?err.status(), "Todoist API error: {}", err);
                Err(err)
            }
        }
    }

    async fn normalize_failure(response: Response) -> TodoistError {
        let status = response.status();
        let fallback = match response.error_for_status_ref() {
            Err(e) => e.to_string(),
            Ok(_) => format!("Request failed with status code {}", status.as_u16()),
        };
        let body = response.text().await.unwrap_or_default();

        let err = TodoistError::from_response(status.as_u16(), &body, fallback);
        error!(status = status.as_u16(), "Todoist API error: {}", err);
        err
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> TodoistResult<T> {
        response.json().await.map_err(TodoistError::from_transport)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> TodoistResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let response = self.execute(self.client.get(url)).await?;
        Self::decode(response).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> TodoistResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        let response = self.execute(self.client.get(url).query(query)).await?;
        Self::decode(response).await
    }

    /// Execute a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> TodoistResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self.execute(self.client.post(url).json(body)).await?;
        Self::decode(response).await
    }

    /// Execute a POST request, ignoring the response body.
    pub async fn post_no_response<B: Serialize>(&self, path: &str, body: &B) -> TodoistResult<()> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request (no response)");

        self.execute(self.client.post(url).json(body)).await?;
        Ok(())
    }

    /// Execute a POST request without a body, ignoring the response body.
    pub async fn post_empty(&self, path: &str) -> TodoistResult<()> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request (empty)");

        self.execute(self.client.post(url)).await?;
        Ok(())
    }

    /// Execute a DELETE request without a response body.
    pub async fn delete_no_response(&self, path: &str) -> TodoistResult<()> {
        let url = self.build_url(path)?;
        debug!(url = %url, "DELETE request (no response)");

        self.execute(self.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::Duration as ChronoDuration;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use todoist_core::RateLimits;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
        value: i32,
    }

    #[derive(Debug, Serialize)]
    struct TestRequest {
        name: String,
    }

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig::new(
            url::Url::parse(base_url).unwrap(),
            "test-key",
        ))
    }

    fn create_config_with_limit(base_url: &str, max_requests: u32) -> Arc<ClientConfig> {
        let mut config = ClientConfig::new(url::Url::parse(base_url).unwrap(), "test-key");
        config.rate_limits = RateLimits {
            max_requests,
            window: ChronoDuration::minutes(15),
        };
        Arc::new(config)
    }

    fn ok_body() -> TestResponse {
        TestResponse {
            message: "success".to_string(),
            value: 42,
        }
    }

    #[tokio::test]
    async fn test_get_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport.get("/projects").await.unwrap();
        assert_eq!(result, ok_body());
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tasks"))
            .and(query_param("project_id", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let query = vec![("project_id", "7".to_string())];
        let result: TestResponse = transport.get_with_query("/tasks", &query).await.unwrap();
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_post_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/labels"))
            .and(body_json(serde_json::json!({"name": "test"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "created".to_string(),
                value: 1,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let request = TestRequest {
            name: "test".to_string(),
        };
        let result: TestResponse = transport.post("/labels", &request).await.unwrap();
        assert_eq!(result.message, "created");
    }

    #[tokio::test]
    async fn test_post_no_response_ignores_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/labels/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let request = TestRequest {
            name: "renamed".to_string(),
        };
        transport.post_no_response("/labels/3", &request).await.unwrap();
    }

    #[tokio::test]
    async fn test_authorization_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport.get("/projects").await.unwrap();
        assert_eq!(result.message, "success");
    }

    #[tokio::test]
    async fn test_error_on_400() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tasks/1"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "Bad Request"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TodoistResult<TestResponse> = transport.get("/tasks/1").await;
        match result {
            Err(TodoistError::Api {
                status, message, ..
            }) => {
                assert_eq!(status, Some(400));
                assert_eq!(message, "Bad Request");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[tokio::test]
    async fn test_error_without_body_uses_transport_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tasks/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TodoistResult<TestResponse> = transport.get("/tasks/404").await;
        match result {
            Err(TodoistError::Api {
                status,
                message,
                body,
            }) => {
                assert_eq!(status, Some(404));
                assert!(message.contains("404"), "unexpected message: {}", message);
                assert!(body.is_none());
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[tokio::test]
    async fn test_remote_429_is_rate_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        // Plenty of local budget left
        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = transport.get::<TestResponse>("/projects").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[tokio::test]
    async fn test_exhausted_budget_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(2)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config_with_limit(&server.uri(), 2)).unwrap();

        transport.get::<TestResponse>("/projects").await.unwrap();
        transport.get::<TestResponse>("/projects").await.unwrap();

        let err = transport.get::<TestResponse>("/projects").await.unwrap_err();
        match err {
            TodoistError::RateLimited { message, reset_at } => {
                let window = transport.rate_window();
                assert_eq!(reset_at, window.window_start + ChronoDuration::minutes(15));
                assert!(message.starts_with("Rate limit exceeded. Resets at "));
            }
            _ => panic!("Expected RateLimited error"),
        }

        // The refused request is not counted
        assert_eq!(transport.rate_window().requests_in_window, 2);
    }

    #[tokio::test]
    async fn test_failures_are_counted() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/tasks/9"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        assert!(transport.delete_no_response("/tasks/9").await.is_err());
        assert!(transport.delete_no_response("/tasks/9").await.is_err());
        assert_eq!(transport.rate_window().requests_in_window, 2);
    }

    #[tokio::test]
    async fn test_clones_share_window() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tasks/1/close"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();
        let clone = transport.clone();

        clone.post_empty("/tasks/1/close").await.unwrap();
        assert_eq!(transport.rate_window().requests_in_window, 1);
    }

    #[tokio::test]
    async fn test_timeout_has_no_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/labels"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(ok_body())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let mut config = ClientConfig::new(url::Url::parse(&server.uri()).unwrap(), "test-key");
        config.timeout = Duration::from_millis(50);
        let transport = HttpTransport::new(Arc::new(config)).unwrap();

        let err = transport.get::<TestResponse>("/labels").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.status(), None);
        assert_eq!(transport.rate_window().requests_in_window, 1);
    }

    #[tokio::test]
    async fn test_build_url_keeps_version_prefix() {
        let config = create_config("https://api.todoist.com/api/v1");
        let transport = HttpTransport::new(config).unwrap();

        let url = transport.build_url("/projects/42").unwrap();
        assert_eq!(url.as_str(), "https://api.todoist.com/api/v1/projects/42");
    }

    #[tokio::test]
    async fn test_build_url_with_trailing_slash() {
        let config = create_config("http://localhost:8080/");
        let transport = HttpTransport::new(config).unwrap();

        let url = transport.build_url("tasks").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/tasks");
    }

    #[test]
    fn test_invalid_api_key() {
        let config = create_config("http://localhost:8080");
        let mut config = (*config).clone();
        config.api_key = "bad\nkey".to_string();

        let err = HttpTransport::new(Arc::new(config)).unwrap_err();
        assert!(matches!(err, TodoistError::Config(_)));
    }
}
