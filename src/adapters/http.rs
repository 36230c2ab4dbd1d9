use crate::domain::model::{AccessToken, Faculty, FacultyPayload, LoginRequest, ScrapedData};
use crate::domain::ports::{ConfigProvider, DirectoryApi};
use crate::utils::error::{HubError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// reqwest-backed client for the faculty hub REST API.
///
/// When a token is held it is sent as `Authorization: Bearer <token>` on every
/// request, public endpoints included.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            client,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response> {
        let response = self.authorize(request).send().await?;
        tracing::debug!("📡 {} -> {}", resource, response.status());
        check_status(response, resource).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> Result<T> {
        let response = self.send(request, resource).await?;
        Ok(response.json::<T>().await?)
    }
}

/// 將非 2xx 回應轉成對應的錯誤
async fn check_status(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    tracing::warn!("⚠️ {} failed with {}: {}", resource, status, detail);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HubError::Unauthorized { detail },
        StatusCode::NOT_FOUND => HubError::NotFound {
            resource: resource.to_string(),
        },
        _ => HubError::Status {
            status: status.as_u16(),
            detail,
        },
    })
}

/// FastAPI 的錯誤格式為 `{"detail": ...}`；detail 可能是字串或驗證錯誤陣列
fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(obj)) => match obj.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(trimmed.to_string()),
        },
        _ => Some(trimmed.to_string()),
    }
}

#[async_trait]
impl DirectoryApi for ApiClient {
    async fn list_faculty(&self) -> Result<Vec<Faculty>> {
        let request = self.client.get(self.url("faculty"));
        let faculty: Vec<Faculty> = self.send_json(request, "Faculty list").await?;
        tracing::debug!("Fetched {} faculty records", faculty.len());
        Ok(faculty)
    }

    async fn get_faculty(&self, id: i64) -> Result<Faculty> {
        let request = self.client.get(self.url(&format!("faculty/{}", id)));
        self.send_json(request, &format!("Faculty {}", id)).await
    }

    async fn search_faculty(&self, query: &str) -> Result<Vec<Faculty>> {
        let request = self.client.get(self.url("search")).query(&[("q", query)]);
        let faculty: Vec<Faculty> = self.send_json(request, "Faculty search").await?;
        tracing::debug!("Search '{}' matched {} records", query, faculty.len());
        Ok(faculty)
    }

    async fn login(&self, password: &str) -> Result<AccessToken> {
        let request = self
            .client
            .post(self.url("admin/login"))
            .json(&LoginRequest {
                password: password.to_string(),
            });

        match self.send_json(request, "Admin login").await {
            Err(HubError::Unauthorized { .. }) => Err(HubError::InvalidPassword),
            other => other,
        }
    }

    async fn scrape_preview(
        &self,
        linkedin_url: Option<&str>,
        scholar_url: Option<&str>,
    ) -> Result<ScrapedData> {
        let params: Vec<(&str, &str)> = [("linkedin_url", linkedin_url), ("scholar_url", scholar_url)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();

        let request = self.client.post(self.url("admin/scrape")).query(&params);
        self.send_json(request, "Scrape preview").await
    }

    async fn create_faculty(&self, payload: &FacultyPayload) -> Result<Faculty> {
        let request = self.client.post(self.url("admin/faculty")).json(payload);
        self.send_json(request, "Faculty").await
    }

    async fn update_faculty(&self, id: i64, payload: &FacultyPayload) -> Result<Faculty> {
        let request = self
            .client
            .put(self.url(&format!("admin/faculty/{}", id)))
            .json(payload);
        self.send_json(request, &format!("Faculty {}", id)).await
    }

    async fn delete_faculty(&self, id: i64) -> Result<()> {
        let request = self.client.delete(self.url(&format!("admin/faculty/{}", id)));
        let response = self.send(request, &format!("Faculty {}", id)).await?;

        if let Ok(body) = response.json::<serde_json::Value>().await {
            if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
                tracing::debug!("{}", message);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        base_url: String,
    }

    impl ConfigProvider for MockConfig {
        fn api_base_url(&self) -> &str {
            &self.base_url
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }

        fn session_dir(&self) -> &str {
            "unused"
        }
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&MockConfig {
            base_url: server.url("/api/"),
        })
        .unwrap()
    }

    fn faculty_json(id: i64, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "title": "Professor",
            "department": "Computer Science",
            "experience": [],
            "certifications": [],
            "projects": [],
            "publications": []
        })
    }

    #[tokio::test]
    async fn test_list_faculty() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/faculty");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!([
                        faculty_json(1, "Dr. Ada Lovelace"),
                        faculty_json(2, "Dr. Alan Turing")
                    ]));
            })
            .await;

        let result = client_for(&server).list_faculty().await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].name, "Dr. Alan Turing");
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/search")
                    .query_param("q", "machine learning & AI");
                then.status(200).json_body(serde_json::json!([]));
            })
            .await;

        let result = client_for(&server)
            .search_faculty("machine learning & AI")
            .await
            .unwrap();

        api_mock.assert_async().await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_get_faculty_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/faculty/99");
                then.status(404)
                    .json_body(serde_json::json!({"detail": "Faculty not found"}));
            })
            .await;

        let err = client_for(&server).get_faculty(99).await.unwrap_err();

        assert!(matches!(err, HubError::NotFound { ref resource } if resource == "Faculty 99"));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/admin/login")
                    .json_body(serde_json::json!({"password": "nope"}));
                then.status(401)
                    .json_body(serde_json::json!({"detail": "Invalid password"}));
            })
            .await;

        let err = client_for(&server).login("nope").await.unwrap_err();

        assert!(matches!(err, HubError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_admin_requests_carry_bearer_token() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/api/admin/faculty/3")
                    .header("Authorization", "Bearer secret-token");
                then.status(200)
                    .json_body(serde_json::json!({"message": "Faculty deleted successfully"}));
            })
            .await;

        client_for(&server)
            .with_token("secret-token")
            .delete_faculty(3)
            .await
            .unwrap();

        api_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_scrape_sends_present_urls_as_query() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/admin/scrape")
                    .query_param("scholar_url", "https://scholar.google.com/citations?user=XYZ");
                then.status(200).json_body(serde_json::json!({
                    "profile_picture_url": null,
                    "headline": null,
                    "experience": [],
                    "certifications": [],
                    "projects": [],
                    "publications": [{"title": "Deep Nets", "authors": "X, Y", "year": "2020", "citation": null}]
                }));
            })
            .await;

        let scraped = client_for(&server)
            .with_token("t")
            .scrape_preview(None, Some("https://scholar.google.com/citations?user=XYZ"))
            .await
            .unwrap();

        api_mock.assert_async().await;
        assert_eq!(scraped.publications.len(), 1);
        assert_eq!(scraped.headline, None);
    }

    #[tokio::test]
    async fn test_validation_error_detail_is_kept() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/faculty");
                then.status(422).json_body(serde_json::json!({
                    "detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}]
                }));
            })
            .await;

        let payload = FacultyPayload {
            name: "Dr. X".to_string(),
            email: Some("broken".to_string()),
            ..Default::default()
        };
        let err = client_for(&server)
            .with_token("t")
            .create_faculty(&payload)
            .await
            .unwrap_err();

        match err {
            HubError::Status { status, detail } => {
                assert_eq!(status, 422);
                assert!(detail.contains("not a valid email"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreadable_success_body() {
        use crate::utils::error::ErrorCategory;

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/faculty");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let err = client_for(&server).list_faculty().await.unwrap_err();

        assert!(matches!(&err, HubError::HttpError(e) if e.is_decode()));
        assert_eq!(err.category(), ErrorCategory::Api);
        assert_eq!(
            err.user_friendly_message(),
            "The faculty hub API returned a response body that could not be read"
        );
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Faculty not found"}"#).as_deref(),
            Some("Faculty not found")
        );
        assert_eq!(extract_detail("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(extract_detail("   "), None);
    }
}
