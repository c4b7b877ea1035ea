//! Reqwest-based transport for the monday.com GraphQL API.

use std::sync::Arc;
use std::time::Instant;

use monday_core::{ApiKey, GraphqlRequest, MondayTransport};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::{Error, ReqwestConfig, Result};

/// Tracing target for HTTP calls.
pub const TRACING_TARGET: &str = "monday_reqwest::client";

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP transport.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Examples
///
/// ```rust,ignore
/// use monday_core::{ApiKey, MondayClient};
/// use monday_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let transport = ReqwestClient::new(ReqwestConfig::default())?;
/// let client = MondayClient::new(transport, ApiKey::new(token)?);
/// let account = client.verify_credentials().await?;
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest transport with the given configuration.
    pub fn new(config: ReqwestConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            api_url = %config.api_url,
            timeout_ms = timeout.as_millis(),
            "Creating reqwest client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()?;

        let inner = ReqwestClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Serializes the request body, rendering variables inline when configured.
    fn request_body(&self, request: &GraphqlRequest) -> monday_core::Result<Vec<u8>> {
        let body = if self.config().inline_variables {
            let literal = GraphqlRequest::new(request.render_literal()?);
            serde_json::to_vec(&literal)
        } else {
            serde_json::to_vec(request)
        };

        Ok(body.map_err(Error::from)?)
    }
}

#[async_trait::async_trait]
impl MondayTransport for ReqwestClient {
    async fn execute(
        &self,
        api_key: &ApiKey,
        request: &GraphqlRequest,
    ) -> monday_core::Result<String> {
        let started_at = Instant::now();
        let body = self.request_body(request)?;

        let mut http_request = self
            .inner
            .http
            .post(self.config().api_url.clone())
            .bearer_auth(api_key.expose())
            .header(CONTENT_TYPE, "application/json");

        if let Some(version) = &self.config().api_version {
            http_request = http_request.header("API-Version", version);
        }

        let http_response = http_request.body(body).send().await.map_err(Error::from)?;
        let status_code = http_response.status().as_u16();
        let text = http_response.text().await.map_err(Error::from)?;

        tracing::debug!(
            target: TRACING_TARGET,
            operation = request.operation(),
            status_code,
            bytes = text.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Request completed"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::http::HeaderMap;
    use axum::routing::post;
    use monday_core::{ErrorKind, MondayClient};
    use serde_json::{Value, json};
    use url::Url;

    use super::*;

    /// Replies with the headers and body it received.
    async fn echo(headers: HeaderMap, body: String) -> String {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_owned()
        };

        json!({ "data": {
            "authorization": header("authorization"),
            "content_type": header("content-type"),
            "api_version": header("api-version"),
            "body": serde_json::from_str::<Value>(&body).unwrap_or(Value::Null),
        }})
        .to_string()
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(3)).await;
        "{}"
    }

    async fn spawn_server() -> Url {
        let app = Router::new()
            .route("/v2", post(echo))
            .route("/slow", post(slow));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn api_key() -> ApiKey {
        ApiKey::new("secret").unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestClient::new(ReqwestConfig::default()).unwrap();
        assert!(client.config().user_agent.is_none());
        assert!(!format!("{client:?}").contains("secret"));
    }

    #[test]
    fn test_inline_body() {
        let request = GraphqlRequest::new("mutation ($item: ID!) { delete_item (item_id: $item) { id } }")
            .with_variable("item", "5");

        let client = ReqwestClient::new(ReqwestConfig::default()).unwrap();
        let body: Value = serde_json::from_slice(&client.request_body(&request).unwrap()).unwrap();
        assert_eq!(body["variables"]["item"], "5");

        let config = ReqwestConfig::default().with_inline_variables(true);
        let client = ReqwestClient::new(config).unwrap();
        let body: Value = serde_json::from_slice(&client.request_body(&request).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({ "query": "mutation { delete_item (item_id: \"5\") { id } }" })
        );
    }

    #[tokio::test]
    async fn test_sends_bearer_token_and_json_body() {
        let base = spawn_server().await;
        let config = ReqwestConfig::default()
            .with_api_url(base.join("v2").unwrap())
            .with_api_version("2024-01");
        let client = ReqwestClient::new(config).unwrap();

        let request = GraphqlRequest::new("query { me { id } }");
        let raw = client.execute(&api_key(), &request).await.unwrap();
        let reply: Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(reply["data"]["authorization"], "Bearer secret");
        assert_eq!(reply["data"]["content_type"], "application/json");
        assert_eq!(reply["data"]["api_version"], "2024-01");
        assert_eq!(reply["data"]["body"], json!({ "query": "query { me { id } }" }));
    }

    #[tokio::test]
    async fn test_works_through_monday_client() {
        let base = spawn_server().await;
        let config = ReqwestConfig::default().with_api_url(base.join("v2").unwrap());
        let client = MondayClient::new(ReqwestClient::new(config).unwrap(), api_key());

        let request = GraphqlRequest::new("query { me { id } }");
        let classification = client.execute_raw(&request).await.unwrap();
        assert!(classification.success);
    }

    #[tokio::test]
    async fn test_timeout_is_transient() {
        let base = spawn_server().await;
        let config = ReqwestConfig::default()
            .with_api_url(base.join("slow").unwrap())
            .with_timeout(1);
        let client = ReqwestClient::new(config).unwrap();

        let error = client
            .execute(&api_key(), &GraphqlRequest::new("query { me { id } }"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Timeout);
        assert!(error.is_transient());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ReqwestConfig::default()
            .with_api_url(Url::parse(&format!("http://{addr}/v2")).unwrap());
        let client = ReqwestClient::new(config).unwrap();

        let error = client
            .execute(&api_key(), &GraphqlRequest::new("query { me { id } }"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::NetworkError);
    }
}
