/*
[INPUT]:  HTTP configuration (base URL, timeouts) and an optional session
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth::SessionManager;
use crate::http::error::{MyAttireError, Result};
use crate::types::ErrorBody;

/// Default base URL for the My Attire service
const DEFAULT_BASE_URL: &str = "http://localhost:5050";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the My Attire API
#[derive(Debug, Clone)]
pub struct MyAttireClient {
    http_client: Client,
    base_url: Url,
    session: SessionManager,
}

impl MyAttireClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_session(config, SessionManager::new())
    }

    /// Create a new client against a specific base URL
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    /// Create a new client sharing an existing session
    pub fn with_config_and_session(config: ClientConfig, session: SessionManager) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(&config.base_url)?,
            session,
        })
    }

    /// Shared session manager backing this client
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Base URL this client sends requests to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build full URL for an endpoint
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// Build full URL with a trailing, percent-encoded path segment
    pub(crate) fn url_with_segment(&self, endpoint: &str, segment: &str) -> Result<Url> {
        let mut url = self.url(endpoint)?;
        url.path_segments_mut()
            .map_err(|_| MyAttireError::Config("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Build a request, attaching the bearer token when a session is present
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self.request_url(method, url))
    }

    pub(crate) fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(method = %method, url = %url, "sending request");
        let builder = self.http_client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON body, mapping non-2xx responses
    /// to typed errors
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        Self::decode_response(response).await
    }

    pub(crate) async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let raw = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if raw.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    raw.clone()
                }
            });

        warn!(status = status.as_u16(), message = %message, "API returned an error");
        Err(MyAttireError::api_error(status, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageResponse;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn default_config_points_at_local_service() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5050");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn url_with_segment_percent_encodes() {
        let client = MyAttireClient::with_base_url("http://localhost:5050").expect("client init");
        let url = client
            .url_with_segment("/usuarios/email/", "joão silva@empresa.com")
            .expect("url");

        assert_eq!(
            url.as_str(),
            "http://localhost:5050/usuarios/email/jo%C3%A3o%20silva@empresa.com"
        );
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tarefas/9"))
            .respond_with(
                ResponseTemplate::new(404).set_body_raw(
                    r#"{"error": "Tarefa não encontrada"}"#,
                    "application/json",
                ),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let builder = client.request(Method::GET, "/tarefas/9").expect("request");
        let result: Result<MessageResponse> = client.send_json(builder).await;

        match result {
            Err(MyAttireError::NotFound(message)) => {
                assert_eq!(message, "Tarefa não encontrada");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/usuarios"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = MyAttireClient::with_base_url(&server.uri()).expect("client init");
        let builder = client.request(Method::GET, "/usuarios").expect("request");
        let result: Result<MessageResponse> = client.send_json(builder).await;

        match result {
            Err(MyAttireError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
