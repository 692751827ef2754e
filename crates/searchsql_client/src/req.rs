use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::errors::{ClientError, Result};
use crate::Credentials;

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const BODY_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Default)]
pub struct SearchClientBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    credentials: Option<Credentials>,
}

impl SearchClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn build(self, endpoint: &str) -> Result<SearchClient> {
        // Keep the endpoint as the user typed it for error messages. A
        // parsed Url normalizes it (e.g. adds a trailing slash).
        let base_url = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
            url: endpoint.to_string(),
            source: e,
        })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(BODY_CONTENT_TYPE));
        default_headers.insert(ACCEPT, HeaderValue::from_static(BODY_CONTENT_TYPE));

        let mut builder = Client::builder()
            .user_agent(APP_USER_AGENT)
            .default_headers(default_headers);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let client = builder.build()?;
        Ok(SearchClient {
            endpoint: endpoint.to_string(),
            base_url,
            credentials: self.credentials,
            inner: client,
        })
    }
}

/// Low-level HTTP client for the SQL service.
#[derive(Debug, Clone)]
pub struct SearchClient {
    endpoint: String,
    base_url: Url,
    credentials: Option<Credentials>,
    inner: Client,
}

impl SearchClient {
    pub fn builder() -> SearchClientBuilder {
        SearchClientBuilder::default()
    }

    /// The endpoint string as supplied by the user.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn get_json<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.join(path)?;
        let mut req = self.inner.get(url);
        if let Some(creds) = &self.credentials {
            req = req.basic_auth(&creds.username, Some(&creds.password));
        }

        let res = req.send().await.map_err(|e| self.transport_error(e))?;
        if !res.status().is_success() {
            return Err(ClientError::Connection(self.endpoint.clone()));
        }

        let res = res.text().await?;
        trace!(%res, "response");

        serde_json::from_str(&res).map_err(|e| ClientError::Format(e.to_string()))
    }

    pub async fn post_json<P, B, R>(&self, path: &str, params: &P, body: &B) -> Result<R>
    where
        P: Serialize,
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.join(path)?;
        let mut req = self.inner.post(url).query(params).json(body);
        if let Some(creds) = &self.credentials {
            req = req.basic_auth(&creds.username, Some(&creds.password));
        }

        let res = req.send().await.map_err(|e| self.transport_error(e))?;
        let status = res.status();
        let text = res.text().await?;
        trace!(%status, %text, "response");

        if !status.is_success() {
            return Err(ClientError::Query(extract_server_message(&text)));
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Format(e.to_string()))
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidEndpoint {
                url: self.endpoint.clone(),
                source: e,
            })
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        trace!(%err, "transport error");
        ClientError::Connection(self.endpoint.clone())
    }
}

/// Pull the server-supplied error message out of a failed response body.
///
/// The service reports failures as `{"error": {"reason", "details", "type"},
/// "status"}`. Prefer the detailed message, fall back to the reason, and if
/// the body isn't in that shape at all, surface it untouched.
fn extract_server_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }

    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        reason: Option<String>,
        details: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .error
            .details
            .or(parsed.error.reason)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}
