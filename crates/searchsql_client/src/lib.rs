//! Client for a search engine's SQL query endpoint.
//!
//! [`Connection`] resolves an endpoint and optional credentials and opens a
//! [`Session`] with a single connectivity check. A session dispatches SQL
//! through [`Dispatch::execute`], returning either tabular rows or an
//! explain-plan tree.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::query::{SqlQueryResponse, SqlRequest, EXPLAIN_PATH, SQL_PATH};
use crate::req::SearchClient;

mod req;

pub mod errors;
pub mod query;

pub use query::{Column, Dispatch, ExplainPlan, Query, QueryMode, QueryOutput, TabularResult};

use errors::Result;

/// Endpoint used when the user doesn't name one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9200";

/// Pagination size sent with tabular queries.
pub const DEFAULT_FETCH_SIZE: u64 = 200;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP basic auth credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct Connection {
    endpoint: String,
    credentials: Option<Credentials>,
    fetch_size: u64,
    timeout: Duration,
}

impl Connection {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Connection {
            endpoint: endpoint.into(),
            credentials: None,
            fetch_size: DEFAULT_FETCH_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn fetch_size(mut self, fetch_size: u64) -> Self {
        self.fetch_size = fetch_size;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Open a session against the endpoint.
    ///
    /// A single attempt; an unreachable endpoint surfaces as
    /// `ClientError::Connection`. Whether to retry or re-prompt is the
    /// caller's call.
    pub async fn connect(self) -> Result<Session> {
        let client = SearchClient::builder()
            .timeout(self.timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .credentials(self.credentials)
            .build(&self.endpoint)?;

        let info: ServerInfo = client.get_json("").await?;
        tracing::debug!(cluster = %info.cluster_name, version = %info.version.number, "connected");

        Ok(Session {
            client,
            fetch_size: self.fetch_size,
            info,
        })
    }
}

/// Identity reported by the server on connect, shown in the shell banner.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    pub cluster_name: String,
    pub version: ServerVersion,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerVersion {
    pub number: String,
}

/// An established session with the SQL service.
#[derive(Debug)]
pub struct Session {
    client: SearchClient,
    fetch_size: u64,
    info: ServerInfo,
}

impl Session {
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.info
    }
}

impl Dispatch for Session {
    async fn execute(&self, query: &Query) -> Result<QueryOutput> {
        match query.mode {
            QueryMode::Explain => {
                let body = SqlRequest {
                    query: &query.sql,
                    fetch_size: None,
                };
                let no_params: [(&str, &str); 0] = [];
                let plan: Value = self.client.post_json(EXPLAIN_PATH, &no_params, &body).await?;
                Ok(QueryOutput::Explain(ExplainPlan(plan)))
            }
            QueryMode::Tabular => {
                let body = SqlRequest {
                    query: &query.sql,
                    fetch_size: Some(self.fetch_size),
                };
                let resp: SqlQueryResponse = self
                    .client
                    .post_json(SQL_PATH, &[("format", "jdbc")], &body)
                    .await?;
                Ok(QueryOutput::Tabular(resp.try_into()?))
            }
        }
    }
}
