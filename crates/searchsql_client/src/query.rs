use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ClientError, Result};

pub(crate) const SQL_PATH: &str = "_plugins/_sql";
pub(crate) const EXPLAIN_PATH: &str = "_plugins/_sql/_explain";

/// How a query's result should come back from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// Row/column data for display as a table.
    #[default]
    Tabular,
    /// The execution plan tree instead of row data.
    Explain,
}

#[derive(Debug, Clone)]
pub struct Query {
    pub sql: String,
    pub mode: QueryMode,
}

impl Query {
    pub fn new(sql: impl Into<String>, mode: QueryMode) -> Self {
        Query {
            sql: sql.into(),
            mode,
        }
    }
}

/// Request body for both the query and explain endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct SqlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(rename = "type")]
    pub datatype: String,
}

impl Column {
    /// Name shown in rendered output. Aliased columns display their alias.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabularResult {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
    /// Rows matching the query overall.
    pub total: u64,
    /// Rows returned in this response.
    pub size: u64,
}

/// An execution plan, exactly as the service sent it.
///
/// Kept as raw JSON so rendering it reproduces the response byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainPlan(pub Value);

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Tabular(TabularResult),
    Explain(ExplainPlan),
}

/// Seam between the CLI and the service.
///
/// Implemented by [`Session`](crate::Session) for the live service; tests
/// drive the CLI with an in-memory implementation instead.
#[allow(async_fn_in_trait)]
pub trait Dispatch {
    async fn execute(&self, query: &Query) -> Result<QueryOutput>;
}

/// Wire shape of a jdbc-format query response.
#[derive(Debug, Deserialize)]
pub(crate) struct SqlQueryResponse {
    schema: Vec<Column>,
    datarows: Vec<Vec<Value>>,
    total: u64,
    size: u64,
}

impl TryFrom<SqlQueryResponse> for TabularResult {
    type Error = ClientError;

    fn try_from(resp: SqlQueryResponse) -> Result<Self> {
        let ncols = resp.schema.len();
        for (idx, row) in resp.datarows.iter().enumerate() {
            if row.len() != ncols {
                return Err(ClientError::Format(format!(
                    "row {idx} has {} values, expected {ncols}",
                    row.len()
                )));
            }
        }

        Ok(TabularResult {
            columns: resp.schema,
            rows: resp.datarows,
            total: resp.total,
            size: resp.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<TabularResult> {
        let resp: SqlQueryResponse =
            serde_json::from_str(body).map_err(|e| ClientError::Format(e.to_string()))?;
        resp.try_into()
    }

    #[test]
    fn parse_jdbc_response() {
        let result = parse(
            r#"{"schema":[{"name":"a","type":"text"}],"datarows":[["aws"]],"total":1,"size":1,"status":200}"#,
        )
        .unwrap();

        assert_eq!(result.columns.len(), 1);
        assert_eq!(result.columns[0].display_name(), "a");
        assert_eq!(result.rows, vec![vec![serde_json::json!("aws")]]);
        assert_eq!(result.total, 1);
        assert_eq!(result.size, 1);
    }

    #[test]
    fn parse_aliased_column() {
        let result = parse(
            r#"{"schema":[{"name":"age","alias":"a","type":"long"}],"datarows":[[32]],"total":1,"size":1}"#,
        )
        .unwrap();
        assert_eq!(result.columns[0].display_name(), "a");
    }

    #[test]
    fn ragged_rows_fail_loudly() {
        let err = parse(
            r#"{"schema":[{"name":"a","type":"text"}],"datarows":[["aws","extra"]],"total":1,"size":1}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Format(_)));
    }

    #[test]
    fn missing_fields_fail_loudly() {
        let err = parse(r#"{"rows":[["aws"]]}"#).unwrap_err();
        assert!(matches!(err, ClientError::Format(_)));
    }
}
