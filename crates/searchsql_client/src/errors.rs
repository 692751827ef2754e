#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint could not be reached at all. The display string is
    /// user-facing and must stay exactly in this form.
    #[error("Can not connect to endpoint {0}")]
    Connection(String),

    /// The service rejected or failed to execute the SQL. Carries the
    /// server-supplied message verbatim.
    #[error("{0}")]
    Query(String),

    /// The service responded with JSON we don't understand. Fail loudly
    /// instead of guessing at a table shape.
    #[error("Unexpected response from server: {0}")]
    Format(String),

    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
