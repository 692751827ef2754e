use clap::Parser;
use searchsql_client::{Credentials, DEFAULT_ENDPOINT, DEFAULT_FETCH_SIZE};

#[derive(Debug, Clone, Parser)]
pub struct ClientArgs {
    /// Endpoint of the SQL service.
    #[clap(default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Execute a query, exiting upon completion.
    ///
    /// If omitted, an interactive session is started.
    #[clap(short, long, value_parser)]
    pub query: Option<String>,

    /// Return the query's execution plan instead of rows.
    #[clap(short, long)]
    pub explain: bool,

    /// Username for HTTP basic auth.
    #[clap(short = 'u', long, requires = "password")]
    pub username: Option<String>,

    /// Password for HTTP basic auth.
    #[clap(short = 'w', long, requires = "username")]
    pub password: Option<String>,

    /// Number of rows to fetch per query.
    #[clap(long, default_value_t = DEFAULT_FETCH_SIZE)]
    pub fetch_size: u64,

    /// Render each row as a block of `column: value` lines instead of a
    /// table.
    #[clap(long)]
    pub vertical: bool,
}

impl ClientArgs {
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}
