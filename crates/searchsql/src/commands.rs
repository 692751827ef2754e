use std::io::{self, BufWriter};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use searchsql_client::errors::ClientError;
use searchsql_client::{Connection, Query, QueryMode};
use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::args::ClientArgs;
use crate::local::{report_error, LocalSession};

pub fn run(args: ClientArgs) -> Result<()> {
    let runtime = build_runtime("client")?;
    runtime.block_on(async move {
        let mode = if args.explain {
            QueryMode::Explain
        } else {
            QueryMode::Tabular
        };
        let query = args.query.as_deref().map(|sql| Query::new(sql, mode));

        info!(endpoint = %args.endpoint, "connecting");
        let conn = Connection::new(&args.endpoint)
            .credentials(args.credentials())
            .fetch_size(args.fetch_size);

        let mut stdout = BufWriter::new(io::stdout());

        let session = match conn.connect().await {
            Ok(session) => session,
            Err(err @ ClientError::Connection(_)) => {
                // A failed connect is reported, not crashed on. The process
                // still exits cleanly; only argument errors exit non-zero.
                report_error(&mut stdout, &err)?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        LocalSession::new(session, mode, args.vertical)
            .run(query, &mut stdout)
            .await
    })
}

fn build_runtime(thread_label: &'static str) -> Result<Runtime> {
    let runtime = Builder::new_multi_thread()
        .thread_name_fn(move || {
            static THREAD_ID: AtomicU64 = AtomicU64::new(0);
            let id = THREAD_ID.fetch_add(1, Ordering::Relaxed);
            format!("{}-thread-{}", thread_label, id)
        })
        .enable_all()
        .build()?;

    Ok(runtime)
}
