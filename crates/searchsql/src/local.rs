use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use searchsql_client::errors::ClientError;
use searchsql_client::{Dispatch, Query, QueryMode, QueryOutput, Session};
use tracing::debug;

/// Run a single session against the service, either one shot or as an
/// interactive shell.
pub struct LocalSession {
    session: Session,
    mode: QueryMode,
    vertical: bool,
}

impl LocalSession {
    pub fn new(session: Session, mode: QueryMode, vertical: bool) -> Self {
        LocalSession {
            session,
            mode,
            vertical,
        }
    }

    pub async fn run(self, query: Option<Query>, writer: &mut impl Write) -> Result<()> {
        match query {
            Some(query) => {
                execute_query(&self.session, &query, self.vertical, writer).await?;
                writer.flush()?;
                Ok(())
            }
            None => self.run_interactive(writer).await,
        }
    }

    async fn run_interactive(self, writer: &mut impl Write) -> Result<()> {
        let info = self.session.server_info();
        writeln!(writer, "searchsql ({})", env!("CARGO_PKG_VERSION"))?;
        writeln!(
            writer,
            "Connected to {} ({}) at {}",
            info.cluster_name,
            info.version.number,
            self.session.endpoint()
        )?;
        writeln!(writer, "Type 'help' for help, 'exit' to quit.")?;
        writer.flush()?;

        let mut rl = DefaultEditor::new()?;
        loop {
            let readline = rl.readline("searchsql> ");
            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    if is_exit_cmd(line) {
                        break;
                    }
                    if is_help_cmd(line) {
                        write_help(writer)?;
                        writer.flush()?;
                        continue;
                    }

                    let query = Query::new(line, self.mode);
                    execute_query(&self.session, &query, self.vertical, writer).await?;
                    writer.flush()?;
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

pub(crate) fn is_exit_cmd(line: &str) -> bool {
    matches!(line.to_ascii_lowercase().as_str(), "exit" | "quit" | "\\q")
}

pub(crate) fn is_help_cmd(line: &str) -> bool {
    matches!(line.to_ascii_lowercase().as_str(), "help" | "\\?")
}

fn write_help(writer: &mut impl Write) -> std::io::Result<()> {
    let pairs = [
        ("help", "Show this help text"),
        ("exit", "Quit this session"),
        ("<sql>;", "Execute a query and print the result"),
    ];
    for (cmd, help) in pairs {
        writeln!(writer, "{cmd: <15} {help}")?;
    }
    Ok(())
}

/// Execute one query and write its rendered output.
///
/// Client errors are reported through the writer rather than propagated;
/// interactively that keeps the loop alive, and in one-shot mode it keeps
/// the exit status clean.
pub(crate) async fn execute_query<D: Dispatch>(
    dispatcher: &D,
    query: &Query,
    vertical: bool,
    writer: &mut impl Write,
) -> Result<()> {
    debug!(sql = %query.sql, "executing");
    match dispatcher.execute(query).await {
        Ok(QueryOutput::Tabular(result)) => {
            let rendered = if vertical {
                fmtutil::vertical::format_vertical(&result)
            } else {
                fmtutil::table::format_table(&result)
            };
            write!(writer, "{rendered}")?;
        }
        Ok(QueryOutput::Explain(plan)) => {
            write!(writer, "{}", fmtutil::plan::format_plan(&plan))?;
        }
        Err(err) => report_error(writer, &err)?,
    }
    Ok(())
}

/// Write a user-visible error. Connection failures get the distinguished
/// (red) style; everything else surfaces the message verbatim.
pub(crate) fn report_error(writer: &mut impl Write, err: &ClientError) -> std::io::Result<()> {
    match err {
        ClientError::Connection(_) => writeln!(writer, "{}", err.to_string().red())?,
        _ => writeln!(writer, "{err}")?,
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use searchsql_client::errors::{ClientError, Result as ClientResult};
    use searchsql_client::{Column, ExplainPlan, TabularResult};
    use serde_json::json;

    use super::*;

    /// In-memory stand-in for a live session.
    enum FakeDispatch {
        Tabular(TabularResult),
        Explain(serde_json::Value),
        ConnectionErr(String),
        QueryErr(String),
    }

    impl Dispatch for FakeDispatch {
        async fn execute(&self, _query: &Query) -> ClientResult<QueryOutput> {
            match self {
                FakeDispatch::Tabular(result) => Ok(QueryOutput::Tabular(result.clone())),
                FakeDispatch::Explain(value) => {
                    Ok(QueryOutput::Explain(ExplainPlan(value.clone())))
                }
                FakeDispatch::ConnectionErr(endpoint) => {
                    Err(ClientError::Connection(endpoint.clone()))
                }
                FakeDispatch::QueryErr(msg) => Err(ClientError::Query(msg.clone())),
            }
        }
    }

    async fn run_to_string(dispatcher: &FakeDispatch, vertical: bool) -> String {
        colored::control::set_override(false);
        let query = Query::new("select * from accounts", QueryMode::Tabular);
        let mut out = Vec::new();
        execute_query(dispatcher, &query, vertical, &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn single_row() -> TabularResult {
        TabularResult {
            columns: vec![Column {
                name: "a".to_string(),
                alias: None,
                datatype: "text".to_string(),
            }],
            rows: vec![vec![json!("aws")]],
            total: 1,
            size: 1,
        }
    }

    #[tokio::test]
    async fn tabular_output() {
        let out = run_to_string(&FakeDispatch::Tabular(single_row()), false).await;
        let expected = "\
fetched rows / total rows = 1/1
+-----+
| a   |
|-----|
| aws |
+-----+
";
        assert_eq!(out, expected);
    }

    #[tokio::test]
    async fn vertical_output() {
        let out = run_to_string(&FakeDispatch::Tabular(single_row()), true).await;
        assert!(out.contains("1. row"));
        assert!(out.contains("a: aws"));
    }

    #[tokio::test]
    async fn explain_output_passes_json_through() {
        let plan = json!({"root": {"name": "ProjectOperator", "description": {"fields": "[a]"}, "children": []}});
        let out = run_to_string(&FakeDispatch::Explain(plan.clone()), false).await;
        let reparsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(reparsed, plan);
    }

    #[tokio::test]
    async fn query_error_surfaces_verbatim() {
        let out = run_to_string(
            &FakeDispatch::QueryErr("Field [b] cannot be found".to_string()),
            false,
        )
        .await;
        assert_eq!(out, "Field [b] cannot be found\n");
    }

    #[tokio::test]
    async fn connection_error_message() {
        let out = run_to_string(
            &FakeDispatch::ConnectionErr("http://invalid:9200".to_string()),
            false,
        )
        .await;
        assert_eq!(out, "Can not connect to endpoint http://invalid:9200\n");
    }

    #[test]
    fn exit_and_help_commands() {
        assert!(is_exit_cmd("exit"));
        assert!(is_exit_cmd("QUIT"));
        assert!(is_exit_cmd("\\q"));
        assert!(!is_exit_cmd("select 1"));
        assert!(is_help_cmd("help"));
        assert!(!is_help_cmd("helper"));
    }
}
