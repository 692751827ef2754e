use anyhow::Result;
use clap::{Parser, ValueEnum};
use searchsql::args::ClientArgs;
use searchsql::commands;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum LoggingMode {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl From<LoggingMode> for logutil::LoggingMode {
    fn from(mode: LoggingMode) -> Self {
        match mode {
            LoggingMode::Pretty => logutil::LoggingMode::Pretty,
            LoggingMode::Json => logutil::LoggingMode::Json,
            LoggingMode::Compact => logutil::LoggingMode::Compact,
        }
    }
}

#[derive(Parser)]
#[clap(name = "searchsql")]
#[clap(version)]
#[clap(about = "SQL command line client for a search engine", long_about = None)]
struct Cli {
    /// Log verbosity.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output logs in json format.
    #[clap(long, value_enum)]
    log_mode: Option<LoggingMode>,

    #[clap(flatten)]
    client_args: ClientArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Disable logging by default since it'll clobber the repl _unless_ the
    // user specified a logging related option.
    match (cli.log_mode, cli.verbose) {
        (None, 0) => (),
        _ => logutil::init(cli.verbose, cli.log_mode.unwrap_or_default().into()),
    }

    info!(version = env!("CARGO_PKG_VERSION"), "starting...");

    commands::run(cli.client_args)
}
