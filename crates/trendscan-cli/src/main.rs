mod cli;
mod error;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trendscan_core::{Pipeline, ReportWriter, ReqwestHttpClient, SystemClock};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let session = Arc::new(ReqwestHttpClient::new()?);
    let pipeline = Pipeline::new(cli.pipeline_config(), Arc::new(SystemClock), session);

    let snapshot = pipeline.run().await;
    let written = ReportWriter::new(cli.output_config()).write(&snapshot)?;

    match snapshot.error() {
        Some(reason) => info!(reason, json = %written.json_path.display(), "wrote error report"),
        None => info!(
            rows = written.rows,
            json = %written.json_path.display(),
            table = %written.table_path.display(),
            "wrote report"
        ),
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
