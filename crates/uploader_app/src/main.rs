mod app;
mod cli;

use std::process::ExitCode;

use clap::Parser;
use uploader_logging::{upload_error, LogDestination};

use crate::app::RunStatus;
use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let destination = if cli.quiet {
        LogDestination::File
    } else {
        LogDestination::Both
    };
    uploader_logging::initialize(destination, &cli.log_dir);

    match app::run(&cli).await {
        Ok(RunStatus::Completed(_)) => ExitCode::SUCCESS,
        Ok(RunStatus::Aborted(_)) => ExitCode::FAILURE,
        Err(err) => {
            upload_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
