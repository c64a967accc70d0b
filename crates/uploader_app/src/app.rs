use std::sync::Arc;

use anyhow::Context;
use uploader_engine::{
    import_claims, load_defaults, JsonLedger, LogReporter, ReqwestPublishClient, RunAborted,
    Summary, UploadOrchestrator,
};
use uploader_logging::upload_info;

use crate::cli::Cli;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The batch ran to the end, possibly with skipped claims.
    Completed(Summary),
    /// The daemon gate failed; nothing was processed.
    Aborted(Summary),
}

/// Load everything the run needs, then publish. Setup failures surface before any claim.
pub async fn run(cli: &Cli) -> anyhow::Result<RunStatus> {
    let defaults = load_defaults(&cli.config_dir, &cli.config)
        .with_context(|| format!("could not load '{}' settings", cli.config))?;
    let claims = import_claims(&cli.input)
        .with_context(|| format!("could not import claims from {:?}", cli.input))?;
    let ledger = JsonLedger::open(&cli.ledger)
        .with_context(|| format!("could not open ledger {:?}", cli.ledger))?;
    let client = ReqwestPublishClient::new(cli.client_settings())
        .context("could not create daemon client")?;
    upload_info!("Publishing through daemon at {}", client.endpoint());

    let mut orchestrator =
        UploadOrchestrator::new(client, ledger, defaults, Arc::new(LogReporter));
    match orchestrator.run(claims).await {
        Ok(report) => Ok(RunStatus::Completed(report.summary)),
        Err(aborted @ RunAborted::DaemonUnavailable { .. }) => {
            Ok(RunStatus::Aborted(aborted.summary()))
        }
    }
}
