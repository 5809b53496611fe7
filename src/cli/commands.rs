//! Import command handler

use anyhow::{Context, Result};
use log::info;

use super::app::Cli;
use crate::api::WeezeventClient;
use crate::import::run_import;
use crate::spreadsheet::Spreadsheet;

/// Run the full import: parse the spreadsheet, authenticate, reconcile rates
/// and forms, submit participants, print the summary.
pub async fn import_command(args: Cli) -> Result<()> {
    // Validated before any network traffic.
    if !args.file.exists() {
        eprintln!("ERROR: {} not found.", args.file.display());
        std::process::exit(1);
    }

    let sheet = Spreadsheet::open(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    info!(
        "Importing {} attendee rows into event {}",
        sheet.rows().len(),
        args.event_id
    );

    let client = WeezeventClient::authenticate(&args.api_key, &args.api_username, &args.api_password)
        .await
        .context("authentication against the Weezevent API failed")?;

    let report = run_import(&client, &args.event_id, sheet.rows()).await?;

    println!(
        "pushed {}/{} participants in {:.2} seconds",
        report.accepted,
        report.total,
        report.elapsed.as_secs_f64()
    );
    Ok(())
}
