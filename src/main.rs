use anyhow::Result;
use clap::Parser;
use log::info;

use weez_import::cli::{Cli, import_command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting weez-import");

    import_command(cli).await
}
