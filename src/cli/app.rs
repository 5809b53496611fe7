use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "weez-import")]
#[command(about = "Import an attendee spreadsheet into a Weezevent event")]
pub struct Cli {
    /// Path to the xlsx file to import
    pub file: PathBuf,

    /// API key for the Weezevent legacy API
    pub api_key: String,

    /// API username for the Weezevent legacy API
    pub api_username: String,

    /// API password for the Weezevent legacy API
    pub api_password: String,

    /// Event to import the file into
    pub event_id: String,
}
