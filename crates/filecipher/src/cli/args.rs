pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "filecipher")]
#[command(about = "Send files to a cipher service and keep the results around")]
pub struct Args {
    /// Base URL of the cipher service (defaults to the configured one)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the filecipher config directory (defaults to ~/.filecipher)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
