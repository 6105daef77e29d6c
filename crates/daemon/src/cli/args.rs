pub use clap::Parser;

use url::Url;

#[derive(Parser, Debug)]
#[command(name = "formcore")]
#[command(about = "Form feature pack daemon and API client")]
pub struct Args {
    /// Base URL of a running daemon to talk to
    #[arg(long, global = true, default_value = "http://localhost:5080")]
    pub remote: Url,

    /// Session token forwarded as a bearer on every API call
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}
