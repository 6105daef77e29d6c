// CLI modules
mod cli;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Daemon, Form, Health, Version};

command_enum! {
    (Daemon, Daemon),
    (Form, Form),
    (Health, Health),
    (Version, Version),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let ctx = cli::op::OpContext::new(&args.remote, args.token)
        .context("failed to create API client")?;

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
