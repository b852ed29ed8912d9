mod cli;
mod download;
mod extract;
mod headers;
mod listing;
mod merge;
mod workspace;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Monthly { workspace } => match command::monthly(workspace).await {
            Ok(path) => println!("Dataset saved to `{}`", path.display()),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Daily { workspace } => match command::daily(workspace).await {
            Ok(path) => println!("Dataset saved to `{}`", path.display()),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Precipitation { workspace } => match command::precipitation(workspace).await {
            Ok(path) => println!("Dataset saved to `{}`", path.display()),
            Err(e) => eprintln!("Error: {}", e),
        },
    }

    Ok(())
}
