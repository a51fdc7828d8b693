// src/main.rs

mod cli;
mod configdb;
mod ident;
mod namemap;
mod options;
mod resolve;
mod rewrite;
mod validate;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let parsed = cli::Cli::parse();
    let result = match parsed.command {
        cli::Commands::Rename(args) => cli::rename::run(&args),
        cli::Commands::Validate(args) => cli::validate::run(&args),
    };

    match result {
        Ok(status) if status.clean() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
