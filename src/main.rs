use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use sales_estimator::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Config errors are reported by the commands that need the config;
    // logging falls back to defaults meanwhile.
    let loaded = config::load_config(args.config.as_deref());
    let logging = loaded
        .as_ref()
        .map(|cfg| cfg.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging.level, &logging.format);

    match args.command {
        cli::Commands::Quote(quote) => {
            commands::quote::execute(quote)?;
        }
        cli::Commands::Submit { file, dry_run } => {
            commands::submit::execute(&file, dry_run, loaded).await?;
        }
        cli::Commands::Codes => {
            commands::codes::execute();
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(loaded)?,
            cli::ConfigCommands::Validate => commands::config::validate(loaded)?,
        },
        cli::Commands::Version => {
            println!("Sales Estimator v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
