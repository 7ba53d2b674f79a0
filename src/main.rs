//! callbrief - Post-call summaries for customer calls
//!
//! Entry point for the callbrief CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use callbrief::cli::commands::{self, AnalyzeOptions};
use callbrief::cli::{Cli, Commands};
use callbrief::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        commands::print_completions(*shell);
        return Ok(());
    }

    // Load configuration first so the configured log level can seed the filter.
    let settings = Settings::load()?;

    // Initialize logging
    let directive = settings.log_directive(cli.verbose);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Analyze {
            phone,
            text,
            file,
            contacts,
            model,
            json,
            no_save,
        } => {
            let options = AnalyzeOptions {
                phone,
                text,
                file,
                contacts,
                model,
                json,
                no_save,
            };
            commands::analyze_call(&settings, options).await?;
        }
        Commands::Lookup {
            phone,
            contacts,
            json,
        } => {
            commands::lookup_contact(&settings, &phone, contacts, json).await?;
        }
        Commands::History { limit } => {
            commands::show_history(&settings, limit).await?;
        }
        Commands::Config(config_cmd) => {
            commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
