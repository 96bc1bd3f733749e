//! opencast CLI
//!
//! Lists the movies and TV shows in local catalogs and keeps AirPlay displays
//! showing either a video or the idle image.

use clap::Parser;
use opencast::cli::{
    args::{Cli, Commands},
    commands::{broadcast, displays, list, play},
};
use opencast::core::context::Context;
use opencast::models::config;
use opencast::models::media::MediaType;
use opencast::preflight;
use opencast::services::airplay::{AirPlayClient, AirPlayConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Configuration errors are fatal before anything starts
    let config = config::load_config(cli.config.as_deref())?;
    let client = AirPlayClient::with_config(AirPlayConfig {
        timeout_secs: config.playback.command_timeout_secs,
    })?;
    let ctx = Context::from_config(config, Arc::new(client))?;

    match cli.command {
        Commands::Shows => {
            list::list(&ctx, MediaType::Shows).await?;
        }

        Commands::Movies => {
            list::list(&ctx, MediaType::Movies).await?;
        }

        Commands::Broadcast => {
            if !cli.skip_preflight {
                run_preflight_checks(&ctx).await?;
            }
            let handle = ctx.start_reconciler();
            broadcast::broadcast(&ctx, handle).await?;
        }

        Commands::Play { file, display } => {
            if !cli.skip_preflight {
                run_preflight_checks(&ctx).await?;
            }
            play::play(&ctx, &file, display.as_deref()).await?;
            let handle = ctx.start_reconciler();
            broadcast::broadcast(&ctx, handle).await?;
        }

        Commands::Displays => {
            displays::list_displays(&ctx).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("opencast=debug")
    } else {
        EnvFilter::new("opencast=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(ctx: &Context) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(ctx).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
