//! budgetbot - Finance chatbot budget planner
//!
//! Usage:
//!   budgetbot                     Start an interactive planning session
//!   budgetbot --backend ollama    Use a local Ollama server for the analysis
//!   budgetbot -v                  Log debug output to stderr

mod cli;


use std::io;

use anyhow::Result;
use budgetbot_core::{terminal, AIClient, AdvisorConfig, Session};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

const FAILURE_HINT: &str = "Please try again or contact support if the problem persists.";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false).compact())
        .init();

    // Load API keys from .env if present (never overrides the real environment)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "Could not read .env file");
        }
    }

    // Any failure ends the session with a generic message and a normal exit
    if let Err(e) = run(&cli).await {
        tracing::debug!(error = ?e, "Session aborted");
        println!("\n❌ An error occurred: {}", e);
        println!("{}", FAILURE_HINT);
    }

    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let client = AIClient::from_config(&config)?;

    terminal::clear_screen()?;

    let mut session = Session::new(io::stdin().lock(), io::stdout(), client);
    session.run().await?;
    Ok(())
}

/// Embedded defaults < override file < environment < command line
fn resolve_config(cli: &Cli) -> Result<AdvisorConfig> {
    let mut config = AdvisorConfig::load()?;
    cli.apply_to(&mut config)?;
    tracing::debug!(backend = %config.backend, timeout = ?config.timeout, "Configuration resolved");
    Ok(config)
}
