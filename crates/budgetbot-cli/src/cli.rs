//! CLI argument definitions using clap
//!
//! The planner is a single interactive session, so there are no subcommands;
//! only global options that tune logging and the model backend.

use anyhow::Result;
use budgetbot_core::{AdvisorConfig, BackendKind};
use clap::Parser;

/// budgetbot - Plan a monthly budget against the 50/30/20 rule
#[derive(Parser, Debug)]
#[command(name = "budgetbot")]
#[command(about = "Interactive budget planner with AI-generated 50/30/20 analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Model backend: gemini, openai_compatible, ollama, mock
    ///
    /// Overrides AI_BACKEND and the config file.
    #[arg(long)]
    pub backend: Option<String>,

    /// Model name for the selected backend
    #[arg(long)]
    pub model: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut AdvisorConfig) -> Result<()> {
        if let Some(ref backend) = self.backend {
            let kind: BackendKind = backend.parse()?;
            config.set_backend(kind);
        }
        if let Some(ref model) = self.model {
            config.set_model(model);
        }
        Ok(())
    }
}
