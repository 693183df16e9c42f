//! budgetbot Core Library
//!
//! Shared functionality for the budgetbot 50/30/20 budget planner:
//! - Interactive collection of income and expense ledgers
//! - 50/30/20 budget calculator
//! - Analysis prompt and output formatting
//! - Pluggable model backends (Gemini, OpenAI-compatible, Ollama, mock)
//! - Layered configuration (embedded defaults, override file, environment)
//! - The linear planning session tying it all together

pub mod advisor;
pub mod ai;
pub mod budget;
pub mod config;
pub mod error;
pub mod ledger;
pub mod output;
pub mod prompts;
pub mod session;
pub mod terminal;

/// Test utilities including mock model server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::{BudgetAnalysis, FinancialAdvisor, ANALYSIS_ERROR_PREFIX};
pub use ai::{
    AIBackend, AIClient, GeminiBackend, MockBackend, OllamaBackend, OpenAICompatibleBackend,
};
pub use budget::{analyze, BudgetSummary};
pub use config::{AdvisorConfig, BackendKind, Endpoint};
pub use error::{parse_amount, AmountKind, Error, Result, ValidationError};
pub use ledger::{collect_expenses, ExpenseLedger};
pub use output::format_output;
pub use prompts::{build_prompt, format_usd};
pub use session::{Session, SessionReport, SessionState};
pub use terminal::Terminal;
