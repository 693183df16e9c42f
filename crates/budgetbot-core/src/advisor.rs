//! Financial advisor: budget figures in, formatted analysis out
//!
//! The model call is the only fallible remote step. Its failure is not an
//! error for the session: the advisor substitutes a readable message and the
//! caller displays it like any other analysis.

use tracing::{debug, warn};

use crate::ai::AIBackend;
use crate::budget::{analyze, BudgetSummary};
use crate::error::Result;
use crate::ledger::ExpenseLedger;
use crate::output::format_output;
use crate::prompts::build_prompt;

/// Prefix of the text shown in place of the analysis when the model call fails
pub const ANALYSIS_ERROR_PREFIX: &str = "Error generating analysis: ";

/// Analysis produced for one session
#[derive(Debug, Clone)]
pub struct BudgetAnalysis {
    pub summary: BudgetSummary,
    /// Formatted model reply, or the substituted error message
    pub text: String,
    /// Whether `text` came from the model
    pub generated: bool,
}

pub struct FinancialAdvisor<B> {
    backend: B,
}

impl<B: AIBackend> FinancialAdvisor<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Compute the budget summary, ask the model, and format its reply.
    ///
    /// Only calculator errors (zero or invalid income) are returned. A failed
    /// model call yields `"Error generating analysis: <error>"` as the text.
    pub async fn analyze_budget(
        &self,
        income: f64,
        fixed: &ExpenseLedger,
        discretionary: &ExpenseLedger,
    ) -> Result<BudgetAnalysis> {
        let summary = analyze(income, fixed, discretionary)?;
        let prompt = build_prompt(income, fixed, discretionary, &summary);

        debug!(
            model = %self.backend.model(),
            host = %self.backend.host(),
            prompt_len = prompt.len(),
            "Requesting budget analysis"
        );

        let (text, generated) = match self.backend.invoke(&prompt).await {
            Ok(raw) => (format_output(&raw), true),
            Err(e) => {
                warn!(error = %e, "Budget analysis failed");
                (format!("{}{}", ANALYSIS_ERROR_PREFIX, e), false)
            }
        };

        Ok(BudgetAnalysis {
            summary,
            text,
            generated,
        })
    }
}
