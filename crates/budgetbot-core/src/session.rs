//! Interactive planning session
//!
//! One strictly linear pass:
//! `AwaitingIncome -> CollectingFixed -> CollectingDiscretionary -> Analyzing
//! -> Displaying -> Done`. There are no backward transitions; a failure in any
//! state ends the session with an error for the caller to report.

use std::fmt;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::advisor::{BudgetAnalysis, FinancialAdvisor};
use crate::ai::AIBackend;
use crate::error::{AmountKind, Result};
use crate::ledger::{collect_expenses, ExpenseLedger};
use crate::terminal::Terminal;

pub const BANNER: &str = "💰 Finance Chatbot: Budget Planner 💰";
pub const CLOSING: &str = "\n💡 Thank you for using the Finance Chatbot!";
const INTRO: &str = "Let's analyze your financial situation!";
const INCOME_PROMPT: &str = "\n📈 What is your monthly income? $";
const FIXED_HEADER: &str = "\n🏠 Enter your fixed expenses (rent, utilities, etc.)";
const DISCRETIONARY_HEADER: &str =
    "\n🎮 Enter your discretionary expenses (entertainment, hobbies, etc.)";
const DONE_HINT: &str = "Type 'done' when finished";
const ANALYZING: &str = "\n🔄 Analyzing your financial information...";
const RESULT_HEADER: &str = "\n📊 Your Personalized Budget Analysis:";

/// Horizontal rule printed around the banner and the analysis
pub fn rule() -> String {
    "=".repeat(50)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingIncome,
    CollectingFixed,
    CollectingDiscretionary,
    Analyzing,
    Displaying,
    Done,
}

impl SessionState {
    /// The only state reachable from this one. `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            Self::AwaitingIncome => Self::CollectingFixed,
            Self::CollectingFixed => Self::CollectingDiscretionary,
            Self::CollectingDiscretionary => Self::Analyzing,
            Self::Analyzing => Self::Displaying,
            Self::Displaying | Self::Done => Self::Done,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingIncome => "awaiting_income",
            Self::CollectingFixed => "collecting_fixed",
            Self::CollectingDiscretionary => "collecting_discretionary",
            Self::Analyzing => "analyzing",
            Self::Displaying => "displaying",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything gathered and produced by a finished session
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub income: f64,
    pub fixed: ExpenseLedger,
    pub discretionary: ExpenseLedger,
    pub analysis: BudgetAnalysis,
}

pub struct Session<R, W, B> {
    terminal: Terminal<R, W>,
    advisor: FinancialAdvisor<B>,
    state: SessionState,
}

impl<R: BufRead, W: Write, B: AIBackend> Session<R, W, B> {
    pub fn new(input: R, output: W, backend: B) -> Self {
        Self {
            terminal: Terminal::new(input, output),
            advisor: FinancialAdvisor::new(backend),
            state: SessionState::AwaitingIncome,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn advance(&mut self) {
        let next = self.state.next();
        debug!(from = %self.state, to = %next, "Session transition");
        self.state = next;
    }

    /// Run the whole session against the terminal.
    pub async fn run(&mut self) -> Result<SessionReport> {
        self.terminal.say(BANNER)?;
        self.terminal.say(&rule())?;
        self.terminal.say(INTRO)?;

        let income = self.terminal.ask_amount(INCOME_PROMPT, AmountKind::Income)?;
        self.advance();

        self.terminal.say(FIXED_HEADER)?;
        self.terminal.say(DONE_HINT)?;
        let fixed = collect_expenses(&mut self.terminal)?;
        self.advance();

        self.terminal.say(DISCRETIONARY_HEADER)?;
        self.terminal.say(DONE_HINT)?;
        let discretionary = collect_expenses(&mut self.terminal)?;
        self.advance();

        self.terminal.say(ANALYZING)?;
        self.terminal.flush()?;
        let analysis = self
            .advisor
            .analyze_budget(income, &fixed, &discretionary)
            .await?;
        self.advance();

        self.terminal.say(RESULT_HEADER)?;
        self.terminal.say(&rule())?;
        self.terminal.say(&analysis.text)?;
        self.terminal.say(&rule())?;
        self.terminal.say(CLOSING)?;
        self.terminal.flush()?;
        self.advance();

        Ok(SessionReport {
            income,
            fixed,
            discretionary,
            analysis,
        })
    }

    /// Consume the session, returning the output sink.
    pub fn into_output(self) -> W {
        self.terminal.into_output()
    }
}
