//! Expense ledgers and the interactive loop that fills them

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{AmountKind, Result};
use crate::terminal::Terminal;

/// Typing this (any case) at the name prompt ends a collection phase.
pub const DONE_SENTINEL: &str = "done";

/// Insertion-ordered mapping from expense name to monthly amount.
///
/// Re-inserting an existing name replaces its amount but keeps the position
/// of the first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseLedger {
    entries: Vec<(String, f64)>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry. Returns the previous amount, if any.
    pub fn insert(&mut self, name: impl Into<String>, amount: f64) -> Option<f64> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, amount)),
            None => {
                self.entries.push((name, amount));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, amount)| *amount)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), *a))
    }

    /// Sum of all amounts. An empty ledger totals positive zero.
    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, (_, a)| acc + a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, f64)> for ExpenseLedger {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for (name, amount) in iter {
            ledger.insert(name, amount);
        }
        ledger
    }
}

/// Read name/amount pairs until the user types `done`.
///
/// An invalid amount re-asks for the amount only; the name already given is
/// kept. Nothing is inserted until the amount is valid.
pub fn collect_expenses<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
) -> Result<ExpenseLedger> {
    let mut ledger = ExpenseLedger::new();

    loop {
        let name = terminal.ask("\nExpense name (or 'done'): ")?;
        if name.eq_ignore_ascii_case(DONE_SENTINEL) {
            break;
        }

        let amount = terminal.ask_amount("Amount: $", AmountKind::Expense)?;
        if let Some(previous) = ledger.insert(name.as_str(), amount) {
            debug!(name = %name, previous, amount, "Overwrote expense");
        } else {
            debug!(name = %name, amount, "Recorded expense");
        }
    }

    Ok(ledger)
}
