//! 50/30/20 budget calculator
//!
//! Pure arithmetic over the income and the two expense ledgers. The figures
//! feed the analysis prompt; nothing here talks to the model.

use crate::error::{Error, Result};
use crate::ledger::ExpenseLedger;

/// Share of income the 50/30/20 rule allots to needs
pub const NEEDS_SHARE: f64 = 0.5;
/// Share of income the 50/30/20 rule allots to wants
pub const WANTS_SHARE: f64 = 0.3;
/// Share of income the 50/30/20 rule allots to savings
pub const SAVINGS_SHARE: f64 = 0.2;

/// Figures derived once from income and the two ledgers
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    pub income: f64,
    pub total_fixed: f64,
    pub total_discretionary: f64,
    /// Income left after all expenses. Negative when overspending.
    pub current_savings: f64,
    pub fixed_percentage: f64,
    pub discretionary_percentage: f64,
    pub savings_percentage: f64,
    pub ideal_needs: f64,
    pub ideal_wants: f64,
    pub ideal_savings: f64,
}

impl BudgetSummary {
    pub fn is_overspending(&self) -> bool {
        self.current_savings < 0.0
    }
}

/// Compute the budget summary.
///
/// Income must be strictly positive; zero income is rejected with
/// `Error::DivisionUndefined` instead of producing infinite percentages.
pub fn analyze(
    income: f64,
    fixed: &ExpenseLedger,
    discretionary: &ExpenseLedger,
) -> Result<BudgetSummary> {
    if income == 0.0 {
        return Err(Error::DivisionUndefined);
    }
    if !income.is_finite() || income < 0.0 {
        return Err(Error::InvalidData(format!(
            "income must be a positive amount, got {}",
            income
        )));
    }

    let total_fixed = fixed.total();
    let total_discretionary = discretionary.total();

    let ideal_needs = income * NEEDS_SHARE;
    let ideal_wants = income * WANTS_SHARE;
    let ideal_savings = income * SAVINGS_SHARE;

    let current_savings = income - total_fixed - total_discretionary;

    Ok(BudgetSummary {
        income,
        total_fixed,
        total_discretionary,
        current_savings,
        fixed_percentage: percent_of(total_fixed, income),
        discretionary_percentage: percent_of(total_discretionary, income),
        savings_percentage: percent_of(current_savings, income),
        ideal_needs,
        ideal_wants,
        ideal_savings,
    })
}

fn percent_of(part: f64, whole: f64) -> f64 {
    part / whole * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn ledger(items: &[(&str, f64)]) -> ExpenseLedger {
        items.iter().map(|(n, a)| (*n, *a)).collect()
    }

    #[test]
    fn test_rent_and_dining_scenario() {
        let s = analyze(
            3000.0,
            &ledger(&[("Rent", 1000.0)]),
            &ledger(&[("Dining", 200.0)]),
        )
        .unwrap();

        assert_eq!(s.total_fixed, 1000.0);
        assert_eq!(s.total_discretionary, 200.0);
        assert_eq!(s.current_savings, 1800.0);
        assert!((s.savings_percentage - 60.0).abs() < EPS);
        assert_eq!(s.ideal_needs, 1500.0);
        assert!((s.ideal_wants - 900.0).abs() < EPS);
        assert_eq!(s.ideal_savings, 600.0);
        assert!(!s.is_overspending());
    }

    #[test]
    fn test_empty_ledgers_save_everything() {
        let s = analyze(2000.0, &ExpenseLedger::new(), &ExpenseLedger::new()).unwrap();
        assert_eq!(s.current_savings, 2000.0);
        assert_eq!(s.savings_percentage, 100.0);
        assert_eq!(s.fixed_percentage, 0.0);
        assert_eq!(s.discretionary_percentage, 0.0);
    }

    #[test]
    fn test_overspending_goes_negative() {
        let s = analyze(
            1000.0,
            &ledger(&[("Rent", 900.0)]),
            &ledger(&[("Travel", 350.5)]),
        )
        .unwrap();

        assert!(s.is_overspending());
        assert!((s.current_savings - -250.5).abs() < EPS);
        assert!((s.savings_percentage - -25.05).abs() < EPS);
        assert!((s.total_fixed + s.total_discretionary + s.current_savings - 1000.0).abs() < EPS);
    }

    #[test]
    fn test_totals_and_ideals_sum_to_income() {
        let cases: &[(f64, &[(&str, f64)], &[(&str, f64)])] = &[
            (0.01, &[], &[]),
            (1234.56, &[("a", 0.1), ("b", 0.2)], &[("c", 0.3)]),
            (5000.0, &[("Rent", 2100.0), ("Car", 433.33)], &[("Fun", 7000.0)]),
            (87_654.321, &[("x", 12_345.678)], &[("y", 1.0), ("z", 99.99)]),
        ];

        for (income, fixed, disc) in cases {
            let s = analyze(*income, &ledger(fixed), &ledger(disc)).unwrap();
            let tol = income.abs() * 1e-12 + EPS;
            assert!(
                (s.total_fixed + s.total_discretionary + s.current_savings - income).abs() < tol,
                "totals for income {}",
                income
            );
            assert!(
                (s.ideal_needs + s.ideal_wants + s.ideal_savings - income).abs() < tol,
                "ideals for income {}",
                income
            );
        }
    }

    #[test]
    fn test_zero_income_is_division_undefined() {
        let result = analyze(0.0, &ExpenseLedger::new(), &ExpenseLedger::new());
        assert!(matches!(result, Err(Error::DivisionUndefined)));
    }

    #[test]
    fn test_negative_income_rejected() {
        let result = analyze(-10.0, &ExpenseLedger::new(), &ExpenseLedger::new());
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
