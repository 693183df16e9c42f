//! Analysis prompt sent to the model
//!
//! The rendered text is the literal request payload, so its layout and number
//! formatting are fixed: amounts are `$` + two decimals with comma thousands
//! separators, percentages have one decimal.

use crate::budget::BudgetSummary;
use crate::ledger::ExpenseLedger;

/// Format a dollar amount with two decimals and comma thousands separators.
///
/// The sign, if any, follows the dollar sign: `$-1,250.00`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let fixed = format!("{:.2}", amount);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    format!("${}{}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// One `- name: $amount` line per entry, in ledger order.
pub fn format_expenses(ledger: &ExpenseLedger) -> String {
    ledger
        .iter()
        .map(|(name, amount)| format!("- {}: {}", name, format_usd(amount)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the budget analysis request.
pub fn build_prompt(
    income: f64,
    fixed: &ExpenseLedger,
    discretionary: &ExpenseLedger,
    summary: &BudgetSummary,
) -> String {
    format!(
        "As a financial advisor, please provide a detailed budget analysis using this information:

CURRENT SITUATION:
Monthly Income: {income}

Fixed Expenses (Total: {total_fixed}):
{fixed_lines}

Discretionary Expenses (Total: {total_discretionary}):
{discretionary_lines}

Current Allocations:
- Fixed Expenses: {fixed_pct:.1}% of income
- Discretionary: {discretionary_pct:.1}% of income
- Available for Savings: {savings_pct:.1}% of income ({current_savings})

IDEAL ALLOCATIONS (50/30/20 Rule):
- Needs (50%): {ideal_needs}
- Wants (30%): {ideal_wants}
- Savings (20%): {ideal_savings}

Please provide:
1. A clear analysis of the current budget structure
2. Specific areas where spending differs from the 50/30/20 rule
3. Three actionable recommendations to optimize the budget
4. Potential savings opportunities with estimated monthly savings

Format the response with clear headers and bullet points for readability.
",
        income = format_usd(income),
        total_fixed = format_usd(summary.total_fixed),
        fixed_lines = format_expenses(fixed),
        total_discretionary = format_usd(summary.total_discretionary),
        discretionary_lines = format_expenses(discretionary),
        fixed_pct = summary.fixed_percentage,
        discretionary_pct = summary.discretionary_percentage,
        savings_pct = summary.savings_percentage,
        current_savings = format_usd(summary.current_savings),
        ideal_needs = format_usd(summary.ideal_needs),
        ideal_wants = format_usd(summary.ideal_wants),
        ideal_savings = format_usd(summary.ideal_savings),
    )
}
