//! Error types for budgetbot

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    /// Model service failure, displayed as the service's own message
    #[error("{0}")]
    Invocation(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Cannot compute percentages of a zero income")]
    DivisionUndefined,

    #[error("Input closed before the session finished")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejected terminal input. Always recovered by asking again.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid number.")]
    NotANumber,

    #[error("Amount must be greater than 0.")]
    NonPositiveAmount,

    #[error("Income must be greater than 0.")]
    NonPositiveIncome,
}

/// Which figure is being parsed; only changes the rejection message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountKind {
    Income,
    Expense,
}

/// Parse a strictly positive, finite dollar amount.
pub fn parse_amount(input: &str, kind: AmountKind) -> std::result::Result<f64, ValidationError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber)?;

    if !value.is_finite() {
        return Err(ValidationError::NotANumber);
    }

    if value <= 0.0 {
        return Err(match kind {
            AmountKind::Income => ValidationError::NonPositiveIncome,
            AmountKind::Expense => ValidationError::NonPositiveAmount,
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_valid() {
        assert_eq!(parse_amount("1000", AmountKind::Expense), Ok(1000.0));
        assert_eq!(parse_amount("  12.5 ", AmountKind::Expense), Ok(12.5));
        assert_eq!(parse_amount("1e3", AmountKind::Income), Ok(1000.0));
    }

    #[test]
    fn test_parse_amount_not_a_number() {
        assert_eq!(
            parse_amount("abc", AmountKind::Expense),
            Err(ValidationError::NotANumber)
        );
        assert_eq!(parse_amount("", AmountKind::Income), Err(ValidationError::NotANumber));
        assert_eq!(
            parse_amount("1,000", AmountKind::Income),
            Err(ValidationError::NotANumber)
        );
    }

    #[test]
    fn test_parse_amount_rejects_non_finite() {
        assert_eq!(
            parse_amount("inf", AmountKind::Income),
            Err(ValidationError::NotANumber)
        );
        assert_eq!(
            parse_amount("NaN", AmountKind::Expense),
            Err(ValidationError::NotANumber)
        );
    }

    #[test]
    fn test_parse_amount_non_positive() {
        assert_eq!(
            parse_amount("0", AmountKind::Expense),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            parse_amount("-5", AmountKind::Income),
            Err(ValidationError::NonPositiveIncome)
        );
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::NotANumber.to_string(),
            "Please enter a valid number."
        );
        assert_eq!(
            ValidationError::NonPositiveIncome.to_string(),
            "Income must be greater than 0."
        );
    }

    #[test]
    fn test_invocation_displays_message_verbatim() {
        let err = Error::Invocation("API key not valid".into());
        assert_eq!(err.to_string(), "API key not valid");
    }
}
