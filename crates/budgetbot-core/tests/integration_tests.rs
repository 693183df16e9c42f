//! Integration tests for budgetbot-core
//!
//! These tests drive whole planning sessions through in-memory input/output
//! with the mock backend: income -> ledgers -> analysis -> display.

use std::io::Cursor;

use budgetbot_core::{
    ai::MOCK_ANALYSIS, format_output, MockBackend, Session, SessionReport, SessionState,
};

/// Run a session over scripted input, returning the report and everything printed
async fn run_session(
    input: &str,
    backend: MockBackend,
) -> (budgetbot_core::Result<SessionReport>, String) {
    let mut session = Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), backend);
    let result = session.run().await;
    let output = String::from_utf8(session.into_output()).expect("output is UTF-8");
    (result, output)
}

// =============================================================================
// Full Session Tests
// =============================================================================

#[tokio::test]
async fn test_full_session_transcript() {
    let input = "3000\nRent\n1000\nUtilities\n150\ndone\nDining\n200\nDONE\n";
    let (report, output) = run_session(input, MockBackend::new()).await;
    let report = report.expect("session should finish");

    assert_eq!(report.fixed.len(), 2);
    assert_eq!(report.discretionary.len(), 1);
    assert!(report.analysis.generated);

    // Banner, prompts and closing appear in order
    let markers = [
        "💰 Finance Chatbot: Budget Planner 💰",
        "Let's analyze your financial situation!",
        "📈 What is your monthly income? $",
        "🏠 Enter your fixed expenses (rent, utilities, etc.)",
        "🎮 Enter your discretionary expenses (entertainment, hobbies, etc.)",
        "🔄 Analyzing your financial information...",
        "📊 Your Personalized Budget Analysis:",
        "💡 Thank you for using the Finance Chatbot!",
    ];
    let mut cursor = 0;
    for marker in markers {
        let found = output[cursor..]
            .find(marker)
            .unwrap_or_else(|| panic!("missing or out of order: {}", marker));
        cursor += found + marker.len();
    }

    assert!(output.contains(&format_output(MOCK_ANALYSIS)));
    assert_eq!(output.matches(&"=".repeat(50)).count(), 3);
}

#[tokio::test]
async fn test_prompt_sent_to_model() {
    let backend = MockBackend::new();
    let input = "4,000\n4000\nRent\n1500\nCar\n350.75\ndone\nStreaming\n15.99\ndone\n";
    let (report, output) = run_session(input, backend.clone()).await;
    report.expect("session should finish");

    // "4,000" was rejected once before "4000" was accepted
    assert_eq!(output.matches("Please enter a valid number.").count(), 1);

    let prompts = backend.prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("Monthly Income: $4,000.00"));
    assert!(prompt.contains("Fixed Expenses (Total: $1,850.75):\n- Rent: $1,500.00\n- Car: $350.75\n"));
    assert!(prompt.contains("Discretionary Expenses (Total: $15.99):\n- Streaming: $15.99\n"));
    assert!(prompt.contains("- Needs (50%): $2,000.00"));
    assert!(prompt.contains("- Wants (30%): $1,200.00"));
    assert!(prompt.contains("- Savings (20%): $800.00"));
}

#[tokio::test]
async fn test_empty_ledgers_scenario() {
    let backend = MockBackend::new();
    let (report, _) = run_session("2000\ndone\ndone\n", backend.clone()).await;
    let summary = report.unwrap().analysis.summary;

    assert_eq!(summary.current_savings, 2000.0);
    assert_eq!(summary.savings_percentage, 100.0);
    assert!(summary.total_fixed.is_sign_positive());
    assert!(summary.total_discretionary.is_sign_positive());

    // Empty totals render as positive zero
    let prompt = &backend.prompts()[0];
    assert!(prompt.contains("Fixed Expenses (Total: $0.00):"));
    assert!(prompt.contains("Discretionary Expenses (Total: $0.00):"));
    assert!(prompt.contains("- Fixed Expenses: 0.0% of income"));
    assert!(prompt.contains("- Discretionary: 0.0% of income"));
    assert!(!prompt.contains("$-0.00"));
    assert!(!prompt.contains("-0.0%"));
}

#[tokio::test]
async fn test_overspending_session_completes() {
    let (report, _) = run_session(
        "1000\nRent\n1200\ndone\nTravel\n300\ndone\n",
        MockBackend::new(),
    )
    .await;
    let summary = report.unwrap().analysis.summary;

    assert!(summary.is_overspending());
    assert!((summary.current_savings - -500.0).abs() < 1e-9);
    assert!((summary.total_fixed + summary.total_discretionary + summary.current_savings - 1000.0).abs() < 1e-9);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[tokio::test]
async fn test_income_validation_loop() {
    let (report, output) = run_session("abc\n0\n-100\n2500\ndone\ndone\n", MockBackend::new()).await;

    assert_eq!(report.unwrap().income, 2500.0);
    assert_eq!(output.matches("Please enter a valid number.").count(), 1);
    assert_eq!(output.matches("Income must be greater than 0.").count(), 2);
    assert_eq!(output.matches("What is your monthly income?").count(), 4);
}

#[tokio::test]
async fn test_invalid_amounts_never_reach_ledger() {
    let input = "3000\nRent\nzero\n0\n-1\n1000\ndone\nGames\n-60\n60\ndone\n";
    let (report, output) = run_session(input, MockBackend::new()).await;
    let report = report.unwrap();

    let fixed: Vec<_> = report.fixed.iter().collect();
    assert_eq!(fixed, vec![("Rent", 1000.0)]);
    let discretionary: Vec<_> = report.discretionary.iter().collect();
    assert_eq!(discretionary, vec![("Games", 60.0)]);

    assert_eq!(output.matches("Amount must be greater than 0.").count(), 3);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[tokio::test]
async fn test_model_failure_still_completes() {
    let (report, output) = run_session(
        "3000\nRent\n1000\ndone\ndone\n",
        MockBackend::failing("API key not valid"),
    )
    .await;
    let report = report.expect("a model failure must not abort the session");

    let expected = "Error generating analysis: API key not valid";
    assert_eq!(report.analysis.text, expected);
    assert!(!report.analysis.generated);

    // Shown between the rules, followed by the closing message
    let rule = "=".repeat(50);
    assert!(output.contains(&format!("{}\n{}\n{}\n", rule, expected, rule)));
    assert!(output.trim_end().ends_with("💡 Thank you for using the Finance Chatbot!"));
}

#[tokio::test]
async fn test_input_closed_is_surfaced() {
    let mut session = Session::new(
        Cursor::new(b"3000\nRent\n".to_vec()),
        Vec::new(),
        MockBackend::new(),
    );

    let result = session.run().await;
    assert!(matches!(result, Err(budgetbot_core::Error::InputClosed)));
    assert_eq!(session.state(), SessionState::CollectingFixed);
}
