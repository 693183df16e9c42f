//! Mock backend for testing
//!
//! Returns a canned analysis (or a canned failure) and remembers every prompt
//! it receives. Useful for unit tests and for running the planner without a
//! model server (`AI_BACKEND=mock`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AIBackend;

/// Reply used when no custom response is configured
pub const MOCK_ANALYSIS: &str = "**Budget Overview**
Your spending is within the 50/30/20 guidelines.

**Recommendations**
- Keep fixed costs under half of your income
- Automate a monthly transfer to savings
- Review subscriptions every quarter

**Savings Opportunities**
- Cooking at home two more nights a week: about $120/month";

#[derive(Clone)]
pub struct MockBackend {
    outcome: std::result::Result<String, String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a mock that answers with `MOCK_ANALYSIS`
    pub fn new() -> Self {
        Self::with_response(MOCK_ANALYSIS)
    }

    /// Create a mock that answers with `text`
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        self.outcome.clone().map_err(Error::Invocation)
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
