use chrono::{DateTime, Utc};
use crate::models::Receipt;

/// What the user currently sees: the receipt collection, the outcome of the last
/// action and the text waiting to be submitted.
///
/// Only the list loader and the submission handler mutate it, one action at a time.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    receipts: Vec<Receipt>,
    error: Option<String>,
    input: String,
    last_refreshed: Option<DateTime<Utc>>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Clear the previous outcome before a new action runs
    pub fn begin_action(&mut self) {
        self.error = None;
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Replace the collection wholesale
    pub fn apply_refresh(&mut self, receipts: Vec<Receipt>) {
        self.receipts = receipts;
        self.error = None;
        self.last_refreshed = Some(Utc::now());
    }

    /// Append a freshly processed receipt and reset the input
    pub fn apply_submission(&mut self, receipt: Receipt) {
        self.receipts.push(receipt);
        self.error = None;
        self.input.clear();
    }

    /// Replaces any previous message; messages never stack
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}
