//! # Contact State
//!
//! The "get in touch" form's submission.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::submission::SubmissionTracker;

/// Acknowledgement shown after a message is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReceipt {
    pub reference: String,
    pub received_at: DateTime<Utc>,
    pub name: String,
    pub subject: String,
}

#[derive(Debug, Default)]
pub struct ContactState {
    message: SubmissionTracker<MessageReceipt>,
}

impl ContactState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> &SubmissionTracker<MessageReceipt> {
        &self.message
    }
}
