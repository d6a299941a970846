//! # Submission Tracker
//!
//! Loading state for a single-shot async submission (place order, send
//! message).
//!
//! ```text
//!          begin()              succeed(value)
//!  Idle ────────────► Pending ─────────────────► Succeeded(value)
//!   ▲                    │
//!   │                    │ fail(reason)
//!   │                    └─────────────────────► Failed(reason)
//!   │                                                  │
//!   └──────────── reset() / begin() again ◄────────────┘
//! ```
//!
//! `begin()` refuses while a submission is pending. There is no cancel and
//! no retry; a new attempt is a new `begin()`.

use serde::Serialize;
use tokio::sync::watch;

/// Where a submission is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum SubmissionStatus<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> SubmissionStatus<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }
}

/// Publishes a submission's status to subscribers.
#[derive(Debug)]
pub struct SubmissionTracker<T> {
    status: watch::Sender<SubmissionStatus<T>>,
}

impl<T: Clone> SubmissionTracker<T> {
    pub fn new() -> Self {
        let (status, _) = watch::channel(SubmissionStatus::Idle);
        SubmissionTracker { status }
    }

    /// Moves to `Pending`. Returns `false`, changing nothing, if a
    /// submission is already pending.
    pub fn begin(&self) -> bool {
        self.status.send_if_modified(|status| {
            if status.is_pending() {
                false
            } else {
                *status = SubmissionStatus::Pending;
                true
            }
        })
    }

    pub fn succeed(&self, value: T) {
        self.status.send_replace(SubmissionStatus::Succeeded(value));
    }

    pub fn fail(&self, reason: impl Into<String>) {
        self.status.send_replace(SubmissionStatus::Failed(reason.into()));
    }

    /// Back to `Idle`, e.g. when the shopper leaves the confirmation page.
    pub fn reset(&self) {
        self.status.send_replace(SubmissionStatus::Idle);
    }

    pub fn status(&self) -> SubmissionStatus<T> {
        self.status.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.status.borrow().is_pending()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus<T>> {
        self.status.subscribe()
    }
}

impl<T: Clone> Default for SubmissionTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}
