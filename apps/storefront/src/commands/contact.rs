//! # Contact Commands
//!
//! The contact page's "send message" button. Nothing leaves the process:
//! the message is validated, held for a simulated round trip, logged and
//! acknowledged.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use redline_core::ContactForm;

use crate::error::ApiError;
use crate::state::{ContactState, MessageReceipt, StorefrontConfig, SubmissionStatus};

/// Sends a contact message.
///
/// Field errors come back together, keyed by field name. A second send
/// while the first is in flight is refused with `BUSY`.
pub async fn send_message(
    contact: &ContactState,
    config: &StorefrontConfig,
    form: ContactForm,
) -> Result<MessageReceipt, ApiError> {
    debug!(email = %form.email, "send_message command");

    form.validate()?;

    if !contact.message().begin() {
        return Err(ApiError::busy("Message"));
    }

    tokio::time::sleep(config.contact_delay()).await;

    let receipt = MessageReceipt {
        reference: format!(
            "MSG-{}",
            Uuid::new_v4().simple().to_string()[..8].to_ascii_uppercase()
        ),
        received_at: Utc::now(),
        name: form.name.trim().to_string(),
        subject: form.subject.trim().to_string(),
    };

    info!(
        reference = %receipt.reference,
        email = %form.email.trim(),
        subject = %receipt.subject,
        chars = form.message.trim().chars().count(),
        "Contact message received"
    );

    contact.message().succeed(receipt.clone());
    Ok(receipt)
}

pub fn message_status(contact: &ContactState) -> SubmissionStatus<MessageReceipt> {
    contact.message().status()
}

/// Clears the "message sent" banner so the form can be used again.
pub fn reset_message(contact: &ContactState) {
    contact.message().reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn form() -> ContactForm {
        ContactForm {
            name: " Letty Ortiz ".into(),
            email: "letty@example.com".into(),
            subject: "Wholesale".into(),
            message: "Do you ship hoodies in bulk for car clubs?".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_message() {
        let contact = ContactState::new();
        let config = StorefrontConfig::default();
        let started = tokio::time::Instant::now();

        let receipt = send_message(&contact, &config, form()).await.unwrap();

        assert!(started.elapsed() >= config.contact_delay());
        assert!(receipt.reference.starts_with("MSG-"));
        assert_eq!(receipt.name, "Letty Ortiz");
        assert_eq!(
            message_status(&contact),
            SubmissionStatus::Succeeded(receipt)
        );

        reset_message(&contact);
        assert_eq!(message_status(&contact), SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_message_reports_fields() {
        let contact = ContactState::new();
        let config = StorefrontConfig::default();

        let mut bad = form();
        bad.email = "letty@".into();
        bad.message = "hi".into();
        let err = send_message(&contact, &config, bad).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        let fields = err.fields.unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("message"));
        assert_eq!(message_status(&contact), SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_send_is_busy() {
        let contact = ContactState::new();
        let config = StorefrontConfig::default();

        let (first, second) = tokio::join!(
            send_message(&contact, &config, form()),
            send_message(&contact, &config, form()),
        );

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err().code, ErrorCode::Busy);
    }
}
