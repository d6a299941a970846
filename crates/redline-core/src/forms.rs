//! # Forms
//!
//! Field-level validation for the checkout and contact forms.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutForm / ContactForm                                             │
//! │        │                                                                │
//! │        ▼  validate()                                                    │
//! │  every field checked, failures collected (not short-circuited)          │
//! │        │                                                                │
//! │        ├── Ok(())            → submission may start                     │
//! │        └── Err(FieldErrors)  → { "email": "Enter a valid email", ... }  │
//! │                                 shown next to each input                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here knows about the cart; a failed form never touches it.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex")
});

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("Invalid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s().-]{7,20}$").expect("Invalid regex"));

static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/(\d{2})$").expect("Invalid regex"));

static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("Invalid regex"));

/// Shortest contact message accepted.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Longest contact message accepted.
pub const MAX_MESSAGE_LEN: usize = 2000;

// =============================================================================
// Field Errors
// =============================================================================

/// One message per failing field, keyed by the field's camelCase name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    /// Records a failure. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn require(&mut self, field: &str, value: &str, label: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required"));
            false
        } else {
            true
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// =============================================================================
// Checkout Form
// =============================================================================

/// Shipping and payment details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    // Shipping
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,

    // Payment
    pub card_number: String,
    pub card_name: String,
    /// `MM/YY`
    pub expiry_date: String,
    pub cvv: String,
}

impl CheckoutForm {
    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("firstName", &self.first_name, "First name");
        errors.require("lastName", &self.last_name, "Last name");
        if errors.require("email", &self.email, "Email") && !is_valid_email(&self.email) {
            errors.add("email", "Enter a valid email address");
        }
        errors.require("address", &self.address, "Address");
        errors.require("city", &self.city, "City");
        errors.require("state", &self.state, "State");
        if errors.require("zipCode", &self.zip_code, "ZIP code")
            && !ZIP_RE.is_match(self.zip_code.trim())
        {
            errors.add("zipCode", "Enter a 5-digit ZIP code");
        }
        if errors.require("phone", &self.phone, "Phone")
            && !PHONE_RE.is_match(self.phone.trim())
        {
            errors.add("phone", "Enter a valid phone number");
        }

        if errors.require("cardNumber", &self.card_number, "Card number")
            && !is_valid_card_number(&self.card_number)
        {
            errors.add("cardNumber", "Enter a valid card number");
        }
        errors.require("cardName", &self.card_name, "Name on card");
        if errors.require("expiryDate", &self.expiry_date, "Expiry date")
            && !EXPIRY_RE.is_match(self.expiry_date.trim())
        {
            errors.add("expiryDate", "Use MM/YY");
        }
        if errors.require("cvv", &self.cvv, "CVV") && !CVV_RE.is_match(self.cvv.trim()) {
            errors.add("cvv", "CVV must be 3 or 4 digits");
        }

        errors.into_result()
    }

    /// Card number with separators removed.
    pub fn card_digits(&self) -> String {
        normalize_card_number(&self.card_number)
    }

    /// Last four digits, for the confirmation screen.
    pub fn card_last4(&self) -> String {
        let digits: Vec<char> = self.card_digits().chars().collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

// =============================================================================
// Contact Form
// =============================================================================

/// The "get in touch" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("name", &self.name, "Name");
        if errors.require("email", &self.email, "Email") && !is_valid_email(&self.email) {
            errors.add("email", "Enter a valid email address");
        }
        errors.require("subject", &self.subject, "Subject");
        if errors.require("message", &self.message, "Message") {
            let len = self.message.trim().chars().count();
            if len < MIN_MESSAGE_LEN {
                errors.add(
                    "message",
                    format!("Message must be at least {MIN_MESSAGE_LEN} characters"),
                );
            } else if len > MAX_MESSAGE_LEN {
                errors.add(
                    "message",
                    format!("Message must be at most {MAX_MESSAGE_LEN} characters"),
                );
            }
        }

        errors.into_result()
    }
}

// =============================================================================
// Field Rules
// =============================================================================

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Strips the spaces and dashes shoppers type between digit groups.
pub fn normalize_card_number(number: &str) -> String {
    number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// 13-19 digits passing the Luhn checksum.
pub fn is_valid_card_number(number: &str) -> bool {
    let digits = normalize_card_number(number);
    if !(13..=19).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

// =============================================================================
// Unit Tests
// =============================================================================
