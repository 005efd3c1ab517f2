// Error types shared by the form validators and the rendering layer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Validation failures. The Display text is what the user sees, either inline
// next to a field or inside a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Please enter a valid email address (e.g., user@example.com).")]
    InvalidEmail,

    #[error("Password must be at least {min_len} characters long.")]
    WeakPassword { min_len: usize },

    #[error("Please log in before proceeding to payment.")]
    NotAuthenticated,

    #[error("Please select a hotel before proceeding.")]
    NoHotelSelected,

    #[error("Card number must be 16 digits long.")]
    InvalidCardNumber,

    #[error("Format must be MM/YY.")]
    InvalidExpiryFormat,

    #[error("Card has expired.")]
    ExpiredCard,

    #[error("CVV must be 3 or 4 digits.")]
    InvalidCvv,
}

// Card inputs that can carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardField {
    Number,
    Expiry,
    Cvv,
}

pub const PAYMENT_SUMMARY_ERROR: &str = "Please correct the errors in the card details above.";

// All card field errors found in a single submission
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", PAYMENT_SUMMARY_ERROR)]
pub struct FieldErrors {
    errors: BTreeMap<CardField, ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: CardField, error: ValidationError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: CardField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn summary(&self) -> &'static str {
        PAYMENT_SUMMARY_ERROR
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardField, &ValidationError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

// Errors raised by a rendering surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Duplicate element: {0}")]
    DuplicateElement(String),
}

// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
