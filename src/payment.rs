// Payment form validation. Card methods collect every field error in one
// pass so the user sees all of them at once.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::YearMonth;
use crate::error::{CardField, FieldErrors, ValidationError};
use crate::notifier::Notification;
use crate::state::{Overlay, UiState};

static EXPIRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").unwrap());

static CVV_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").unwrap());

const CARD_NUMBER_DIGITS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn requires_card(&self) -> bool {
        matches!(self, PaymentMethod::CreditCard | PaymentMethod::DebitCard)
    }

    // Value carried by the payment radio buttons
    pub fn form_value(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::CashOnDelivery => "COD",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_value())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit Card" => Ok(PaymentMethod::CreditCard),
            "Debit Card" => Ok(PaymentMethod::DebitCard),
            "COD" => Ok(PaymentMethod::CashOnDelivery),
            other => Err(format!("Unknown payment method: {}", other)),
        }
    }
}

// Raw card inputs as typed. Never stored past a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub method: PaymentMethod,
    pub message: String,
}

impl Confirmation {
    fn for_method(method: PaymentMethod) -> Self {
        let message = match method {
            PaymentMethod::CashOnDelivery => {
                "Booking confirmed! Payment due at the hotel (COD).".to_string()
            }
            card => format!("Booking confirmed! Payment processed with {}.", card),
        };
        Self { method, message }
    }
}

pub fn validate_card_number(number: &str) -> Result<(), ValidationError> {
    let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() == CARD_NUMBER_DIGITS && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCardNumber)
    }
}

pub fn validate_expiry(expiry: &str, today: YearMonth) -> Result<(), ValidationError> {
    let captures = EXPIRY_PATTERN
        .captures(expiry)
        .ok_or(ValidationError::InvalidExpiryFormat)?;

    // The pattern only admits two ASCII digits in each group
    let month: u32 = captures[1]
        .parse()
        .map_err(|_| ValidationError::InvalidExpiryFormat)?;
    let year: u32 = captures[2]
        .parse()
        .map_err(|_| ValidationError::InvalidExpiryFormat)?;

    let expiry = YearMonth { year, month };
    if expiry < today {
        return Err(ValidationError::ExpiredCard);
    }
    Ok(())
}

pub fn validate_cvv(cvv: &str) -> Result<(), ValidationError> {
    if CVV_PATTERN.is_match(cvv) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCvv)
    }
}

pub fn validate_card_details(card: &CardDetails, today: YearMonth) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Err(e) = validate_card_number(&card.number) {
        errors.insert(CardField::Number, e);
    }
    if let Err(e) = validate_expiry(&card.expiry, today) {
        errors.insert(CardField::Expiry, e);
    }
    if let Err(e) = validate_cvv(&card.cvv) {
        errors.insert(CardField::Cvv, e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// Pure decision for a payment submission. Card details are ignored for
// cash on delivery.
pub fn check_payment(
    method: PaymentMethod,
    card: Option<&CardDetails>,
    today: YearMonth,
) -> Result<Confirmation, FieldErrors> {
    if method.requires_card() {
        let empty = CardDetails::default();
        validate_card_details(card.unwrap_or(&empty), today)?;
    }
    Ok(Confirmation::for_method(method))
}

pub struct PaymentValidator;

impl PaymentValidator {
    pub fn select_method(state: &mut UiState, method: PaymentMethod) {
        debug!("Payment method selected: {}", method);
        state.payment.select(method);
    }

    // Validate and, on success, close the payment overlay. Field errors are
    // recorded on the payment form state for inline rendering.
    pub fn submit_payment(
        state: &mut UiState,
        method: PaymentMethod,
        card: Option<&CardDetails>,
        today: YearMonth,
    ) -> Result<Notification, FieldErrors> {
        state.payment.clear_errors();
        Self::select_method(state, method);

        match check_payment(method, card, today) {
            Ok(confirmation) => {
                info!("Payment accepted via {}", confirmation.method);
                state.set_overlay(Overlay::Payment, false);
                Ok(Notification::success(confirmation.message))
            }
            Err(errors) => {
                info!("Payment rejected with {} field error(s)", errors.len());
                state.payment.record_errors(&errors);
                Err(errors)
            }
        }
    }
}
