// Shared UI state model. Every handler reads and writes this struct; the
// rendering adapter turns it into element properties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CardField, FieldErrors, ValidationError};
use crate::payment::PaymentMethod;

pub const LOGIN_LABEL: &str = "Login / Sign Up";
pub const LOGOUT_LABEL: &str = "Logout";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub is_logged_in: bool,
}

// Everything on the page that depends on the login flag. Computed in one
// place so the pieces can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    pub booking_form_visible: bool,
    pub login_prompt_visible: bool,
    pub login_button_label: &'static str,
    pub logged_in_marker: &'static str,
}

impl SessionView {
    pub fn derive(session: &SessionState) -> Self {
        if session.is_logged_in {
            Self {
                booking_form_visible: true,
                login_prompt_visible: false,
                login_button_label: LOGOUT_LABEL,
                logged_in_marker: "true",
            }
        } else {
            Self {
                booking_form_visible: false,
                login_prompt_visible: true,
                login_button_label: LOGIN_LABEL,
                logged_in_marker: "false",
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    Login,
    Payment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub hotel_id: String,
}

impl BookingSelection {
    pub fn new(hotel_id: impl Into<String>) -> Self {
        Self {
            hotel_id: hotel_id.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hotel_id.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormState {
    pub error: Option<ValidationError>,
    pub password_visible: bool,
}

// Visibility and required flag of the card inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFieldsView {
    pub visible: bool,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFormState {
    pub method: Option<PaymentMethod>,
    pub field_errors: BTreeMap<CardField, ValidationError>,
    pub summary: Option<String>,
}

impl PaymentFormState {
    // Re-selecting is harmless: the card flags are derived from the method
    // alone, never accumulated.
    pub fn select(&mut self, method: PaymentMethod) {
        self.method = Some(method);
    }

    pub fn card_fields(&self) -> CardFieldsView {
        let card = self.method.map_or(false, |m| m.requires_card());
        CardFieldsView {
            visible: card,
            required: card,
        }
    }

    pub fn clear_errors(&mut self) {
        self.field_errors.clear();
        self.summary = None;
    }

    pub fn record_errors(&mut self, errors: &FieldErrors) {
        self.field_errors = errors
            .iter()
            .map(|(field, error)| (field, error.clone()))
            .collect();
        self.summary = Some(errors.summary().to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewForm {
    pub reviewer_name: String,
    pub rating: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub session: SessionState,
    pub login_overlay_visible: bool,
    pub payment_overlay_visible: bool,
    pub login: LoginFormState,
    pub booking: BookingSelection,
    pub payment: PaymentFormState,
    pub review: ReviewForm,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_view(&self) -> SessionView {
        SessionView::derive(&self.session)
    }

    pub fn set_logged_in(&mut self, logged_in: bool) {
        self.session.is_logged_in = logged_in;
    }

    pub fn overlay_visible(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::Login => self.login_overlay_visible,
            Overlay::Payment => self.payment_overlay_visible,
        }
    }

    pub fn set_overlay(&mut self, overlay: Overlay, visible: bool) {
        match overlay {
            Overlay::Login => self.login_overlay_visible = visible,
            Overlay::Payment => self.payment_overlay_visible = visible,
        }
    }
}
