// Rendering adapter: writes `UiState` onto a surface and applies effects.
// Rendering the whole state is idempotent, so it runs after every event.

use tracing::trace;

use crate::effect::Effect;
use crate::error::{CardField, SurfaceError};
use crate::notifier::NotificationId;
use crate::scheduler::Scheduler;
use crate::state::UiState;
use crate::surface::{MemorySurface, Surface};

// Element ids on the booking page
pub mod ids {
    pub const LOGIN_MODAL: &str = "login-modal";
    pub const LOGIN_BUTTON: &str = "login-btn";
    pub const LOGIN_FORM: &str = "login-form";
    pub const LOGIN_EMAIL: &str = "login-email";
    pub const LOGIN_PASSWORD: &str = "login-password";
    pub const LOGIN_ERROR: &str = "login-error-message";
    pub const LOGIN_PROMPT: &str = "login-prompt";
    pub const PASSWORD_TOGGLE: &str = "togglePassword";
    pub const LOGGED_IN_MARKER: &str = "is-logged-in";

    pub const BOOKING_FORM: &str = "booking-form";
    pub const HOTEL_SELECT: &str = "hotel-select";

    pub const PAYMENT_MODAL: &str = "payment-modal";
    pub const PAYMENT_FORM: &str = "payment-form";
    pub const PAYMENT_ERROR: &str = "payment-error-message";
    pub const CARD_DETAILS: &str = "card-details";
    pub const CARD_NUMBER: &str = "card-number";
    pub const CARD_EXPIRY: &str = "card-expiry";
    pub const CARD_CVV: &str = "card-cvv";
    pub const CARD_NUMBER_ERROR: &str = "card-number-error";
    pub const EXPIRY_ERROR: &str = "expiry-error";
    pub const CVV_ERROR: &str = "cvv-error";

    pub const REVIEW_FORM: &str = "review-form";
    pub const REVIEW_NAME: &str = "review-name";
    pub const REVIEW_RATING: &str = "review-rating";
    pub const REVIEW_COMMENT: &str = "review-comment";

    pub const MESSAGE_AREA: &str = "system-message-area";

    pub const ALL: &[&str] = &[
        LOGIN_MODAL,
        LOGIN_BUTTON,
        LOGIN_FORM,
        LOGIN_EMAIL,
        LOGIN_PASSWORD,
        LOGIN_ERROR,
        LOGIN_PROMPT,
        PASSWORD_TOGGLE,
        LOGGED_IN_MARKER,
        BOOKING_FORM,
        HOTEL_SELECT,
        PAYMENT_MODAL,
        PAYMENT_FORM,
        PAYMENT_ERROR,
        CARD_DETAILS,
        CARD_NUMBER,
        CARD_EXPIRY,
        CARD_CVV,
        CARD_NUMBER_ERROR,
        EXPIRY_ERROR,
        CVV_ERROR,
        REVIEW_FORM,
        REVIEW_NAME,
        REVIEW_RATING,
        REVIEW_COMMENT,
        MESSAGE_AREA,
    ];
}

pub const MESSAGE_CLASS: &str = "on-screen-message";
pub const MESSAGE_SHOW_CLASS: &str = "show";

// Memory surface holding every element of the booking page
pub fn booking_page() -> MemorySurface {
    MemorySurface::with_elements(ids::ALL.iter().copied())
}

pub fn message_element_id(id: NotificationId) -> String {
    format!("message-{}", id)
}

fn card_error_element(field: CardField) -> &'static str {
    match field {
        CardField::Number => ids::CARD_NUMBER_ERROR,
        CardField::Expiry => ids::EXPIRY_ERROR,
        CardField::Cvv => ids::CVV_ERROR,
    }
}

pub fn render_state<S: Surface + ?Sized>(state: &UiState, surface: &mut S) -> Result<(), SurfaceError> {
    let session = state.session_view();
    surface.set_visible(ids::BOOKING_FORM, session.booking_form_visible)?;
    surface.set_visible(ids::LOGIN_PROMPT, session.login_prompt_visible)?;
    surface.set_text(ids::LOGIN_BUTTON, session.login_button_label)?;
    surface.set_value(ids::LOGGED_IN_MARKER, session.logged_in_marker)?;

    surface.set_visible(ids::LOGIN_MODAL, state.login_overlay_visible)?;
    surface.set_visible(ids::PAYMENT_MODAL, state.payment_overlay_visible)?;

    let login_error = state
        .login
        .error
        .as_ref()
        .map(|e| e.to_string())
        .unwrap_or_default();
    surface.set_text(ids::LOGIN_ERROR, &login_error)?;

    let password_visible = state.login.password_visible;
    surface.set_attribute(
        ids::LOGIN_PASSWORD,
        "type",
        if password_visible { "text" } else { "password" },
    )?;
    surface.set_class(ids::PASSWORD_TOGGLE, "fa-eye", !password_visible)?;
    surface.set_class(ids::PASSWORD_TOGGLE, "fa-eye-slash", password_visible)?;

    surface.set_value(ids::HOTEL_SELECT, &state.booking.hotel_id)?;

    let card_fields = state.payment.card_fields();
    surface.set_visible(ids::CARD_DETAILS, card_fields.visible)?;
    for input in [ids::CARD_NUMBER, ids::CARD_EXPIRY, ids::CARD_CVV] {
        surface.set_required(input, card_fields.required)?;
    }
    for field in [CardField::Number, CardField::Expiry, CardField::Cvv] {
        let text = state
            .payment
            .field_errors
            .get(&field)
            .map(|e| e.to_string())
            .unwrap_or_default();
        surface.set_text(card_error_element(field), &text)?;
    }
    surface.set_text(
        ids::PAYMENT_ERROR,
        state.payment.summary.as_deref().unwrap_or(""),
    )?;

    surface.set_value(ids::REVIEW_NAME, &state.review.reviewer_name)?;
    surface.set_value(ids::REVIEW_RATING, &state.review.rating)?;
    surface.set_value(ids::REVIEW_COMMENT, &state.review.comment)?;

    Ok(())
}

pub fn apply_effect<S, T>(effect: Effect, surface: &mut S, scheduler: &mut T) -> Result<(), SurfaceError>
where
    S: Surface + ?Sized,
    T: Scheduler + ?Sized,
{
    trace!("Applying effect: {:?}", effect);
    match effect {
        Effect::AppendMessage { id, text, severity } => {
            let severity_class = format!("message-{}", severity.as_str());
            surface.append_child(
                ids::MESSAGE_AREA,
                &message_element_id(id),
                &[MESSAGE_CLASS, severity_class.as_str()],
                &text,
            )
        }
        Effect::SetMessageVisible { id, visible } => {
            surface.set_class(&message_element_id(id), MESSAGE_SHOW_CLASS, visible)
        }
        Effect::RemoveMessage { id } => surface.remove_element(&message_element_id(id)),
        Effect::Schedule { after, timer } => {
            scheduler.schedule(after, timer);
            Ok(())
        }
    }
}
