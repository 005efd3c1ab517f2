// Gate between the booking form and the payment overlay

use tracing::{debug, info};

use crate::error::ValidationError;
use crate::state::{BookingSelection, Overlay, SessionState, UiState};

// Login is checked before the hotel selection
pub fn check_admission(
    session: &SessionState,
    selection: &BookingSelection,
) -> Result<(), ValidationError> {
    if !session.is_logged_in {
        return Err(ValidationError::NotAuthenticated);
    }
    if selection.is_empty() {
        return Err(ValidationError::NoHotelSelected);
    }
    Ok(())
}

pub struct BookingFlowController;

impl BookingFlowController {
    pub fn submit_booking(
        state: &mut UiState,
        selection: BookingSelection,
    ) -> Result<(), ValidationError> {
        state.booking = selection;

        if let Err(e) = check_admission(&state.session, &state.booking) {
            debug!("Booking refused: {:?}", e);
            return Err(e);
        }

        info!("Booking admitted for hotel {}", state.booking.hotel_id);
        state.set_overlay(Overlay::Payment, true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_out_is_refused_regardless_of_hotel() {
        for hotel in ["", "hotel1"] {
            let mut state = UiState::new();
            let result = BookingFlowController::submit_booking(&mut state, BookingSelection::new(hotel));
            assert_eq!(result, Err(ValidationError::NotAuthenticated));
            assert!(!state.payment_overlay_visible);
        }
    }

    #[test]
    fn test_empty_hotel_is_refused() {
        let mut state = UiState::new();
        state.set_logged_in(true);

        let result = BookingFlowController::submit_booking(&mut state, BookingSelection::default());
        assert_eq!(result, Err(ValidationError::NoHotelSelected));
        assert!(!state.payment_overlay_visible);
    }

    #[test]
    fn test_admission_opens_payment_only() {
        let mut state = UiState::new();
        state.set_logged_in(true);
        let before = state.clone();

        BookingFlowController::submit_booking(&mut state, BookingSelection::new("hotel1")).unwrap();

        assert!(state.payment_overlay_visible);
        assert_eq!(state.session, before.session);
        assert_eq!(state.payment, before.payment);
        assert_eq!(state.login_overlay_visible, before.login_overlay_visible);
    }
}
