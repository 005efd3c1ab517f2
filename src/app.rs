// Ties the portal to a surface and a scheduler: dispatch an event, render
// the new state, apply the effects.

use std::time::Duration;

use tracing::debug;

use crate::config::PortalConfig;
use crate::error::SurfaceError;
use crate::portal::{BookingPortal, Event};
use crate::render::{apply_effect, render_state};
use crate::scheduler::{ManualScheduler, Scheduler};
use crate::surface::Surface;

pub struct BookingApp<S: Surface, T: Scheduler> {
    portal: BookingPortal,
    surface: S,
    scheduler: T,
}

impl<S: Surface, T: Scheduler> BookingApp<S, T> {
    // Renders the initial logged-out page
    pub fn new(portal: BookingPortal, surface: S, scheduler: T) -> Result<Self, SurfaceError> {
        let mut app = Self {
            portal,
            surface,
            scheduler,
        };
        render_state(app.portal.state(), &mut app.surface)?;
        Ok(app)
    }

    pub fn dispatch(&mut self, event: Event) -> Result<(), SurfaceError> {
        let effects = self.portal.handle(event);
        render_state(self.portal.state(), &mut self.surface)?;
        for effect in effects {
            apply_effect(effect, &mut self.surface, &mut self.scheduler)?;
        }
        Ok(())
    }

    pub fn portal(&self) -> &BookingPortal {
        &self.portal
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }
}

impl<S: Surface> BookingApp<S, ManualScheduler> {
    pub fn with_config(config: PortalConfig, surface: S) -> Result<Self, SurfaceError> {
        Self::new(BookingPortal::new(config), surface, ManualScheduler::new())
    }

    // Move the virtual clock forward, firing every timer that falls due,
    // including ones armed by timers fired along the way
    pub fn advance(&mut self, by: Duration) -> Result<usize, SurfaceError> {
        let deadline = self.scheduler.now() + by;
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            self.dispatch(Event::TimerFired(timer))?;
            fired += 1;
        }
        self.scheduler.settle(deadline);
        debug!("Advanced clock to {:?}, {} timer(s) fired", deadline, fired);
        Ok(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::notifier::{NotificationId, Phase};
    use crate::payment::{CardDetails, PaymentMethod};
    use crate::render::{booking_page, ids, MESSAGE_SHOW_CLASS};
    use crate::state::{BookingSelection, ReviewForm};
    use crate::surface::MemorySurface;
    use chrono::NaiveDate;

    fn app() -> BookingApp<MemorySurface, ManualScheduler> {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let portal = BookingPortal::with_clock(PortalConfig::default(), Box::new(FixedClock(today)));
        BookingApp::new(portal, booking_page(), ManualScheduler::new()).unwrap()
    }

    fn login(app: &mut BookingApp<MemorySurface, ManualScheduler>) {
        app.dispatch(Event::LoginButtonClicked).unwrap();
        app.dispatch(Event::LoginSubmitted {
            email: "user@example.com".to_string(),
            password: "longenough1".to_string(),
        })
        .unwrap();
    }

    #[test]
    fn test_full_booking_journey() {
        let mut app = app();
        assert!(!app.surface().element(ids::BOOKING_FORM).unwrap().visible);

        login(&mut app);
        assert!(app.surface().element(ids::BOOKING_FORM).unwrap().visible);
        assert!(!app.surface().element(ids::LOGIN_MODAL).unwrap().visible);

        app.dispatch(Event::HotelSelected("hotel1".to_string())).unwrap();
        app.dispatch(Event::BookingSubmitted(BookingSelection::new("hotel1")))
            .unwrap();
        assert!(app.surface().element(ids::PAYMENT_MODAL).unwrap().visible);

        app.dispatch(Event::PaymentMethodChanged(PaymentMethod::DebitCard))
            .unwrap();
        assert!(app.surface().element(ids::CARD_DETAILS).unwrap().visible);
        assert!(app.surface().element(ids::CARD_NUMBER).unwrap().required);

        app.dispatch(Event::PaymentSubmitted {
            method: PaymentMethod::DebitCard,
            card: CardDetails {
                number: "123".to_string(),
                expiry: "13/25".to_string(),
                cvv: "999".to_string(),
            },
        })
        .unwrap();
        let surface = app.surface();
        assert_eq!(
            surface.element(ids::CARD_NUMBER_ERROR).unwrap().text,
            "Card number must be 16 digits long."
        );
        assert_eq!(
            surface.element(ids::EXPIRY_ERROR).unwrap().text,
            "Format must be MM/YY."
        );
        assert_eq!(surface.element(ids::CVV_ERROR).unwrap().text, "");
        assert_eq!(
            surface.element(ids::PAYMENT_ERROR).unwrap().text,
            "Please correct the errors in the card details above."
        );
        assert!(surface.element(ids::PAYMENT_MODAL).unwrap().visible);

        app.dispatch(Event::PaymentSubmitted {
            method: PaymentMethod::DebitCard,
            card: CardDetails {
                number: "4111 1111 1111 1111".to_string(),
                expiry: "08/26".to_string(),
                cvv: "999".to_string(),
            },
        })
        .unwrap();
        let surface = app.surface();
        assert!(!surface.element(ids::PAYMENT_MODAL).unwrap().visible);
        assert_eq!(surface.element(ids::PAYMENT_ERROR).unwrap().text, "");
        assert_eq!(surface.element(ids::CARD_NUMBER_ERROR).unwrap().text, "");

        // Welcome and confirmation banners
        assert_eq!(surface.children(ids::MESSAGE_AREA).len(), 2);
        let last = surface.children(ids::MESSAGE_AREA)[1].clone();
        assert_eq!(
            surface.element(&last).unwrap().text,
            "Booking confirmed! Payment processed with Debit Card."
        );
    }

    #[test]
    fn test_messages_are_shown_then_removed() {
        let mut app = app();
        app.dispatch(Event::ReviewSubmitted(ReviewForm::default()))
            .unwrap();

        let message = "message-0";
        assert!(!app.surface().element(message).unwrap().has_class(MESSAGE_SHOW_CLASS));

        app.advance(Duration::from_millis(10)).unwrap();
        assert!(app.surface().element(message).unwrap().has_class(MESSAGE_SHOW_CLASS));

        app.advance(Duration::from_millis(4990)).unwrap();
        assert!(!app.surface().element(message).unwrap().has_class(MESSAGE_SHOW_CLASS));
        assert!(app.surface().element(message).is_some());

        app.advance(Duration::from_millis(500)).unwrap();
        assert!(app.surface().element(message).is_none());
        assert_eq!(
            app.portal().notifier().phase(NotificationId(0)),
            Some(Phase::Removed)
        );
    }

    #[test]
    fn test_single_advance_runs_whole_lifecycle() {
        let mut app = app();
        app.dispatch(Event::BookingSubmitted(BookingSelection::new("hotel1")))
            .unwrap();
        app.dispatch(Event::BookingSubmitted(BookingSelection::new("hotel1")))
            .unwrap();
        assert_eq!(app.surface().children(ids::MESSAGE_AREA).len(), 2);

        // show, hide and remove for each of the two messages
        let fired = app.advance(Duration::from_secs(60)).unwrap();
        assert_eq!(fired, 6);
        assert!(app.surface().children(ids::MESSAGE_AREA).is_empty());
        assert_eq!(app.portal().notifier().active_count(), 0);
        assert_eq!(app.scheduler().pending(), 0);
    }

    #[test]
    fn test_review_form_is_cleared_on_submit() {
        let mut app = app();
        let draft = ReviewForm {
            reviewer_name: "Ann".to_string(),
            rating: "5".to_string(),
            comment: "Great breakfast".to_string(),
        };
        app.dispatch(Event::ReviewEdited(draft.clone())).unwrap();
        assert_eq!(app.surface().element(ids::REVIEW_COMMENT).unwrap().value, "Great breakfast");

        app.dispatch(Event::ReviewSubmitted(draft)).unwrap();
        assert_eq!(app.surface().element(ids::REVIEW_NAME).unwrap().value, "");
        assert_eq!(app.surface().element(ids::REVIEW_RATING).unwrap().value, "");
        assert_eq!(app.surface().element(ids::REVIEW_COMMENT).unwrap().value, "");
    }
}
