// Command handler for the booking page. Every user action or timer becomes
// an `Event`; `handle` runs it to completion against `UiState` and returns
// the effects the rendering layer still has to apply.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::booking::{check_admission, BookingFlowController};
use crate::clock::{Clock, SystemClock, YearMonth};
use crate::config::PortalConfig;
use crate::effect::Effect;
use crate::notifier::{MessageNotifier, Notification};
use crate::payment::{CardDetails, PaymentMethod, PaymentValidator};
use crate::review::submit_review;
use crate::scheduler::Timer;
use crate::session::SessionGate;
use crate::state::{BookingSelection, Overlay, ReviewForm, UiState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    LoginButtonClicked,
    LoginSubmitted {
        email: String,
        password: String,
    },
    CloseClicked(Overlay),
    // `None` when the click landed outside every overlay background
    BackgroundClicked(Option<Overlay>),
    PasswordToggleClicked,
    HotelSelected(String),
    BookingSubmitted(BookingSelection),
    PaymentMethodChanged(PaymentMethod),
    PaymentSubmitted {
        method: PaymentMethod,
        #[serde(default)]
        card: CardDetails,
    },
    ReviewEdited(ReviewForm),
    ReviewSubmitted(ReviewForm),
    TimerFired(Timer),
}

pub struct BookingPortal {
    config: PortalConfig,
    state: UiState,
    notifier: MessageNotifier,
    clock: Box<dyn Clock>,
}

impl BookingPortal {
    pub fn new(config: PortalConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: PortalConfig, clock: Box<dyn Clock>) -> Self {
        let notifier = MessageNotifier::new(config.notifications.clone());
        Self {
            config,
            state: UiState::new(),
            notifier,
            clock,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn notifier(&self) -> &MessageNotifier {
        &self.notifier
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        debug!("Handling event: {:?}", event);
        match event {
            Event::LoginButtonClicked => self.on_login_button(),
            Event::LoginSubmitted { email, password } => {
                let gate = SessionGate::new(&self.config.credentials);
                match gate.login(&mut self.state, &email, &password) {
                    Ok(notification) => self.notifier.notify(notification),
                    // Rendered inline next to the login form
                    Err(_) => Vec::new(),
                }
            }
            Event::CloseClicked(overlay) => {
                self.state.set_overlay(overlay, false);
                Vec::new()
            }
            Event::BackgroundClicked(target) => {
                if let Some(overlay) = target {
                    self.state.set_overlay(overlay, false);
                }
                Vec::new()
            }
            Event::PasswordToggleClicked => {
                self.state.login.password_visible = !self.state.login.password_visible;
                Vec::new()
            }
            Event::HotelSelected(hotel_id) => {
                self.state.booking = BookingSelection::new(hotel_id);
                Vec::new()
            }
            Event::BookingSubmitted(selection) => {
                match BookingFlowController::submit_booking(&mut self.state, selection) {
                    Ok(()) => Vec::new(),
                    Err(e) => self.notifier.notify(Notification::error(e.to_string())),
                }
            }
            Event::PaymentMethodChanged(method) => {
                PaymentValidator::select_method(&mut self.state, method);
                Vec::new()
            }
            Event::PaymentSubmitted { method, card } => self.on_payment(method, &card),
            Event::ReviewEdited(form) => {
                self.state.review = form;
                Vec::new()
            }
            Event::ReviewSubmitted(form) => {
                let notification = submit_review(&mut self.state, form);
                self.notifier.notify(notification)
            }
            Event::TimerFired(timer) => self.notifier.on_timer(timer),
        }
    }

    fn on_login_button(&mut self) -> Vec<Effect> {
        let gate = SessionGate::new(&self.config.credentials);
        match gate.logout(&mut self.state) {
            Some(notification) => self.notifier.notify(notification),
            None => {
                self.state.set_overlay(Overlay::Login, true);
                Vec::new()
            }
        }
    }

    fn on_payment(&mut self, method: PaymentMethod, card: &CardDetails) -> Vec<Effect> {
        // The payment overlay may outlive the conditions that opened it
        // (e.g. a logout in between), so admission is checked again.
        if let Err(e) = check_admission(&self.state.session, &self.state.booking) {
            warn!("Payment submitted without booking admission: {:?}", e);
            self.state.set_overlay(Overlay::Payment, false);
            return self.notifier.notify(Notification::error(e.to_string()));
        }

        let today = YearMonth::of(self.clock.today());
        match PaymentValidator::submit_payment(&mut self.state, method, Some(card), today) {
            Ok(notification) => self.notifier.notify(notification),
            // Field errors and summary are rendered inline
            Err(_) => Vec::new(),
        }
    }
}
