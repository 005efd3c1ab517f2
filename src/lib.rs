// Booking page controller: login gate, booking and payment validation,
// review submission and transient status messages

pub mod app;
pub mod booking;
pub mod clock;
pub mod config;
pub mod effect;
pub mod error;
pub mod notifier;
pub mod payment;
pub mod portal;
pub mod render;
pub mod review;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod surface;

// Re-export key types for convenience
pub use app::BookingApp;
pub use booking::BookingFlowController;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CredentialPolicy, NotificationTimings, PortalConfig};
pub use effect::Effect;
pub use error::{CardField, ConfigError, FieldErrors, SurfaceError, ValidationError};
pub use notifier::{MessageNotifier, Notification, NotificationId, Phase, Severity};
pub use payment::{CardDetails, Confirmation, PaymentMethod, PaymentValidator};
pub use portal::{BookingPortal, Event};
pub use scheduler::{ManualScheduler, Scheduler, Timer, TimerKind};
pub use session::SessionGate;
pub use state::{BookingSelection, Overlay, ReviewForm, SessionState, SessionView, UiState};
pub use surface::{MemorySurface, Surface};
