// Side effects produced by event handlers. State changes live in `UiState`;
// effects cover what state alone cannot describe: message elements coming
// and going, and timers to arm.

use std::time::Duration;

use crate::notifier::{NotificationId, Severity};
use crate::scheduler::Timer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AppendMessage {
        id: NotificationId,
        text: String,
        severity: Severity,
    },
    SetMessageVisible {
        id: NotificationId,
        visible: bool,
    },
    RemoveMessage {
        id: NotificationId,
    },
    Schedule {
        after: Duration,
        timer: Timer,
    },
}
