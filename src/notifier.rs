// Transient status messages. Each notification walks a fixed lifecycle
// driven by timers; nothing can cancel it once created.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::NotificationTimings;
use crate::effect::Effect;
use crate::scheduler::{Timer, TimerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Visible,
    Hiding,
    Removed,
}

#[derive(Debug)]
struct ActiveNotification {
    notification: Notification,
    phase: Phase,
}

#[derive(Debug)]
pub struct MessageNotifier {
    timings: NotificationTimings,
    next_id: u64,
    active: BTreeMap<NotificationId, ActiveNotification>,
}

impl MessageNotifier {
    pub fn new(timings: NotificationTimings) -> Self {
        Self {
            timings,
            next_id: 0,
            active: BTreeMap::new(),
        }
    }

    // Append a message and schedule its show and hide timers. Existing
    // messages are left alone, even identical ones.
    pub fn notify(&mut self, notification: Notification) -> Vec<Effect> {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        debug!(
            "Notification {} created ({}): {}",
            id,
            notification.severity.as_str(),
            notification.text
        );

        let effects = vec![
            Effect::AppendMessage {
                id,
                text: notification.text.clone(),
                severity: notification.severity,
            },
            Effect::Schedule {
                after: self.timings.show_delay(),
                timer: Timer::new(id, TimerKind::Show),
            },
            Effect::Schedule {
                after: self.timings.display(),
                timer: Timer::new(id, TimerKind::Hide),
            },
        ];

        self.active.insert(
            id,
            ActiveNotification {
                notification,
                phase: Phase::Created,
            },
        );

        effects
    }

    pub fn on_timer(&mut self, timer: Timer) -> Vec<Effect> {
        let id = timer.notification;
        let Some(entry) = self.active.get_mut(&id) else {
            // A late Show can outlive its message when the show delay exceeds
            // the display and fade-out time.
            if id.0 < self.next_id {
                debug!("Ignoring {:?} timer for removed notification {}", timer.kind, id);
            } else {
                warn!("Timer {:?} fired for unknown notification {}", timer.kind, id);
            }
            return Vec::new();
        };

        match (timer.kind, entry.phase) {
            (TimerKind::Show, Phase::Created) => {
                entry.phase = Phase::Visible;
                debug!("Notification {} visible", id);
                vec![Effect::SetMessageVisible { id, visible: true }]
            }
            // Hide can overtake Show when the display time is shorter than
            // the show delay; a hidden message must stay hidden.
            (TimerKind::Show, _) => Vec::new(),
            (TimerKind::Hide, Phase::Created | Phase::Visible) => {
                entry.phase = Phase::Hiding;
                debug!("Notification {} hiding", id);
                vec![
                    Effect::SetMessageVisible { id, visible: false },
                    Effect::Schedule {
                        after: self.timings.fade_out(),
                        timer: Timer::new(id, TimerKind::Remove),
                    },
                ]
            }
            (TimerKind::Remove, Phase::Hiding) => {
                self.active.remove(&id);
                debug!("Notification {} removed", id);
                vec![Effect::RemoveMessage { id }]
            }
            (kind, phase) => {
                warn!(
                    "Ignoring {:?} timer for notification {} in phase {:?}",
                    kind, id, phase
                );
                Vec::new()
            }
        }
    }

    pub fn phase(&self, id: NotificationId) -> Option<Phase> {
        match self.active.get(&id) {
            Some(entry) => Some(entry.phase),
            None if id.0 < self.next_id => Some(Phase::Removed),
            None => None,
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn active(&self) -> impl Iterator<Item = (NotificationId, &Notification)> {
        self.active
            .iter()
            .map(|(id, entry)| (*id, &entry.notification))
    }
}
