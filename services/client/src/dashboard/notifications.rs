//! services/client/src/dashboard/notifications.rs
//!
//! The transient notification slot. Every action reports its outcome here
//! instead of propagating errors; a newer notification replaces the current
//! one and each disappears on its own once the time-to-live has passed.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    shown_at: Instant,
}

#[derive(Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Option<Notification>>>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        let message = message.into();
        match kind {
            NotificationKind::Success => info!(notification = %message),
            NotificationKind::Error => warn!(notification = %message),
        }
        *self.lock() = Some(Notification {
            message,
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn hide(&self) {
        *self.lock() = None;
    }

    /// The live notification, if any. Expired ones are dismissed here.
    pub fn current(&self) -> Option<Notification> {
        self.current_at(Instant::now())
    }

    fn current_at(&self, now: Instant) -> Option<Notification> {
        let mut slot = self.lock();
        let expired = slot
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= self.ttl);
        if expired {
            *slot = None;
        }
        slot.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Notification>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
