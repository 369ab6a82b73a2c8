//! Single-slot notification banner with auto-expiry.
//!
//! A message stays visible for [`NOTIFICATION_TTL`] after its last `show`.
//! Showing a new message replaces the old one and restarts the countdown; the
//! previous expiry task is aborted, and a generation check keeps a task that
//! already woke up from clearing the newer message.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::Instant,
};
use tracing::debug;

const NOTIFICATION_TTL_MS: u64 = 5000;
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(NOTIFICATION_TTL_MS);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Shown(String),
    Cleared,
}

#[derive(Default)]
struct NotificationState {
    current: Option<Notification>,
    generation: u64,
    expiry: Option<JoinHandle<()>>,
}

/// Cheap to clone; clones share the same banner.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Mutex<NotificationState>>,
    events: broadcast::Sender<NotificationEvent>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(Mutex::new(NotificationState::default())),
            events,
        }
    }

    /// Must be called from within a tokio runtime: the expiry is a spawned task.
    /// Blank text clears the banner at once.
    pub async fn show(&self, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.inner.lock().await;
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;

        if let Some(previous) = state.expiry.take() {
            previous.abort();
        }

        if text.trim().is_empty() {
            let was_active = state.current.take().is_some();
            drop(state);
            if was_active {
                debug!("notification: cleared");
                let _ = self.events.send(NotificationEvent::Cleared);
            }
            return;
        }

        state.current = Some(Notification {
            text: text.clone(),
            expires_at: Utc::now() + chrono::Duration::milliseconds(NOTIFICATION_TTL_MS as i64),
        });

        let deadline = Instant::now() + NOTIFICATION_TTL;
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        state.expiry = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut state = inner.lock().await;
            if state.generation != generation {
                return;
            }
            state.current = None;
            state.expiry = None;
            drop(state);
            debug!("notification: expired");
            let _ = events.send(NotificationEvent::Cleared);
        }));
        drop(state);

        debug!(text = %text, "notification: shown");
        let _ = self.events.send(NotificationEvent::Shown(text));
    }

    /// Current banner text; empty when idle.
    pub async fn text(&self) -> String {
        self.inner
            .lock()
            .await
            .current
            .as_ref()
            .map(|notification| notification.text.clone())
            .unwrap_or_default()
    }

    pub async fn current(&self) -> Option<Notification> {
        self.inner.lock().await.current.clone()
    }

    pub async fn is_active(&self) -> bool {
        self.inner.lock().await.current.is_some()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/notification_tests.rs"]
mod tests;
