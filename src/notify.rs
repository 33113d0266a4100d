//! Transient toast notifications.
//!
//! Only one notification is visible at a time. Each `show` schedules a
//! dismissal task on the tokio runtime; a newer notification aborts the
//! previous task, and the generation check drops any tick that raced the
//! abort.

use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Success!",
            Self::Error => "Error!",
            Self::Warning => "Warning!",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

pub struct Notifier {
    current: Option<Notification>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    ttl: Duration,
    dismiss_tx: UnboundedSender<u64>,
}

impl Notifier {
    /// Create a notifier plus the receiver the event loop listens on for
    /// expired generations.
    pub fn new(ttl: Duration) -> (Self, UnboundedReceiver<u64>) {
        let (dismiss_tx, dismiss_rx) = unbounded_channel();
        (
            Self {
                current: None,
                generation: 0,
                pending: None,
                ttl,
                dismiss_tx,
            },
            dismiss_rx,
        )
    }

    /// Replace whatever is showing. Must be called from within a tokio runtime.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.cancel_pending();
        self.generation += 1;
        let message = message.into();
        tracing::debug!(generation = self.generation, ?kind, %message, "notification shown");
        self.current = Some(Notification {
            message,
            kind,
            shown_at: Instant::now(),
        });

        let generation = self.generation;
        let ttl = self.ttl;
        let tx = self.dismiss_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            // receiver gone means the app is shutting down
            let _ = tx.send(generation);
        }));
    }

    /// Handle an expiry tick. Returns true if the visible notification was cleared.
    pub fn on_dismiss(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        self.pending = None;
        true
    }

    /// Close the visible notification right away.
    pub fn dismiss(&mut self) {
        self.cancel_pending();
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Share of the lifetime left, from 1.0 down to 0.0.
    pub fn remaining_fraction(&self, now: Instant) -> f64 {
        match &self.current {
            Some(n) if !self.ttl.is_zero() => {
                let elapsed = now.saturating_duration_since(n.shown_at);
                (1.0 - elapsed.as_secs_f64() / self.ttl.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_after_ttl() {
        let (mut notifier, mut rx) = Notifier::new(DEFAULT_TTL);
        let start = Instant::now();
        notifier.show("CRM System added to favorites", NotificationKind::Success);
        assert!(notifier.current().is_some());

        let generation = rx.recv().await.unwrap();
        assert!(start.elapsed() >= DEFAULT_TTL);
        assert!(notifier.on_dismiss(generation));
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_timer_does_not_dismiss_successor() {
        let (mut notifier, mut rx) = Notifier::new(DEFAULT_TTL);
        let start = Instant::now();
        notifier.show("first", NotificationKind::Info);
        tokio::time::sleep(Duration::from_secs(3)).await;
        notifier.show("second", NotificationKind::Warning);

        // the first task was aborted, so the next tick belongs to "second"
        let generation = rx.recv().await.unwrap();
        assert_eq!(generation, 2);
        assert!(start.elapsed() >= Duration::from_secs(7));
        assert!(notifier.on_dismiss(generation));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_generation_is_ignored() {
        let (mut notifier, _rx) = Notifier::new(DEFAULT_TTL);
        notifier.show("first", NotificationKind::Info);
        notifier.show("second", NotificationKind::Info);
        assert!(!notifier.on_dismiss(1));
        assert_eq!(notifier.current().unwrap().message, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss() {
        let (mut notifier, _rx) = Notifier::new(DEFAULT_TTL);
        notifier.show("bye", NotificationKind::Error);
        notifier.dismiss();
        assert!(notifier.current().is_none());
        // late tick after a manual close is a no-op
        assert!(!notifier.on_dismiss(notifier.generation()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_remaining_fraction_counts_down() {
        let (mut notifier, _rx) = Notifier::new(DEFAULT_TTL);
        assert_eq!(notifier.remaining_fraction(Instant::now()), 0.0);
        notifier.show("tick", NotificationKind::Info);
        let shown = notifier.current().unwrap().shown_at;
        assert_eq!(notifier.remaining_fraction(shown), 1.0);
        let half = notifier.remaining_fraction(shown + Duration::from_secs(2));
        assert!((half - 0.5).abs() < 1e-9);
        assert_eq!(notifier.remaining_fraction(shown + Duration::from_secs(10)), 0.0);
    }

    #[test]
    fn test_kind_titles() {
        assert_eq!(NotificationKind::Success.title(), "Success!");
        assert_eq!(NotificationKind::Info.title(), "Info");
    }
}
