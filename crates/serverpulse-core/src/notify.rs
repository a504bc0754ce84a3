//! Outbound alert notification.
//!
//! Delivery is fire-and-forget: [`Notifier::send`] reports success as a
//! bool and must never panic or propagate an error into the tick loop.

/// Fire-and-forget notification collaborator (email or similar).
pub trait Notifier: Send + Sync {
    /// Deliver a message. Returns `true` on success.
    fn send(&self, to: &str, subject: &str, body: &str) -> bool;
}

/// Notifier that writes to the log instead of a real transport.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        log::info!("notify {to}: {subject} — {body}");
        true
    }
}

/// Notifier for deployments without a configured transport: skips delivery
/// with a log line and reports failure.
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn send(&self, to: &str, subject: &str, _body: &str) -> bool {
        log::info!("notify skipped ({to}: {subject}) — no transport configured");
        false
    }
}
