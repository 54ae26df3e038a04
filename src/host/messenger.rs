//! User-facing notifications

/// Fire-and-forget sink for messages shown to the user
pub trait Messenger {
    fn show_failure(&self, title: &str, message: &str);
}

/// Messenger that routes notifications into the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMessenger;

impl Messenger for TracingMessenger {
    fn show_failure(&self, title: &str, message: &str) {
        tracing::warn!("{}: {}", title, message);
    }
}
