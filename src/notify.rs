//! Notification seam between controllers and the surrounding UI.
//!
//! Controllers never return errors to their callers; every outcome a
//! user should see becomes a [`Notice`] pushed through a [`Notifier`].
//! The bundled [`ChannelNotifier`] forwards notices over a bounded
//! channel that the presentation layer drains, the way a toast queue
//! consumes them.

use tokio::sync::mpsc;

/// A user-visible outcome message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The operation completed; show a confirmation.
    Success(String),
    /// The operation failed; show an error.
    Failure(String),
}

impl Notice {
    /// The message text, regardless of kind.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Failure(msg) => msg,
        }
    }
}

/// Sink for user-visible outcome messages.
///
/// Implementations must be cheap and non-blocking: controllers call
/// these inline on their own task.
pub trait Notifier: Send + Sync {
    /// Report a successful operation.
    fn notify_success(&self, message: &str);

    /// Report a failed operation.
    fn notify_failure(&self, message: &str);
}

/// [`Notifier`] that forwards notices over a bounded mpsc channel.
///
/// When the channel is full the notice is dropped with a warning rather
/// than blocking the controller.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<Notice>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver the presentation layer should
    /// drain.
    #[must_use]
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<Notice>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    fn push(&self, notice: Notice) {
        if let Err(e) = self.tx.try_send(notice) {
            tracing::warn!(error = %e, "notice dropped, receiver full or gone");
        }
    }
}

impl Notifier for ChannelNotifier {
    fn notify_success(&self, message: &str) {
        self.push(Notice::Success(message.to_string()));
    }

    fn notify_failure(&self, message: &str) {
        self.push(Notice::Failure(message.to_string()));
    }
}
