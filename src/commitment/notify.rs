use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// `channel()` creates the single-slot wakeup signal between a `CommitmentTracker` and whoever
/// applies committed entries.
///
/// The signal doesn't carry the commit index and it isn't a counter. Multiple advances between
/// two wakeups collapse into one, so the listener must re-read `commit_index()` every time it
/// wakes up.
pub fn channel() -> (CommitNotifier, CommitListener) {
    let (sender, receiver) = mpsc::channel(1);

    (CommitNotifier { sender }, CommitListener { receiver })
}

#[derive(Clone)]
pub struct CommitNotifier {
    sender: mpsc::Sender<()>,
}

impl CommitNotifier {
    /// Never blocks. A full slot means the listener hasn't consumed the last wakeup yet, which is
    /// as good as sending another one.
    pub(crate) fn notify_commit(&self, logger: &slog::Logger) {
        match self.sender.try_send(()) {
            Ok(_) => {}
            Err(TrySendError::Full(_)) => {
                slog::trace!(logger, "Commit notification already pending.");
            }
            Err(TrySendError::Closed(_)) => {
                slog::debug!(logger, "CommitListener has disconnected.");
            }
        }
    }
}

pub struct CommitListener {
    receiver: mpsc::Receiver<()>,
}

impl CommitListener {
    /// `changed()` waits until the commit index has advanced since the previous wakeup. Returns
    /// false once every `CommitNotifier` is gone, i.e. the tracker was dropped.
    pub async fn changed(&mut self) -> bool {
        self.receiver.recv().await.is_some()
    }

    /// Non-blocking version of `changed()`. Consumes the pending wakeup if there is one.
    pub fn try_changed(&mut self) -> bool {
        self.receiver.try_recv().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    #[test]
    fn no_wakeup_before_notify() {
        let (_notifier, mut listener) = channel();
        assert!(!listener.try_changed());
    }

    #[test]
    fn notifications_coalesce() {
        let logger = logger();
        let (notifier, mut listener) = channel();

        notifier.notify_commit(&logger);
        notifier.notify_commit(&logger);
        notifier.notify_commit(&logger);

        assert!(listener.try_changed());
        assert!(!listener.try_changed());
    }

    #[test]
    fn notify_after_listener_dropped_is_harmless() {
        let logger = logger();
        let (notifier, listener) = channel();
        drop(listener);

        notifier.notify_commit(&logger);
    }

    #[tokio::test]
    async fn changed_wakes_up_on_notify() {
        let logger = logger();
        let (notifier, mut listener) = channel();

        let task = tokio::spawn(async move { listener.changed().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        notifier.notify_commit(&logger);

        let woke_up = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("Unexpected timeout")
            .expect("Listener task panicked");
        assert!(woke_up);
    }

    #[tokio::test]
    async fn changed_returns_false_once_notifiers_are_gone() {
        let (notifier, mut listener) = channel();
        let second_notifier = notifier.clone();
        drop(notifier);
        drop(second_notifier);

        assert!(!listener.changed().await);
    }
}
