//! Channel-backed progress emitter.
//!
//! [`ProgressEmitter`] is the write half handed to generation pipelines;
//! the paired receiver feeds the transport (an SSE response in the API
//! crate). Emitting never blocks, so a slow or departed consumer cannot
//! stall job completion.

use tokio::sync::mpsc;

use crate::progress::GenerationEvent;

/// Non-blocking sender of [`GenerationEvent`]s.
///
/// Cheap to clone; every clone feeds the same subscriber. The stream ends
/// when the last clone is dropped.
#[derive(Clone)]
pub struct ProgressEmitter {
    sender: mpsc::UnboundedSender<GenerationEvent>,
}

impl ProgressEmitter {
    /// Create an emitter and the receiver the transport will drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GenerationEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Publish an event to the subscriber.
    ///
    /// If the subscriber is gone (client disconnected), the event is
    /// silently dropped.
    pub fn emit(&self, event: GenerationEvent) {
        // Ignore the SendError — it only means the receiver was dropped.
        let _ = self.sender.send(event);
    }

    /// Shorthand for a [`GenerationEvent::Status`] message.
    pub fn status(&self, message: impl Into<String>) {
        self.emit(GenerationEvent::Status {
            message: message.into(),
        });
    }

    /// Shorthand for a [`GenerationEvent::Error`] message.
    pub fn error(&self, message: impl Into<String>) {
        self.emit(GenerationEvent::Error {
            message: message.into(),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emitted_events_arrive_in_order() {
        let (emitter, mut rx) = ProgressEmitter::channel();
        emitter.status("phase one");
        emitter.emit(GenerationEvent::Scenes { count: 3 });
        emitter.error("boom");
        drop(emitter);

        let mut received = Vec::new();
        while let Some(event) = rx.recv().await {
            received.push(event);
        }
        assert_eq!(received.len(), 3);
        assert!(matches!(received[0], GenerationEvent::Status { .. }));
        assert!(matches!(received[1], GenerationEvent::Scenes { count: 3 }));
        assert!(matches!(received[2], GenerationEvent::Error { .. }));
    }

    #[test]
    fn emit_with_no_subscriber_does_not_panic() {
        let (emitter, rx) = ProgressEmitter::channel();
        drop(rx);
        emitter.status("nobody is listening");
    }

    #[tokio::test]
    async fn clones_feed_the_same_subscriber() {
        let (emitter, mut rx) = ProgressEmitter::channel();
        let clone = emitter.clone();
        clone.status("from the clone");
        drop(emitter);
        drop(clone);

        let event = rx.recv().await.expect("event from clone");
        assert!(matches!(event, GenerationEvent::Status { .. }));
        assert!(rx.recv().await.is_none(), "channel closes after last clone");
    }
}
