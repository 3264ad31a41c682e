//! Single-threaded event queue
//!
//! Every platform callback (position fix, speech result, connectivity change)
//! is turned into an [`AppEvent`] and delivered, in arrival order, to whoever
//! drains the [`EventQueue`].

use tokio::sync::mpsc;

use crate::error::LocationError;
use crate::models::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A new position fix arrived
    PositionUpdate(Position),

    /// A position fix failed
    PositionError(LocationError),

    /// The platform reported a connectivity transition
    Connectivity { online: bool },

    /// Speech capture produced a final transcript
    SpeechResult(String),

    /// Speech capture failed
    SpeechError(String),

    /// Speech capture finished (after a result or an error)
    SpeechEnded,

    /// Submit a chat message
    Submit(String),

    /// Stop the event loop
    Shutdown,
}

/// Handle used by providers to post events
pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Receiving end of the application event stream
#[derive(Debug)]
pub struct EventQueue {
    sender: EventSender,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// A new sender for this queue
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }

    /// Take the next event if one is already queued
    pub fn try_recv(&mut self) -> Option<AppEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let mut queue = EventQueue::new();
        let sender = queue.sender();

        sender.send(AppEvent::Connectivity { online: false }).unwrap();
        sender.send(AppEvent::Submit("hello".to_string())).unwrap();
        sender.send(AppEvent::Shutdown).unwrap();

        assert_eq!(queue.recv().await, Some(AppEvent::Connectivity { online: false }));
        assert_eq!(queue.recv().await, Some(AppEvent::Submit("hello".to_string())));
        assert_eq!(queue.recv().await, Some(AppEvent::Shutdown));
    }

    #[test]
    fn test_try_recv_on_empty_queue() {
        let mut queue = EventQueue::new();
        assert!(queue.try_recv().is_none());
        queue.sender().send(AppEvent::SpeechEnded).unwrap();
        assert_eq!(queue.try_recv(), Some(AppEvent::SpeechEnded));
    }
}
