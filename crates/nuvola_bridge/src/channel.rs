use std::cell::RefCell;
use tokio::sync::mpsc::UnboundedSender;

use crate::message::{HostMessage, MessageArg, Operation};

/// One-way, fire-and-forget transport of messages to the host.
/// Nothing about delivery is reported back to the caller.
pub trait MessageChannel {
    fn send_message(&self, message: HostMessage);

    fn send(&self, operation: Operation, args: Vec<MessageArg>) {
        self.send_message(HostMessage::new(operation, args))
    }
}

/// Queue messages for a writer task. Messages sent after the receiving side is gone are dropped.
impl MessageChannel for UnboundedSender<HostMessage> {
    fn send_message(&self, message: HostMessage) {
        log::debug!("-> {}", message);
        if let Err(err) = UnboundedSender::send(self, message) {
            log::warn!("Dropping message to host, channel is closed: {}", err.0);
        }
    }
}

/// Keeps every sent message in memory.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    messages: RefCell<Vec<HostMessage>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all messages recorded so far.
    pub fn take(&self) -> Vec<HostMessage> {
        self.messages.take()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl MessageChannel for RecordingChannel {
    fn send_message(&self, message: HostMessage) {
        self.messages.borrow_mut().push(message);
    }
}
