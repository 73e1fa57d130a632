use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Per-owner publish/subscribe channel. Every subscriber gets its own copy of each event;
/// subscribers whose receiver was dropped are pruned on the next emit.
pub struct EventBus<E> {
    subscribers: Vec<Sender<E>>,
}

pub struct EventReceiver<E> {
    rx: Receiver<E>,
}

impl<E: Clone> EventBus<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> EventReceiver<E> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        EventReceiver { rx }
    }

    pub fn emit(&mut self, event: E) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventReceiver<E> {
    pub fn try_recv(&mut self) -> Result<E, TryRecvError> {
        self.rx.try_recv()
    }

    /// Everything delivered so far, oldest first.
    pub fn drain(&mut self) -> Vec<E> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/bus.rs"]
mod tests;
