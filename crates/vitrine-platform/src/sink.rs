//! Fire-and-forget delivery of business events to a worker thread.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use vitrine_ui::{DispatchError, EventSink};

/// [`EventSink`] that only enqueues. Pair it with the [`EventReceiver`]
/// returned by [`QueuedSink::channel`] on the business thread.
#[derive(Clone, Debug)]
pub struct QueuedSink {
    tx: UnboundedSender<String>,
}

#[derive(Debug)]
pub struct EventReceiver {
    rx: UnboundedReceiver<String>,
}

impl QueuedSink {
    pub fn channel() -> (QueuedSink, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (QueuedSink { tx }, EventReceiver { rx })
    }
}

impl EventSink for QueuedSink {
    fn forward(&self, event_id: &str) -> Result<(), DispatchError> {
        self.tx
            .send(event_id.to_string())
            .map_err(|_| DispatchError::Closed)
    }
}

impl EventReceiver {
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }

    /// Block the calling thread until the next event. `None` once every
    /// sink is gone. Must not be called from inside an async runtime.
    pub fn recv(&mut self) -> Option<String> {
        self.rx.blocking_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_without_blocking() {
        let (sink, mut rx) = QueuedSink::channel();
        sink.forward("a").unwrap();
        sink.forward("b").unwrap();
        assert_eq!(rx.try_recv().as_deref(), Some("a"));
        assert_eq!(rx.try_recv().as_deref(), Some("b"));
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn wakes_a_waiting_worker() {
        let (sink, mut rx) = QueuedSink::channel();
        let worker = std::thread::spawn(move || rx.recv());
        sink.forward("pay_card").unwrap();
        assert_eq!(worker.join().unwrap().as_deref(), Some("pay_card"));
    }

    #[test]
    fn worker_stops_once_sinks_drop() {
        let (sink, mut rx) = QueuedSink::channel();
        let worker = std::thread::spawn(move || {
            let mut seen = vec![];
            while let Some(e) = rx.recv() {
                seen.push(e);
            }
            seen
        });
        sink.clone().forward("one").unwrap();
        sink.forward("two").unwrap();
        drop(sink);
        assert_eq!(worker.join().unwrap(), ["one", "two"]);
    }

    #[test]
    fn closed_once_receiver_drops() {
        let (sink, rx) = QueuedSink::channel();
        drop(rx);
        assert_eq!(sink.forward("x"), Err(DispatchError::Closed));
    }
}
