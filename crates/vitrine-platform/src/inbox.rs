//! Cross-thread layout delivery.
//!
//! Transport threads hold an [`InboxSender`] and push raw layout JSON or
//! multipart broker frames. Nothing is decoded off the UI thread: the host
//! drains the inbox in [`crate::Host::pump`].

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::HostError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboxMessage {
    Layout(String),
    /// One multipart broker message; the layout is extracted on drain.
    Frames(Vec<Vec<u8>>),
}

/// UI-thread end. Dropping it closes every sender.
#[derive(Debug)]
pub struct LayoutInbox {
    tx: UnboundedSender<InboxMessage>,
    rx: UnboundedReceiver<InboxMessage>,
}

impl Default for LayoutInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutInbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> InboxSender {
        InboxSender {
            tx: self.tx.clone(),
        }
    }

    /// Everything queued so far, oldest first. Never blocks.
    pub fn drain(&mut self) -> Vec<InboxMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            out.push(msg);
        }
        out
    }
}

/// `Send + Sync` producer end.
#[derive(Clone, Debug)]
pub struct InboxSender {
    tx: UnboundedSender<InboxMessage>,
}

impl InboxSender {
    pub fn send(&self, msg: InboxMessage) -> Result<(), HostError> {
        self.tx.send(msg).map_err(|_| HostError::Closed)
    }

    pub fn send_layout(&self, json: impl Into<String>) -> Result<(), HostError> {
        self.send(InboxMessage::Layout(json.into()))
    }

    pub fn send_frames(&self, frames: Vec<Vec<u8>>) -> Result<(), HostError> {
        self.send(InboxMessage::Frames(frames))
    }
}
