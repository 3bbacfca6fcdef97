//! Host runtime.
//!
//! [`Host`] ties a layout source, a push channel and an optional
//! cross-thread [`LayoutInbox`] to the renderer, and routes pointer and text
//! input through the hit regions of the last painted [`vitrine_ui::Frame`].
//! Windowing and rasterization stay with the embedding application: it calls
//! [`Host::frame`] when [`Host::needs_frame`] says so and replays the scene
//! into its own [`vitrine_core::Painter`].

pub mod channel;
pub mod error;
pub mod host;
pub mod inbox;
pub mod sink;

pub use channel::{LayoutBus, LayoutChannel, LayoutSource, StaticSource};
pub use error::HostError;
pub use host::Host;
pub use inbox::{InboxMessage, InboxSender, LayoutInbox};
pub use sink::{EventReceiver, QueuedSink};
