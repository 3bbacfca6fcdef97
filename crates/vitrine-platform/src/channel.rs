//! Where layouts come from: an initial fetch and a push channel for
//! replacements.

use std::rc::Rc;

use vitrine_core::{Dispose, Signal, signal};

use crate::HostError;

/// One-shot provider of the initial layout document.
pub trait LayoutSource {
    fn fetch(&self) -> Result<String, HostError>;
}

impl<F> LayoutSource for F
where
    F: Fn() -> Result<String, HostError>,
{
    fn fetch(&self) -> Result<String, HostError> {
        self()
    }
}

/// Serves a fixed document.
#[derive(Clone, Debug)]
pub struct StaticSource(pub String);

impl LayoutSource for StaticSource {
    fn fetch(&self) -> Result<String, HostError> {
        Ok(self.0.clone())
    }
}

/// Push channel for replacement layouts. The returned [`Dispose`] ends the
/// subscription.
pub trait LayoutChannel {
    fn subscribe(&self, on_layout: Rc<dyn Fn(String)>) -> Dispose;
}

/// In-process, single-threaded layout channel.
#[derive(Clone)]
pub struct LayoutBus {
    latest: Signal<Option<Rc<str>>>,
}

impl Default for LayoutBus {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutBus {
    pub fn new() -> Self {
        Self {
            latest: signal(None),
        }
    }

    pub fn publish(&self, json: impl Into<String>) {
        let json: String = json.into();
        log::debug!("layout bus: publishing {} bytes", json.len());
        self.latest.set(Some(json.into()));
    }

    pub fn subscriber_count(&self) -> usize {
        self.latest.subscriber_count()
    }
}

impl LayoutChannel for LayoutBus {
    fn subscribe(&self, on_layout: Rc<dyn Fn(String)>) -> Dispose {
        self.latest.watch(move |v| {
            if let Some(json) = v {
                on_layout(json.to_string());
            }
        })
    }
}
