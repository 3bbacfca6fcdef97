use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vitrine_core::{DisposeGuard, Size, View};
use vitrine_layout::{LayoutError, LayoutStore, UiLayout, layout_from_frames};
use vitrine_ui::{
    CredentialCheck, DispatchConfig, Dispatcher, EventSink, Frame, RenderOptions, Renderer,
    StateStore, layout_and_paint,
};

use crate::inbox::InboxMessage;
use crate::{HostError, LayoutChannel, LayoutInbox, LayoutSource};

/// Owns one screen: its layout, its interaction state and the wiring
/// between them. Lives on the UI thread.
pub struct Host {
    store: StateStore,
    dispatcher: Dispatcher,
    layouts: Rc<RefCell<LayoutStore>>,
    renderer: Rc<RefCell<Renderer>>,
    source: Option<Box<dyn LayoutSource>>,
    channel: Option<Rc<dyn LayoutChannel>>,
    inbox: Option<LayoutInbox>,
    subscription: Option<DisposeGuard>,
    mounted: bool,
    last_frame: Option<Frame>,
    dirty: Rc<Cell<bool>>,
    _state_watch: DisposeGuard,
    _draft_watch: DisposeGuard,
}

/// Hand a layout the store accepted to the renderer.
fn promote(
    renderer: &RefCell<Renderer>,
    decoded: Result<Rc<UiLayout>, LayoutError>,
) -> Result<(), LayoutError> {
    renderer.borrow_mut().set_layout(Some(decoded?));
    Ok(())
}

impl Host {
    pub fn new(options: RenderOptions) -> Self {
        let store = StateStore::new();
        let dirty = Rc::new(Cell::new(true));
        let state_watch = store.on_change({
            let dirty = dirty.clone();
            move |_| dirty.set(true)
        });
        let renderer = Renderer::new(options);
        let draft_watch = renderer.drafts().on_change({
            let dirty = dirty.clone();
            move |_| dirty.set(true)
        });
        Self {
            dispatcher: Dispatcher::new(store.clone()),
            store,
            layouts: Rc::new(RefCell::new(LayoutStore::new())),
            renderer: Rc::new(RefCell::new(renderer)),
            source: None,
            channel: None,
            inbox: None,
            subscription: None,
            mounted: false,
            last_frame: None,
            dirty,
            _state_watch: state_watch.guard(),
            _draft_watch: draft_watch.guard(),
        }
    }

    pub fn with_source(mut self, source: impl LayoutSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_channel(mut self, channel: Rc<dyn LayoutChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_inbox(mut self, inbox: LayoutInbox) -> Self {
        self.inbox = Some(inbox);
        self
    }

    pub fn with_sink(mut self, sink: Rc<dyn EventSink>) -> Self {
        self.dispatcher.set_sink(Some(sink));
        self
    }

    pub fn with_credentials(mut self, check: impl CredentialCheck + 'static) -> Self {
        self.dispatcher = self.dispatcher.clone().with_credentials(check);
        self
    }

    pub fn with_dispatch_config(mut self, config: DispatchConfig) -> Self {
        self.dispatcher = self.dispatcher.clone().with_config(config);
        self
    }

    /// Fetch the initial layout and subscribe for replacements. A failed
    /// fetch is logged and leaves the loading placeholder up.
    pub fn mount(&mut self) {
        if self.mounted {
            log::warn!("host already mounted");
            return;
        }
        self.mounted = true;

        if let Some(source) = &self.source {
            let result = source.fetch().and_then(|json| {
                let decoded = self.layouts.borrow_mut().apply_json(&json);
                promote(&self.renderer, decoded).map_err(HostError::from)
            });
            match result {
                Ok(()) => self.dirty.set(true),
                Err(e) => log::warn!("initial layout unavailable: {e}"),
            }
        }

        if let Some(channel) = &self.channel {
            let layouts = self.layouts.clone();
            let renderer = self.renderer.clone();
            let dirty = self.dirty.clone();
            let sub = channel.subscribe(Rc::new(move |json: String| {
                let decoded = layouts.borrow_mut().apply_json(&json);
                if promote(&renderer, decoded).is_ok() {
                    dirty.set(true);
                }
            }));
            self.subscription = Some(sub.guard());
            log::debug!("host subscribed for layout updates");
        }
    }

    /// Drop the layout subscription. Safe to call more than once.
    pub fn unmount(&mut self) {
        self.mounted = false;
        if let Some(sub) = self.subscription.take() {
            drop(sub);
            log::debug!("host unsubscribed");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Replace the layout directly, bypassing source and channel.
    pub fn apply_json(&mut self, json: &str) -> Result<(), HostError> {
        let decoded = self.layouts.borrow_mut().apply_json(json);
        promote(&self.renderer, decoded)?;
        self.dirty.set(true);
        Ok(())
    }

    /// Apply everything waiting in the inbox, in arrival order. Returns how
    /// many layouts were accepted.
    pub fn pump(&mut self) -> usize {
        let Some(inbox) = self.inbox.as_mut() else {
            return 0;
        };
        let mut accepted = 0;
        for msg in inbox.drain() {
            let decoded = match msg {
                InboxMessage::Layout(json) => self.layouts.borrow_mut().apply_json(&json),
                InboxMessage::Frames(frames) => match layout_from_frames(&frames) {
                    Ok(value) => self.layouts.borrow_mut().apply_value(value),
                    Err(e) => {
                        log::debug!("frames carried no layout: {e}");
                        continue;
                    }
                },
            };
            if promote(&self.renderer, decoded).is_ok() {
                accepted += 1;
            }
        }
        if accepted > 0 {
            self.dirty.set(true);
        }
        accepted
    }

    /// Something changed since the last [`Host::frame`].
    pub fn needs_frame(&self) -> bool {
        self.dirty.get()
    }

    pub fn view(&self) -> View {
        self.renderer.borrow().render(&self.dispatcher)
    }

    /// Render, lay out and paint the current layout at `size`.
    pub fn frame(&mut self, size: Size) -> Result<&Frame, HostError> {
        let view = self.view();
        let frame = layout_and_paint(&view, size)?;
        self.dirty.set(false);
        Ok(self.last_frame.insert(frame))
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Activate whatever live button lies under `(x, y)` in the last frame.
    pub fn click_at(&self, x: f32, y: f32) -> bool {
        let Some(cb) = self
            .last_frame
            .as_ref()
            .and_then(|f| f.hit_at(x, y))
            .and_then(|h| h.on_click.clone())
        else {
            return false;
        };
        cb();
        true
    }

    pub fn click(&self, hit_id: u64) -> bool {
        let Some(cb) = self
            .last_frame
            .as_ref()
            .and_then(|f| f.hit_regions.iter().find(|h| h.id == hit_id))
            .and_then(|h| h.on_click.clone())
        else {
            return false;
        };
        cb();
        true
    }

    /// Deliver the full new text of a field from the last frame.
    pub fn edit(&self, hit_id: u64, text: impl Into<String>) -> bool {
        let Some(cb) = self
            .last_frame
            .as_ref()
            .and_then(|f| f.hit_regions.iter().find(|h| h.id == hit_id))
            .and_then(|h| h.on_text_change.clone())
        else {
            return false;
        };
        cb(text.into());
        true
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn layout(&self) -> Option<Rc<UiLayout>> {
        self.layouts.borrow().current()
    }

    pub fn layout_revision(&self) -> u64 {
        self.layouts.borrow().revision()
    }

    pub fn rejected_layouts(&self) -> u64 {
        self.layouts.borrow().rejected()
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.unmount();
    }
}
