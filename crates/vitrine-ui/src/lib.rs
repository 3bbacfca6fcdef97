//! # Rendering layouts
//!
//! This crate turns a [`vitrine_layout::UiLayout`] plus local interaction
//! state into a [`vitrine_core::View`] tree, lays it out with Taffy and
//! paints it into a [`vitrine_core::Scene`].
//!
//! - [`StateStore`] holds field texts and UI flags; every write bumps a
//!   revision hosts watch to re-render.
//! - [`Renderer`] walks the layout, skipping nodes whose visibility gate
//!   fails and wiring fields and buttons back into the store.
//! - [`Dispatcher`] handles clicks: `nav_to:` actions switch screens
//!   (behind a credential check when leaving login), the rest are forwarded
//!   to an [`EventSink`].
//!
//! ```rust
//! use std::rc::Rc;
//! use vitrine_layout::UiLayout;
//! use vitrine_ui::*;
//!
//! let layout = UiLayout::from_json(r#"{ "root": { "type": "column", "children": [
//!     { "type": "text", "text": "Hello" },
//!     { "type": "text", "text": "hidden", "visible_when_flag": "screen_start" }
//! ] } }"#).unwrap();
//!
//! let store = StateStore::new();
//! let dispatcher = Dispatcher::new(store.clone());
//! let mut renderer = Renderer::new(RenderOptions::default());
//! renderer.set_layout(Some(Rc::new(layout)));
//!
//! let view = renderer.render(&dispatcher);
//! assert_eq!(outline(&view), "Surface\n  Column\n    Text \"Hello\"\n");
//! ```

pub mod error;
pub mod inspect;
pub mod navigation;
pub mod paint;
pub mod render;
pub mod state;
pub mod textfield;
pub mod visibility;


pub use error::{DispatchError, PaintError};
pub use inspect::outline;
pub use navigation::{
    Action, CredentialCheck, DispatchConfig, DispatchOutcome, Dispatcher, EventSink,
    FixedCredential, NAV_PREFIX, NavTarget,
};
pub use paint::{Frame, HitRegion, layout_and_paint};
pub use render::{RenderCtx, RenderOptions, Renderer, button_enabled, loading_placeholder, render_node};
pub use state::{
    DEFAULT_CREDENTIAL_FIELD, DraftStore, Flags, Inputs, InteractionState, LOGIN_ERROR, PASSWORD_MIRROR_KEY,
    SCREEN_LOGIN, SCREEN_START, StateStore,
};
pub use visibility::is_visible;
