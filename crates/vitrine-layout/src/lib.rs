//! Wire layout model.
//!
//! A layout is a JSON envelope holding one rooted tree of tagged nodes
//! (`column` is the only branching kind) plus auxiliary display data. Decoding
//! is total below the root: a mistyped attribute falls back to its default,
//! and unknown kinds or non-object elements survive as [`UiNode::Unknown`] /
//! [`UiNode::Invalid`] so the renderer can show a diagnostic in their place.
//!
//! ```rust
//! use vitrine_layout::*;
//!
//! let layout = UiLayout::from_json(r#"{
//!     "root": { "type": "column", "children": [
//!         { "type": "text", "text": "Hello" },
//!         { "type": "gauge" }
//!     ] }
//! }"#).unwrap();
//!
//! let kinds: Vec<_> = layout.root.children().iter().map(|n| n.type_name()).collect();
//! assert_eq!(kinds, ["text", "gauge"]);
//! ```

pub mod error;
pub mod frames;
pub mod layout;
pub mod node;
pub mod store;

pub use error::LayoutError;
pub use frames::{extract_layout, layout_from_frames, looks_like_json, style_to_layout};
pub use layout::{CustomerDisplay, LogoAsset, LogoMeta, UiLayout};
pub use node::{
    Align, ButtonNode, ColumnNode, InputNode, LogoNode, MoneyInputNode, NodeBase, ScrollNode,
    SpacerNode, TextNode, UiNode,
};
pub use store::LayoutStore;
