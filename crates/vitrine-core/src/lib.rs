//! # Views, Scenes, and Painters
//!
//! Vitrine turns a backend-supplied layout into an output tree of [`View`]s,
//! lays that tree out, and paints it as a [`Scene`]: a flat, ordered list of
//! draw commands. This crate holds the vocabulary shared by every stage.
//!
//! - `View` / `ViewKind`: what the renderer produces for one frame.
//! - `Modifier`: layout and decoration attached to a view.
//! - `Scene` / `SceneNode`: positioned draw commands after layout.
//! - `Painter`: the drawing capability a host plugs in.
//! - `Signal<T>` / `Dispose`: change notification and cleanup.
//!
//! ## Painting
//!
//! The core never touches pixels. A host implements [`Painter`] and replays
//! the scene into it:
//!
//! ```rust
//! use vitrine_core::*;
//!
//! #[derive(Default)]
//! struct Count(usize);
//!
//! impl Painter for Count {
//!     fn rect(&mut self, _: Rect, _: Color, _: f32) { self.0 += 1 }
//!     fn border(&mut self, _: Rect, _: Color, _: f32, _: f32) { self.0 += 1 }
//!     fn text(&mut self, _: Rect, _: &str, _: &TextStyle) { self.0 += 1 }
//!     fn field(&mut self, _: Rect, _: &str, _: &str, _: &TextStyle) { self.0 += 1 }
//!     fn image(&mut self, _: Rect, _: &[u8]) { self.0 += 1 }
//!     fn push_clip(&mut self, _: Rect, _: f32) {}
//!     fn pop_clip(&mut self) {}
//! }
//!
//! let mut scene = Scene::default();
//! scene.nodes.push(SceneNode::Rect { rect: Rect::default(), color: Color::WHITE, radius: 0.0 });
//! let mut p = Count::default();
//! scene.replay(&mut p);
//! assert_eq!(p.0, 1);
//! ```
//!
//! ## Signals
//!
//! ```rust
//! use vitrine_core::*;
//!
//! let revision = signal(0u64);
//! let seen = std::rc::Rc::new(std::cell::Cell::new(0));
//! let sub = revision.watch({
//!     let seen = seen.clone();
//!     move |v| seen.set(*v)
//! });
//! revision.set(3);
//! assert_eq!(seen.get(), 3);
//! sub.run();
//! revision.set(4);
//! assert_eq!(seen.get(), 3);
//! ```

pub mod color;
pub mod effects;
pub mod geometry;
pub mod modifier;
pub mod render_api;
pub mod semantics;
pub mod signal;
pub mod tests;
pub mod view;

pub use color::*;
pub use effects::*;
pub use geometry::*;
pub use modifier::*;
pub use render_api::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
