//! Structural value-to-markup renderer with a tag hook pipeline.
//!
//! Converts an arbitrary in-memory [`Value`] — object graph, mapping,
//! sequence, scalar, date or content callback — into HTML/XML-like markup
//! text. The shape of the input determines the shape of the output tree;
//! no schema is involved.
//!
//! # Architecture
//!
//! - [`Value`]: closed tagged variant over the input shapes, classified
//!   structurally once per recursion step.
//! - [`MarkupRenderer`]: the recursive core plus configuration
//!   ([`RenderOptions`]) and the hook registries.
//! - [`TagEvent`]: mutable record passed through the two-phase pipeline
//!   (before-hooks may mutate or cancel, on-hooks produce the string).
//! - [`default_tag_handler`]: the wildcard constructor handling attribute
//!   serialization, class normalization and close style.
//!
//! Escaping lives in the `treemark-escape` crate; its mode enum is
//! re-exported as [`EscapeMode`].
//!
//! # Example
//!
//! ```
//! use treemark::{MarkupRenderer, Value};
//!
//! let renderer = MarkupRenderer::new();
//! let html = renderer.to_markup(&Value::from(serde_json::json!({
//!     "article": {"title": "Hi", "_attrs": {"class": "post"}}
//! })))?;
//! assert_eq!(
//!     html,
//!     "<div><article class=\"post\"><title>Hi</title></article></div>"
//! );
//! # Ok::<(), treemark::RenderError>(())
//! ```

mod error;
mod event;
mod hooks;
mod renderer;
mod tag;
mod value;

pub use error::RenderError;
pub use event::TagEvent;
pub use hooks::{HookFn, RAW_HTML_TAG, WILDCARD_TAG};
pub use renderer::{DEFAULT_MAX_DEPTH, MarkupRenderer, RenderOptions, to_markup};
pub use tag::{AUTOCLOSE_TAGS, default_tag_handler};
pub use treemark_escape::EscapeMode;
pub use value::{Attrs, ContentFn, Value, ValueKind};
