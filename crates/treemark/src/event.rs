//! Mutable event record threaded through the tag construction pipeline.

use crate::renderer::MarkupRenderer;
use crate::value::{Attrs, ContentFn, Value};

/// State of one tag construction, passed by exclusive borrow through the
/// hook pipeline (before-hook, content resolution, on-hook).
///
/// Hooks mutate the event in place; [`rst`](Self::rst) is the sole output
/// channel back to the renderer. The event lives for a single
/// construction call and is discarded once `rst` is taken.
pub struct TagEvent<'a> {
    /// Renderer owning the current render pass; gives hooks access to
    /// options and to [`escape`](MarkupRenderer::escape)/
    /// [`unescape`](MarkupRenderer::unescape).
    pub renderer: &'a MarkupRenderer,
    /// Value the tag is being built for.
    pub value: &'a Value,
    /// Tag name, absent when only content is emitted.
    ///
    /// Rewriting this in a before-hook does not redirect handler lookup,
    /// which uses the name the pipeline was entered with.
    pub tag: Option<String>,
    /// Resolved content of the tag. Empty while a content callback is
    /// still pending.
    pub content: String,
    /// Attributes to serialize; keys iterate lexicographically.
    pub attrs: Attrs,
    /// Nesting level of the tag.
    pub level: usize,
    /// Indentation prefix computed from the level; empty when
    /// pretty-printing is disabled.
    pub indent: String,
    /// Set by a before-hook to suppress default construction and keep
    /// whatever the hook wrote to `rst`.
    pub cancel: bool,
    /// Rendered result for this tag.
    pub rst: String,
}

/// Content handed to the tag construction pipeline.
pub(crate) enum TagContent {
    /// Already-rendered text.
    Text(String),
    /// Callback that produces the result itself.
    Producer(ContentFn),
}
