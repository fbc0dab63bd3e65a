//! Hook registries for the tag construction pipeline.
//!
//! Two independent mappings from tag name to handler: before-hooks run
//! ahead of construction and may mutate or cancel the event; on-hooks
//! produce the final string for a tag. The on-map carries a wildcard
//! entry used whenever no tag-specific handler exists.

use std::collections::HashMap;

use crate::event::TagEvent;
use crate::tag::{default_tag_handler, raw_html_handler};

/// Boxed hook handler. Receives the event by exclusive borrow and
/// communicates by mutating it.
pub type HookFn = Box<dyn Fn(&mut TagEvent<'_>) + Send + Sync>;

/// On-hook key matched when no tag-specific entry exists.
pub const WILDCARD_TAG: &str = "*";

/// Reserved tag name routing verbatim markup through the pipeline.
pub const RAW_HTML_TAG: &str = "_html";

/// Registered hooks of one renderer instance.
///
/// Mutable only through explicit registration; read-only during a render
/// pass. Registering a tag name replaces any previous entry, including
/// the wildcard default.
pub(crate) struct HookRegistry {
    before: HashMap<String, HookFn>,
    on: HashMap<String, HookFn>,
}

impl HookRegistry {
    /// Registry with the built-in handlers installed: the default tag
    /// constructor under [`WILDCARD_TAG`] and the verbatim-content
    /// handler under [`RAW_HTML_TAG`].
    pub(crate) fn new() -> Self {
        let mut on: HashMap<String, HookFn> = HashMap::new();
        on.insert(WILDCARD_TAG.to_owned(), Box::new(default_tag_handler));
        on.insert(RAW_HTML_TAG.to_owned(), Box::new(raw_html_handler));
        Self {
            before: HashMap::new(),
            on,
        }
    }

    pub(crate) fn register_before(&mut self, tag: String, handler: HookFn) {
        self.before.insert(tag, handler);
    }

    pub(crate) fn register(&mut self, tag: String, handler: HookFn) {
        self.on.insert(tag, handler);
    }

    pub(crate) fn before(&self, tag: &str) -> Option<&HookFn> {
        self.before.get(tag)
    }

    /// On-hook for `tag`, falling back to the wildcard entry. An absent
    /// tag name resolves straight to the wildcard.
    pub(crate) fn resolve(&self, tag: Option<&str>) -> Option<&HookFn> {
        tag.and_then(|name| self.on.get(name))
            .or_else(|| self.on.get(WILDCARD_TAG))
    }
}
