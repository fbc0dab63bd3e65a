//! Recursive value-to-markup renderer.
//!
//! [`MarkupRenderer`] walks a [`Value`] tree, classifies each node
//! structurally and materializes one tag per node through the hook
//! pipeline: before-hooks may mutate or cancel the event, on-hooks (or
//! the wildcard default) produce the final string.

use std::borrow::Cow;
use std::sync::Arc;

use treemark_escape::EscapeMode;

use crate::error::RenderError;
use crate::event::{TagContent, TagEvent};
use crate::hooks::{HookRegistry, RAW_HTML_TAG};
use crate::value::{Attrs, Value};

/// Depth guard applied when [`RenderOptions::max_depth`] is not set
/// explicitly.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Rendering options.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Indentation unit repeated per nesting level. Empty disables
    /// pretty-printing.
    pub indent: String,
    /// Escaping applied to scalar text and attribute values.
    pub escape_mode: EscapeMode,
    /// Maximum recursion depth before a render fails with
    /// [`RenderError::RecursionLimit`].
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: String::new(),
            escape_mode: EscapeMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Renders values to HTML/XML-like markup.
///
/// The shape of the input decides the shape of the output tree: mapping
/// fields become child tags, sequences concatenate their composite
/// elements, scalars become escaped text content. Reserved mapping
/// fields (`_tag`, `_attrs`, `_content`, `_html`) override that
/// correspondence per node.
///
/// # Example
///
/// ```
/// use treemark::MarkupRenderer;
///
/// let renderer = MarkupRenderer::new().with_indent("  ");
/// let html = renderer.to_markup_json(r#"{"title": "Hi"}"#)?;
/// assert_eq!(html, "<div>\n  <title>Hi</title>\n</div>");
/// # Ok::<(), treemark::RenderError>(())
/// ```
pub struct MarkupRenderer {
    options: RenderOptions,
    hooks: HookRegistry,
}

impl Default for MarkupRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupRenderer {
    /// Create a renderer with default options: no pretty-printing,
    /// double-quote escaping.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Create a renderer with explicit options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            hooks: HookRegistry::new(),
        }
    }

    /// Set the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, unit: impl Into<String>) -> Self {
        self.options.indent = unit.into();
        self
    }

    /// Set the escaping mode.
    #[must_use]
    pub fn with_escape_mode(mut self, mode: EscapeMode) -> Self {
        self.options.escape_mode = mode;
        self
    }

    /// Set the recursion depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// The renderer's options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Register an on-hook producing the final string for `tag`.
    ///
    /// Replaces any previous handler for that name. Registering under
    /// `*` replaces the default tag constructor for every tag without a
    /// specific handler; delegate to
    /// [`default_tag_handler`](crate::default_tag_handler) to keep the
    /// stock behavior alongside customization.
    pub fn register_hook<F>(&mut self, tag: impl Into<String>, handler: F)
    where
        F: Fn(&mut TagEvent<'_>) + Send + Sync + 'static,
    {
        self.hooks.register(tag.into(), Box::new(handler));
    }

    /// Register a before-hook for `tag`, run ahead of construction.
    ///
    /// The handler may mutate the event (attributes, content) or set
    /// `cancel` to suppress construction and keep whatever it wrote to
    /// `rst`.
    ///
    /// # Example
    ///
    /// ```
    /// use treemark::{MarkupRenderer, TagEvent, Value};
    ///
    /// let mut renderer = MarkupRenderer::new();
    /// renderer.register_before_hook("x", |evt: &mut TagEvent| {
    ///     evt.cancel = true;
    ///     evt.rst = "CUSTOM".to_owned();
    /// });
    /// let html = renderer.to_markup(&Value::from(serde_json::json!({"x": "ignored"})))?;
    /// assert_eq!(html, "<div>CUSTOM</div>");
    /// # Ok::<(), treemark::RenderError>(())
    /// ```
    pub fn register_before_hook<F>(&mut self, tag: impl Into<String>, handler: F)
    where
        F: Fn(&mut TagEvent<'_>) + Send + Sync + 'static,
    {
        self.hooks.register_before(tag.into(), Box::new(handler));
    }

    /// Escape text with the renderer's configured mode.
    #[must_use]
    pub fn escape<'t>(&self, text: &'t str) -> Cow<'t, str> {
        treemark_escape::escape(text, self.options.escape_mode)
    }

    /// Decode HTML entities back to plain text.
    #[must_use]
    pub fn unescape<'t>(&self, text: &'t str) -> Cow<'t, str> {
        treemark_escape::unescape(text)
    }

    /// Render `value` wrapped in a `div` with no attributes.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RecursionLimit`] when nesting exceeds the
    /// configured depth limit.
    pub fn to_markup(&self, value: &Value) -> Result<String, RenderError> {
        self.to_markup_with(value, Some("div"), &Attrs::new())
    }

    /// Render `value` under an explicit outer tag and attribute set.
    ///
    /// An absent `tag` emits the content without a wrapping element.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RecursionLimit`] when nesting exceeds the
    /// configured depth limit.
    pub fn to_markup_with(
        &self,
        value: &Value,
        tag: Option<&str>,
        attrs: &Attrs,
    ) -> Result<String, RenderError> {
        Ok(self.make_markup(tag, value, attrs, 0, 0)?.trim().to_owned())
    }

    /// Decode a JSON document and render it like [`to_markup`](Self::to_markup).
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Decode`] on malformed JSON and
    /// [`RenderError::RecursionLimit`] when nesting exceeds the
    /// configured depth limit.
    pub fn to_markup_json(&self, json: &str) -> Result<String, RenderError> {
        let decoded: serde_json::Value = serde_json::from_str(json)?;
        self.to_markup(&Value::from(decoded))
    }

    /// Indentation prefix for a nesting level: a newline plus the unit
    /// repeated `level` times, or empty when pretty-printing is off.
    pub(crate) fn indent_for(&self, level: usize) -> String {
        if self.options.indent.is_empty() {
            String::new()
        } else {
            format!("\n{}", self.options.indent.repeat(level))
        }
    }

    /// Recursive core: classify `value`, resolve children, then
    /// materialize the current tag through the hook pipeline.
    fn make_markup(
        &self,
        tag: Option<&str>,
        value: &Value,
        attrs: &Attrs,
        level: usize,
        depth: usize,
    ) -> Result<String, RenderError> {
        if depth > self.options.max_depth {
            return Err(RenderError::RecursionLimit {
                limit: self.options.max_depth,
            });
        }

        let mut indent = self.indent_for(level);

        // internal tag names must not leak through; only _html is real
        let tag = match tag {
            Some(name) if name.starts_with('_') && name != RAW_HTML_TAG => None,
            other => other,
        };

        tracing::trace!(?tag, level, depth, "Rendering node");

        match value {
            Value::Seq(items) => {
                let mut parts: Vec<String> = Vec::new();
                for item in items {
                    // scalar elements carry no structure of their own
                    if item.is_composite() {
                        let child_attrs = item.attrs_override();
                        parts.push(self.make_markup(
                            item.tag_override(),
                            item,
                            &child_attrs,
                            level,
                            depth + 1,
                        )?);
                    }
                }
                let joined = parts.concat();

                if tag.is_some() {
                    return Ok(
                        self.construct_tag(value, tag, TagContent::Text(joined), attrs, level)
                    );
                }

                // unwrapped sequences sit one unit deeper, but only when
                // more than one element produced output
                let content = joined.trim().to_owned();
                if parts.len() > 1 {
                    indent.push_str(&self.options.indent);
                }
                Ok(format!("{indent}{content}"))
            }
            Value::Map(fields) => {
                let mut parts: Vec<String> = Vec::new();
                for (name, field) in fields {
                    if !name.starts_with('_') {
                        let child_attrs = field.attrs_override();
                        parts.push(self.make_markup(
                            Some(name.as_str()),
                            field,
                            &child_attrs,
                            level + 1,
                            depth + 1,
                        )?);
                    } else if name == RAW_HTML_TAG {
                        parts.push(self.construct_tag(
                            value,
                            Some(RAW_HTML_TAG),
                            TagContent::Text(field.to_text()),
                            attrs,
                            level + 1,
                        ));
                    } else if name == "_content" {
                        let child_attrs = field.attrs_override();
                        parts.push(self.make_markup(None, field, &child_attrs, level, depth + 1)?);
                    }
                    // other _-prefixed fields are reserved and skipped
                }
                let joined = parts.concat();

                if tag.is_some() {
                    Ok(self.construct_tag(value, tag, TagContent::Text(joined), attrs, level))
                } else {
                    Ok(joined)
                }
            }
            Value::Content(producer) => Ok(self.construct_tag(
                value,
                tag,
                TagContent::Producer(Arc::clone(producer)),
                attrs,
                level,
            )),
            // instants normalize to ISO-8601 text and take the scalar path
            _ => {
                let text = value.to_text();
                let escaped = self.escape(&text).into_owned();
                let rendered =
                    self.construct_tag(value, tag, TagContent::Text(escaped), attrs, level);
                Ok(format!("{indent}{}", rendered.trim()))
            }
        }
    }

    /// Build the event for one tag and run it through the pipeline:
    /// before-hook, then content callback or on-hook (wildcard default).
    fn construct_tag(
        &self,
        value: &Value,
        tag: Option<&str>,
        content: TagContent,
        attrs: &Attrs,
        level: usize,
    ) -> String {
        let mut evt = TagEvent {
            renderer: self,
            value,
            tag: tag.map(ToOwned::to_owned),
            content: match &content {
                TagContent::Text(text) => text.clone(),
                TagContent::Producer(_) => String::new(),
            },
            attrs: attrs.clone(),
            level,
            indent: self.indent_for(level),
            cancel: false,
            rst: String::new(),
        };

        if let Some(handler) = tag.and_then(|name| self.hooks.before(name)) {
            handler(&mut evt);
        }

        if evt.cancel {
            tracing::trace!(tag = tag.unwrap_or(""), "Construction cancelled by before-hook");
        } else {
            match content {
                TagContent::Producer(producer) => producer(&mut evt),
                TagContent::Text(_) => {
                    // dispatch on the name the pipeline was entered with,
                    // not on anything a before-hook wrote to evt.tag
                    if let Some(handler) = self.hooks.resolve(tag) {
                        handler(&mut evt);
                    }
                }
            }
        }

        evt.rst
    }
}

/// Shorthand: render with a fresh default renderer (tag `div`, no
/// attributes, no pretty-printing).
///
/// # Errors
///
/// Returns [`RenderError::RecursionLimit`] when nesting exceeds
/// [`DEFAULT_MAX_DEPTH`].
pub fn to_markup(value: &Value) -> Result<String, RenderError> {
    MarkupRenderer::new().to_markup(value)
}
