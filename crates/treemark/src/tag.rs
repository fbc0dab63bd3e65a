//! Default tag construction.
//!
//! [`default_tag_handler`] is the wildcard on-hook installed in every
//! registry: it serializes attributes, picks the close style and writes
//! the final string for one tag. Custom wildcard hooks that want the
//! stock behavior alongside their own can call it directly.

use std::fmt::Write;

use crate::event::TagEvent;
use crate::value::Value;

/// Tags rendered self-closing when their content is empty.
pub const AUTOCLOSE_TAGS: &[&str] = &[
    "img", "br", "hr", "input", "area", "link", "meta", "param", "base", "col", "command",
    "keygen", "source",
];

/// Default construction of one tag from its event.
///
/// Attributes are emitted in key order; `class` is normalized and joined
/// without re-escaping (its tokens come from configuration, not user
/// text), every other value goes through the renderer's escaper. Empty
/// content yields a self-closing form for [`AUTOCLOSE_TAGS`] and an
/// explicit empty pair otherwise. The closing tag keeps the indentation
/// prefix only when the content ends with another tag.
pub fn default_tag_handler(evt: &mut TagEvent<'_>) {
    let Some(tag) = evt.tag.clone() else {
        // no element to wrap; emit the content in place
        evt.rst = format!("{}{}", evt.indent, evt.content);
        return;
    };

    let mut attr = String::new();
    for (name, value) in &evt.attrs {
        if name == "class" {
            write!(attr, " {name}=\"{}\"", normalize_classes(value).join(" ")).unwrap();
        } else {
            write!(attr, " {name}=\"{}\"", evt.renderer.escape(&value.to_text())).unwrap();
        }
    }

    let mut out = String::with_capacity(evt.content.len() + tag.len() * 2 + attr.len() + 8);
    out.push_str(&evt.indent);
    out.push('<');
    out.push_str(&tag);
    out.push_str(&attr);

    let trimmed = evt.content.trim();
    if trimmed.is_empty() {
        if AUTOCLOSE_TAGS.contains(&tag.as_str()) {
            out.push_str("/>");
        } else {
            write!(out, "></{tag}>").unwrap();
        }
    } else {
        let closing_indent = if trimmed.ends_with('>') {
            evt.indent.as_str()
        } else {
            ""
        };
        write!(out, ">{}{closing_indent}</{tag}>", evt.content).unwrap();
    }

    evt.rst = out;
}

/// Built-in handler for the reserved `_html` name: splice verbatim
/// content, indenting it only when it looks like markup.
pub(crate) fn raw_html_handler(evt: &mut TagEvent<'_>) {
    let indent = if evt.content.trim_start().starts_with('<') {
        evt.indent.as_str()
    } else {
        ""
    };
    evt.rst = format!("{indent}{}", evt.content);
}

/// Normalize a `class` attribute value to a de-duplicated token list.
///
/// Strings split on single spaces, sequences are used as-is; first-seen
/// order wins.
fn normalize_classes(value: &Value) -> Vec<String> {
    let tokens: Vec<String> = match value {
        Value::String(text) => text.split(' ').map(ToOwned::to_owned).collect(),
        Value::Seq(items) => items.iter().map(Value::to_text).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_text()],
    };

    let mut unique: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !unique.contains(&token) {
            unique.push(token);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::renderer::MarkupRenderer;
    use crate::value::Attrs;

    fn event<'a>(
        renderer: &'a MarkupRenderer,
        value: &'a Value,
        tag: Option<&str>,
        attrs: Attrs,
        level: usize,
    ) -> TagEvent<'a> {
        TagEvent {
            renderer,
            value,
            tag: tag.map(ToOwned::to_owned),
            content: String::new(),
            attrs,
            level,
            indent: renderer.indent_for(level),
            cancel: false,
            rst: String::new(),
        }
    }

    #[test]
    fn test_empty_content_autoclose_tag_self_closes() {
        let renderer = MarkupRenderer::new();
        let value = Value::Null;
        let mut evt = event(&renderer, &value, Some("img"), Attrs::new(), 0);
        default_tag_handler(&mut evt);
        assert_eq!(evt.rst, "<img/>");
    }

    #[test]
    fn test_empty_content_ordinary_tag_uses_explicit_pair() {
        let renderer = MarkupRenderer::new();
        let value = Value::Null;
        let mut evt = event(&renderer, &value, Some("div"), Attrs::new(), 0);
        default_tag_handler(&mut evt);
        assert_eq!(evt.rst, "<div></div>");
    }

    #[test]
    fn test_attributes_serialize_in_key_order_escaped() {
        let renderer = MarkupRenderer::new();
        let value = Value::Null;
        let Value::Map(attrs) = Value::from(json!({"z": "1", "a": "say \"hi\""})) else {
            unreachable!()
        };
        let mut evt = event(&renderer, &value, Some("p"), attrs, 0);
        evt.content = "t".to_owned();
        default_tag_handler(&mut evt);
        assert_eq!(evt.rst, "<p a=\"say &quot;hi&quot;\" z=\"1\">t</p>");
    }

    #[test]
    fn test_class_string_and_list_forms_deduplicate() {
        let string_form = Value::from("a a b");
        assert_eq!(normalize_classes(&string_form), vec!["a", "b"]);

        let list_form = Value::from(json!(["a", "b", "a"]));
        assert_eq!(normalize_classes(&list_form), vec!["a", "b"]);
    }

    #[test]
    fn test_class_attribute_joined_without_escaping() {
        let renderer = MarkupRenderer::new();
        let value = Value::Null;
        let Value::Map(attrs) = Value::from(json!({"class": "x x y"})) else {
            unreachable!()
        };
        let mut evt = event(&renderer, &value, Some("div"), attrs, 0);
        evt.content = "c".to_owned();
        default_tag_handler(&mut evt);
        assert_eq!(evt.rst, "<div class=\"x y\">c</div>");
    }

    #[test]
    fn test_text_content_suppresses_closing_indent() {
        let renderer = MarkupRenderer::new().with_indent("  ");
        let value = Value::Null;
        let mut evt = event(&renderer, &value, Some("p"), Attrs::new(), 1);
        evt.content = "text".to_owned();
        default_tag_handler(&mut evt);
        assert_eq!(evt.rst, "\n  <p>text</p>");
    }

    #[test]
    fn test_nested_content_keeps_closing_indent() {
        let renderer = MarkupRenderer::new().with_indent("  ");
        let value = Value::Null;
        let mut evt = event(&renderer, &value, Some("div"), Attrs::new(), 0);
        evt.content = "\n  <p>text</p>".to_owned();
        default_tag_handler(&mut evt);
        assert_eq!(evt.rst, "\n<div>\n  <p>text</p>\n</div>");
    }

    #[test]
    fn test_absent_tag_emits_content_only() {
        let renderer = MarkupRenderer::new();
        let value = Value::Null;
        let mut evt = event(&renderer, &value, None, Attrs::new(), 0);
        evt.content = "bare".to_owned();
        default_tag_handler(&mut evt);
        assert_eq!(evt.rst, "bare");
    }

    #[test]
    fn test_raw_html_markup_keeps_indent_inline_text_does_not() {
        let renderer = MarkupRenderer::new().with_indent("  ");
        let value = Value::Null;

        let mut markup = event(&renderer, &value, Some("_html"), Attrs::new(), 1);
        markup.content = "<b>B</b>".to_owned();
        raw_html_handler(&mut markup);
        assert_eq!(markup.rst, "\n  <b>B</b>");

        let mut inline = event(&renderer, &value, Some("_html"), Attrs::new(), 1);
        inline.content = "plain".to_owned();
        raw_html_handler(&mut inline);
        assert_eq!(inline.rst, "plain");
    }
}
