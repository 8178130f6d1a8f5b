use core::fmt;

use crate::{Attributes, DomNode, Document, NodeId, NodeKind};
use serde_json::{Map, Value, json};

// -----------------------
// Module-scope helpers
// -----------------------

fn flush_text(children: &mut Vec<Value>, text_buf: &mut String) {
    if !text_buf.trim().is_empty() {
        children.push(json!({ "type": "text", "text": text_buf.clone() }));
    }
    text_buf.clear();
}

/// Children of `node` with adjacent text nodes merged.
fn coalesce_children(document: &Document, node: NodeId) -> Vec<Value> {
    let mut children: Vec<Value> = Vec::new();
    let mut text_buf = String::new();
    for child in document.children(node) {
        if let Some(DomNode {
            kind: NodeKind::Text { text },
            ..
        }) = document.node(child)
        {
            text_buf.push_str(text);
            continue;
        }
        flush_text(&mut children, &mut text_buf);
        let value = node_to_json(document, child);
        if !value.is_null() {
            children.push(value);
        }
    }
    flush_text(&mut children, &mut text_buf);
    children
}

fn sorted_attrs(attrs: &Attributes) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = attrs
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    pairs.sort_by(|left, right| left.0.cmp(right.0));
    pairs
}

fn node_to_json(document: &Document, node: NodeId) -> Value {
    let Some(DomNode { kind, attrs }) = document.node(node) else {
        return Value::Null;
    };
    match kind {
        NodeKind::Document => {
            json!({ "type": "document", "children": coalesce_children(document, node) })
        }
        NodeKind::Element { tag } => {
            let mut attrs_obj = Map::new();
            for (key, value) in sorted_attrs(attrs) {
                attrs_obj.insert(key.to_owned(), Value::String(value.to_owned()));
            }
            json!({
                "type": "element",
                "tag": tag,
                "attrs": Value::Object(attrs_obj),
                "children": coalesce_children(document, node),
            })
        }
        NodeKind::Text { text } => {
            if text.trim().is_empty() {
                Value::Null
            } else {
                json!({ "type": "text", "text": text })
            }
        }
        NodeKind::Comment { text } => json!({ "type": "comment", "text": text }),
    }
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for character in input.chars() {
        match character {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(character),
        }
    }
    out
}

fn write_indent(formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        formatter.write_str("  ")?;
    }
    Ok(())
}

fn fmt_node(
    document: &Document,
    node: NodeId,
    formatter: &mut fmt::Formatter<'_>,
    depth: usize,
) -> fmt::Result {
    let Some(DomNode { kind, attrs }) = document.node(node) else {
        return Ok(());
    };
    match kind {
        NodeKind::Document => {
            write_indent(formatter, depth)?;
            writeln!(formatter, "#document")?;
            for child in document.children(node) {
                fmt_node(document, child, formatter, depth + 1)?;
            }
        }
        NodeKind::Element { tag } => {
            write_indent(formatter, depth)?;
            write!(formatter, "<{tag}")?;
            for (key, value) in sorted_attrs(attrs) {
                write!(formatter, " {key}=\"{}\"", escape_text(value))?;
            }
            writeln!(formatter, ">")?;
            for child in document.children(node) {
                fmt_node(document, child, formatter, depth + 1)?;
            }
            write_indent(formatter, depth)?;
            writeln!(formatter, "</{tag}>")?;
        }
        NodeKind::Text { text } => {
            if text.chars().all(char::is_whitespace) {
                return Ok(());
            }
            write_indent(formatter, depth)?;
            writeln!(formatter, "\"{}\"", escape_text(text))?;
        }
        NodeKind::Comment { text } => {
            write_indent(formatter, depth)?;
            writeln!(formatter, "<!--{}-->", escape_text(text))?;
        }
    }
    Ok(())
}

impl fmt::Debug for Document {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "Document")?;
        fmt_node(self, self.root(), formatter, 0)
    }
}

impl Document {
    /// Build a deterministic JSON representation of the document.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "div", "attrs": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    /// - Comment: { "type":"comment", "text":"..." }
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root())
    }

    /// Pretty JSON string for snapshots and test comparisons.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json_value()).unwrap_or_else(|_| String::from("{}"))
    }
}
