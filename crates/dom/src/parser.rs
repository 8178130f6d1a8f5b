//! HTML source to [`Document`] conversion on top of html5ever's reference DOM.

use crate::{Document, NodeId};
use anyhow::Error;
use html5ever::tendril::TendrilSink as _;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document as parse_html};
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use url::Url;

/// Copy one rcdom node (and its subtree) under `parent`.
fn walk_tree(handle: &Handle, parent: NodeId, document: &mut Document) -> Result<(), Error> {
    match &handle.data {
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                walk_tree(child, parent, document)?;
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let element = document.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                document.set_attribute(element, &attr.name.local, &attr.value);
            }
            document.append_child(parent, element)?;
            for child in handle.children.borrow().iter() {
                walk_tree(child, element, document)?;
            }
        }
        NodeData::Text { contents } => {
            let text = contents.borrow();
            if !text.trim().is_empty() {
                let node = document.create_text(&text);
                document.append_child(parent, node)?;
            }
        }
        NodeData::Comment { contents } => {
            let node = document.create_comment(contents);
            document.append_child(parent, node)?;
        }
        NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {}
    }
    Ok(())
}

/// Parse a full HTML document.
///
/// Whitespace-only text, doctypes and processing instructions are dropped.
/// `base_url` is what relative `src` values resolve against.
///
/// # Errors
/// Returns an error if the input cannot be read or the tree cannot be built.
pub fn parse_document(html: &str, base_url: Option<Url>) -> Result<Document, Error> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            exact_errors: false,
            scripting_enabled: false,
            ..TreeBuilderOpts::default()
        },
        ..ParseOpts::default()
    };
    let dom = parse_html(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut document = Document::new();
    document.set_base_url(base_url);
    let root = document.root();
    walk_tree(&dom.document, root, &mut document)?;
    debug!(
        "parsed document with {} nodes",
        document.descendants(root).count()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeKind;

    #[test]
    fn parses_elements_attributes_and_text() -> Result<(), Error> {
        let document = parse_document(
            "<!DOCTYPE html><html><body>\n  <div id='a' class='x y'>Hi<!-- note --></div>\n</body></html>",
            None,
        )?;
        let div = document.element_by_id("a");
        assert!(div.is_some());
        let div = div.unwrap_or_else(|| document.root());
        assert_eq!(document.tag_name(div), Some("div"));
        assert_eq!(document.class_list(div), vec!["x", "y"]);
        assert_eq!(document.text_content(div), "Hi");

        let kinds: Vec<&NodeKind> = document
            .children(div)
            .filter_map(|child| document.node(child).map(|node| &node.kind))
            .collect();
        assert!(matches!(kinds.as_slice(), [NodeKind::Text { .. }, NodeKind::Comment { .. }]));

        let body = document.body().unwrap_or_else(|| document.root());
        assert_eq!(document.children(body).count(), 1);
        Ok(())
    }

    #[test]
    fn uppercase_tags_are_lowercased() -> Result<(), Error> {
        let document = parse_document("<DIV><SPAN>t</SPAN></DIV>", None)?;
        let span = document.query_selector(document.root(), "div > span");
        assert!(span.is_some());
        Ok(())
    }
}
