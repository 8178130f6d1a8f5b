//! Minimal CSS selector parsing and matching.
//!
//! Supports what page scripts and the presentation controllers need:
//! - type, `.class`, `#id`, `[attr]`, `[attr=value]` and `*` simple selectors
//! - descendant (whitespace) and child (`>`) combinators
//! - comma-separated selector lists
//!
//! Parsing is permissive: unknown bytes end the current identifier and are skipped.

use crate::{Document, NodeId};
use core::mem::take;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    Type(String),
    Class(String),
    Id(String),
    AttrPresent(String),
    AttrEquals { name: String, value: String },
    Universal,
}

/// A sequence of simple selectors with no combinators.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

impl CompoundSelector {
    pub fn is_empty(&self) -> bool {
        self.simples.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// Compounds left to right; `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    Combinator(Combinator),
    /// Whitespace that implies a descendant combinator.
    DescendantWs,
    Simple(SimpleSelector),
    /// A byte that starts no selector component.
    Skip,
}

struct SelectorTokenizer<'input> {
    input_bytes: &'input [u8],
    index: usize,
    pending_whitespace: bool,
}

impl<'input> SelectorTokenizer<'input> {
    const fn new(input: &'input str) -> Self {
        Self {
            input_bytes: input.as_bytes(),
            index: 0,
            pending_whitespace: false,
        }
    }

    fn next_token(&mut self) -> Option<Tok> {
        if self.pending_whitespace {
            self.pending_whitespace = false;
            return Some(Tok::DescendantWs);
        }
        self.skip_whitespace_descendant();
        if self.pending_whitespace {
            self.pending_whitespace = false;
            if self.index >= self.input_bytes.len() {
                return None;
            }
            return Some(Tok::DescendantWs);
        }
        let current = *self.input_bytes.get(self.index)?;
        let token = match current {
            b'*' => {
                self.advance();
                Tok::Simple(SimpleSelector::Universal)
            }
            b'.' => {
                self.advance();
                Tok::Simple(SimpleSelector::Class(self.consume_ident()))
            }
            b'#' => {
                self.advance();
                Tok::Simple(SimpleSelector::Id(self.consume_ident()))
            }
            b'[' => self.consume_attr(),
            b'>' => {
                self.advance();
                self.skip_spaces();
                Tok::Combinator(Combinator::Child)
            }
            byte if is_ident_byte(byte) => {
                Tok::Simple(SimpleSelector::Type(self.consume_ident().to_ascii_lowercase()))
            }
            _ => {
                self.advance();
                Tok::Skip
            }
        };
        Some(token)
    }

    fn advance(&mut self) {
        self.index = self.index.saturating_add(1);
    }

    fn peek(&self) -> Option<u8> {
        self.input_bytes.get(self.index).copied()
    }

    /// Skip whitespace and mark that a descendant combinator should be emitted.
    fn skip_whitespace_descendant(&mut self) {
        let start = self.index;
        self.skip_spaces();
        if self.index > start && start > 0 {
            self.pending_whitespace = true;
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.advance();
        }
    }

    /// Identifier of ASCII alphanumerics, `-` and `_`, case preserved.
    fn consume_ident(&mut self) -> String {
        let start = self.index;
        while self.peek().is_some_and(is_ident_byte) {
            self.advance();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).into_owned()
    }

    /// `[name]`, `[name=value]`, `[name="value"]`.
    fn consume_attr(&mut self) -> Tok {
        self.advance();
        self.skip_spaces();
        let name = self.consume_ident().to_ascii_lowercase();
        self.skip_spaces();
        let value = if self.peek() == Some(b'=') {
            self.advance();
            self.skip_spaces();
            match self.peek() {
                Some(quote @ (b'"' | b'\'')) => {
                    self.advance();
                    Some(self.consume_until(|byte| byte == quote))
                }
                _ => Some(self.consume_until(|byte| byte.is_ascii_whitespace() || byte == b']')),
            }
        } else {
            None
        };
        while self.peek().is_some_and(|byte| byte != b']') {
            self.advance();
        }
        self.advance();
        match value {
            Some(value) => Tok::Simple(SimpleSelector::AttrEquals { name, value }),
            None => Tok::Simple(SimpleSelector::AttrPresent(name)),
        }
    }

    fn consume_until(&mut self, stop: impl Fn(u8) -> bool) -> String {
        let start = self.index;
        while self.peek().is_some_and(|byte| !stop(byte)) {
            self.advance();
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        let out = String::from_utf8_lossy(slice).into_owned();
        if matches!(self.peek(), Some(b'"' | b'\'')) {
            self.advance();
        }
        out
    }
}

const fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

/// Parse a comma-separated selector list. Empty parts are dropped.
pub fn parse_selector_list(input: &str) -> SelectorList {
    let selectors = input
        .split(',')
        .map(|part| parse_complex_selector(part.trim()))
        .filter(|selector| !selector.compounds.is_empty())
        .collect();
    SelectorList { selectors }
}

/// Parse one complex selector.
pub fn parse_complex_selector(input: &str) -> ComplexSelector {
    let mut tokens = SelectorTokenizer::new(input);
    let mut selector = ComplexSelector::default();
    let mut current = CompoundSelector::default();
    let mut pending: Option<Combinator> = None;

    while let Some(token) = tokens.next_token() {
        match token {
            Tok::Combinator(combinator) => {
                if !current.is_empty() {
                    pending = Some(combinator);
                }
            }
            Tok::DescendantWs => {
                if !current.is_empty() && pending.is_none() {
                    pending = Some(Combinator::Descendant);
                }
            }
            Tok::Simple(simple) => {
                if let Some(combinator) = pending.take() {
                    selector.compounds.push(take(&mut current));
                    selector.combinators.push(combinator);
                }
                current.simples.push(simple);
            }
            Tok::Skip => {}
        }
    }
    if !current.is_empty() {
        selector.compounds.push(current);
    }
    selector
}

pub fn matches_selector_list(document: &Document, element: NodeId, list: &SelectorList) -> bool {
    list.selectors
        .iter()
        .any(|selector| matches_complex(document, element, selector))
}

/// Right-to-left match with backtracking over descendant combinators.
pub fn matches_complex(document: &Document, element: NodeId, selector: &ComplexSelector) -> bool {
    match selector.compounds.len() {
        0 => false,
        len => matches_from(document, element, selector, len - 1),
    }
}

fn matches_from(
    document: &Document,
    element: NodeId,
    selector: &ComplexSelector,
    position: usize,
) -> bool {
    let Some(compound) = selector.compounds.get(position) else {
        return false;
    };
    if !matches_compound(document, element, compound) {
        return false;
    }
    if position == 0 {
        return true;
    }
    let left = position - 1;
    match selector.combinators.get(left) {
        Some(Combinator::Child) => document
            .parent(element)
            .is_some_and(|parent| matches_from(document, parent, selector, left)),
        Some(Combinator::Descendant) => document
            .ancestors(element)
            .skip(1)
            .any(|ancestor| matches_from(document, ancestor, selector, left)),
        None => false,
    }
}

pub fn matches_compound(document: &Document, element: NodeId, compound: &CompoundSelector) -> bool {
    let Some(tag) = document.tag_name(element) else {
        return false;
    };
    compound.simples.iter().all(|simple| match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(type_name) => type_name == tag,
        SimpleSelector::Class(class_name) => document.has_class(element, class_name),
        SimpleSelector::Id(id_value) => document.element_id(element) == Some(id_value.as_str()),
        SimpleSelector::AttrPresent(name) => document.has_attribute(element, name),
        SimpleSelector::AttrEquals { name, value } => {
            document.attribute(element, name) == Some(value.as_str())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> SimpleSelector {
        SimpleSelector::Class(name.to_owned())
    }

    #[test]
    fn parses_compound_and_combinators() {
        let selector = parse_complex_selector("section#work > .portfolio-grid .carousel-nav.prev-btn");
        assert_eq!(selector.compounds.len(), 3);
        assert_eq!(
            selector.combinators,
            vec![Combinator::Child, Combinator::Descendant]
        );
        assert_eq!(
            selector.compounds[0].simples,
            vec![
                SimpleSelector::Type(String::from("section")),
                SimpleSelector::Id(String::from("work")),
            ]
        );
        assert_eq!(
            selector.compounds[2].simples,
            vec![class("carousel-nav"), class("prev-btn")]
        );
    }

    #[test]
    fn parses_attribute_forms() {
        let list = parse_selector_list("[data-index], img[src='a.png'] , ");
        assert_eq!(list.selectors.len(), 2);
        assert_eq!(
            list.selectors[0].compounds[0].simples,
            vec![SimpleSelector::AttrPresent(String::from("data-index"))]
        );
        assert_eq!(
            list.selectors[1].compounds[0].simples,
            vec![
                SimpleSelector::Type(String::from("img")),
                SimpleSelector::AttrEquals {
                    name: String::from("src"),
                    value: String::from("a.png"),
                },
            ]
        );
    }

    #[test]
    fn trailing_and_leading_whitespace_is_not_a_combinator() {
        let selector = parse_complex_selector("  .modal-thumb  ");
        assert_eq!(selector.compounds.len(), 1);
        assert!(selector.combinators.is_empty());
    }

    #[test]
    fn descendant_matching_backtracks() -> anyhow::Result<()> {
        let mut document = Document::new();
        let root = document.root();
        let outer = document.create_element("div");
        document.set_attribute(outer, "class", "a");
        let middle = document.create_element("div");
        document.set_attribute(middle, "class", "b");
        let inner = document.create_element("span");
        document.append_child(root, outer)?;
        document.append_child(outer, middle)?;
        document.append_child(middle, inner)?;

        assert!(document.matches(inner, ".a .b span"));
        assert!(document.matches(inner, ".a span"));
        assert!(document.matches(inner, ".b > span"));
        assert!(!document.matches(inner, ".a > span"));
        assert!(!document.matches(inner, ".b .a span"));
        Ok(())
    }
}
