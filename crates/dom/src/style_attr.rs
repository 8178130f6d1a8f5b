//! Inline `style="..."` attribute editing.
//!
//! Parsing is deliberately small: split on `;`, split each item on the first
//! `:`, trim, lowercase the property. Invalid items are skipped. Writing
//! serializes declarations back as `prop: value;` joined by spaces.

/// A single declaration from a style attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// ASCII whitespace per CSS Syntax (TAB, LF, FF, CR, SPACE).
const fn is_ascii_whitespace(character: char) -> bool {
    matches!(
        character,
        '\u{0009}' | '\u{000A}' | '\u{000C}' | '\u{000D}' | '\u{0020}'
    )
}

/// Parse the value of a `style` attribute into declarations, in source order.
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    for raw_item in input.split(';') {
        let item = raw_item.trim_matches(is_ascii_whitespace);
        let Some((raw_prop, raw_value)) = item.split_once(':') else {
            continue;
        };
        let property_text = raw_prop.trim_matches(is_ascii_whitespace);
        let value_text = raw_value.trim_matches(is_ascii_whitespace);
        if property_text.is_empty() || value_text.is_empty() {
            continue;
        }
        out.push(Declaration {
            property: property_text.to_ascii_lowercase(),
            value: value_text.to_owned(),
        });
    }
    out
}

/// Last declared value of `property`, matching source-order precedence.
pub fn property_value(input: &str, property: &str) -> Option<String> {
    let needle = property.to_ascii_lowercase();
    parse_style_attribute(input)
        .into_iter()
        .rev()
        .find(|decl| decl.property == needle)
        .map(|decl| decl.value)
}

/// Return `input` with `property` set to `value`, or removed when `value` is empty.
pub fn with_property(input: &str, property: &str, value: &str) -> String {
    let needle = property.to_ascii_lowercase();
    let mut declarations: Vec<Declaration> = parse_style_attribute(input)
        .into_iter()
        .filter(|decl| decl.property != needle)
        .collect();
    let trimmed = value.trim_matches(is_ascii_whitespace);
    if !trimmed.is_empty() {
        declarations.push(Declaration {
            property: needle,
            value: trimmed.to_owned(),
        });
    }
    serialize(&declarations)
}

pub fn serialize(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|decl| format!("{}: {};", decl.property, decl.value))
        .collect::<Vec<_>>()
        .join(" ")
}
