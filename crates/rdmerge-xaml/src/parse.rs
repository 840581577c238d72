//! Parsing XAML text into the owned element tree.
//!
//! `roxmltree` keeps namespace declarations out of the attribute list; this
//! module puts them back as ordinary [`Attribute`]s (only the declarations
//! introduced on each element, not inherited ones) so downstream code sees the
//! document the way it was written. Whitespace-only text nodes are dropped —
//! the canonical writer re-indents on output.

use crate::element::{Attribute, Element, Node, QName};
use crate::error::XamlResult;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse a XAML document into its root [`Element`].
pub fn parse_document(text: &str) -> XamlResult<Element> {
    let doc = roxmltree::Document::parse(text)?;
    Ok(convert_element(doc.root_element()))
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(element_name(node));

    // Namespace declarations introduced on this element, in declaration order.
    for ns in node.namespaces() {
        if ns.name() == Some("xml") || inherited_from_parent(node, ns.name(), ns.uri()) {
            continue;
        }
        element
            .attributes
            .push(Attribute::new(QName::xmlns(ns.name()), ns.uri()));
    }

    for attr in node.attributes() {
        element.attributes.push(Attribute::new(
            attribute_name(node, &attr),
            attr.value(),
        ));
    }

    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(convert_element(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    element.children.push(Node::Text(trimmed.to_string()));
                }
            }
        }
    }

    element
}

fn element_name(node: roxmltree::Node<'_, '_>) -> QName {
    let tag = node.tag_name();
    match tag.namespace() {
        None => QName::local(tag.name()),
        Some(uri) => QName {
            prefix: prefix_for(node, uri, true),
            local: tag.name().to_string(),
            namespace: Some(uri.to_string()),
        },
    }
}

fn attribute_name(node: roxmltree::Node<'_, '_>, attr: &roxmltree::Attribute<'_, '_>) -> QName {
    match attr.namespace() {
        None => QName::local(attr.name()),
        Some(uri) => QName {
            // Attributes never pick up the default namespace, so a prefixed
            // declaration must exist in scope.
            prefix: prefix_for(node, uri, false),
            local: attr.name().to_string(),
            namespace: Some(uri.to_string()),
        },
    }
}

/// Find the prefix bound to `uri` in the scope of `node`.
///
/// Returns `None` for the default namespace (when `allow_default` is set);
/// otherwise the first prefixed binding wins, which is deterministic for a
/// given document.
fn prefix_for(node: roxmltree::Node<'_, '_>, uri: &str, allow_default: bool) -> Option<String> {
    if uri == XML_NAMESPACE {
        return Some("xml".to_string());
    }
    let mut prefixed = None;
    for ns in node.namespaces() {
        if ns.uri() != uri {
            continue;
        }
        match ns.name() {
            None if allow_default => return None,
            Some(prefix) if prefixed.is_none() => prefixed = Some(prefix.to_string()),
            _ => {}
        }
    }
    prefixed
}

fn inherited_from_parent(
    node: roxmltree::Node<'_, '_>,
    prefix: Option<&str>,
    uri: &str,
) -> bool {
    node.parent_element().is_some_and(|parent| {
        parent
            .namespaces()
            .any(|ns| ns.name() == prefix && ns.uri() == uri)
    })
}
