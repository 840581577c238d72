//! Canonical serialization of the element tree.
//!
//! The writer is deterministic: attributes in stored order, two-space
//! indentation, minimal escaping, a fixed XML declaration, and a trailing
//! newline. Identical trees always serialize to identical bytes, which is
//! what lets the output writer skip rewrites on unchanged input.

use std::fmt::Write as _;

use crate::element::{Element, Node};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";
const INDENT: &str = "  ";

/// Serialize a document rooted at `root` into bytes.
pub fn to_bytes(root: &Element) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    write_element(&mut out, root, 0);
    out.push('\n');
    out.into_bytes()
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    indent(out, depth);
    let _ = write!(out, "<{}", element.name);
    for attr in &element.attributes {
        let _ = write!(out, " {}=\"{}\"", attr.name, escape_attribute(&attr.value));
    }

    match element.children.as_slice() {
        [] => out.push_str(" />"),
        // A lone text child stays inline: <sys:String>value</sys:String>.
        [Node::Text(text)] => {
            let _ = write!(out, ">{}</{}>", escape_text(text), element.name);
        }
        children => {
            out.push_str(">\n");
            for child in children {
                match child {
                    Node::Element(el) => write_element(out, el, depth + 1),
                    Node::Text(text) => {
                        indent(out, depth + 1);
                        out.push_str(&escape_text(text));
                    }
                }
                out.push('\n');
            }
            indent(out, depth);
            let _ = write!(out, "</{}>", element.name);
        }
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::QName;
    use crate::parse::parse_document;

    #[test]
    fn empty_element_is_self_closing() {
        let root = Element::new(QName::local("ResourceDictionary"));
        let text = String::from_utf8(to_bytes(&root)).unwrap();
        assert_eq!(
            text,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<ResourceDictionary />\n"
        );
    }

    #[test]
    fn nested_elements_are_indented() {
        let source = r#"<A xmlns:x="urn:x"><B x:Key="k"><C /></B></A>"#;
        let root = parse_document(source).unwrap();
        let text = String::from_utf8(to_bytes(&root)).unwrap();
        assert_eq!(
            text,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <A xmlns:x=\"urn:x\">\n\
             \x20 <B x:Key=\"k\">\n\
             \x20   <C />\n\
             \x20 </B>\n\
             </A>\n"
        );
    }

    #[test]
    fn lone_text_child_stays_inline() {
        let root = parse_document("<Brush>#FF000000</Brush>").unwrap();
        let text = String::from_utf8(to_bytes(&root)).unwrap();
        assert!(text.contains("<Brush>#FF000000</Brush>"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut root = Element::new(QName::local("E"));
        root.set_attribute(QName::local("v"), "a<b & \"c\"");
        let text = String::from_utf8(to_bytes(&root)).unwrap();
        assert!(text.contains("v=\"a&lt;b &amp; &quot;c&quot;\""));
    }

    #[test]
    fn serialization_is_stable_under_reparse() {
        let source = r#"<ResourceDictionary xmlns="urn:p" xmlns:x="urn:x">
            <SolidColorBrush x:Key="A">Red</SolidColorBrush>
            <Style TargetType="Button"><Setter Property="P" Value="1" /></Style>
        </ResourceDictionary>"#;
        let first = to_bytes(&parse_document(source).unwrap());
        let reparsed = parse_document(std::str::from_utf8(&first).unwrap()).unwrap();
        assert_eq!(to_bytes(&reparsed), first);
    }
}
