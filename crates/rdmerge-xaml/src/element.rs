//! The owned element tree.
//!
//! [`Element`] keeps attributes in document order (a `Vec`, not a map) because
//! attribute order is part of the canonical output. Namespace declarations are
//! stored as ordinary attributes in [`XMLNS_NAMESPACE`] so the merge engine's
//! root-attribute union treats them like everything else.

use std::fmt;

use crate::XMLNS_NAMESPACE;

/// A qualified XML name: the prefix as written, the local name, and the
/// namespace URI the prefix resolved to (if any).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QName {
    /// Prefix as it appeared in the source (`x` in `x:Key`), if any.
    pub prefix: Option<String>,
    /// Local part of the name.
    pub local: String,
    /// Resolved namespace URI, if the name is in a namespace.
    pub namespace: Option<String>,
}

impl QName {
    /// A name with no prefix and no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
            namespace: None,
        }
    }

    /// A namespaced name rendered without a prefix (default namespace).
    pub fn in_namespace(local: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// A prefixed, namespaced name.
    pub fn prefixed(
        prefix: impl Into<String>,
        local: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// The name for a namespace declaration attribute: `xmlns` for the
    /// default declaration, `xmlns:prefix` otherwise.
    pub fn xmlns(prefix: Option<&str>) -> Self {
        match prefix {
            None => Self {
                prefix: None,
                local: "xmlns".to_string(),
                namespace: Some(XMLNS_NAMESPACE.to_string()),
            },
            Some(p) => Self {
                prefix: Some("xmlns".to_string()),
                local: p.to_string(),
                namespace: Some(XMLNS_NAMESPACE.to_string()),
            },
        }
    }

    /// Returns `true` if this name declares a namespace binding.
    pub fn is_xmlns(&self) -> bool {
        self.namespace.as_deref() == Some(XMLNS_NAMESPACE)
    }

    /// Two names address the same attribute slot when namespace and local
    /// name match, regardless of the prefix they were written with.
    pub fn same_slot(&self, other: &QName) -> bool {
        self.local == other.local && self.namespace == other.namespace
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// A single attribute: name plus value, order-preserving by position in
/// [`Element::attributes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute's qualified name.
    pub name: QName,
    /// The attribute's value, unescaped.
    pub value: String,
}

impl Attribute {
    /// Create an attribute.
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// A child node: a nested element or a run of character data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// Trimmed, non-empty character data.
    Text(String),
}

/// An owned XML element with ordered attributes and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// The element's qualified name.
    pub name: QName,
    /// Attributes in document order, namespace declarations included.
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Value of the un-namespaced attribute with the given local name.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.namespace.is_none() && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Value of the attribute with the given namespace URI and local name.
    pub fn attribute_ns(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.namespace.as_deref() == Some(namespace) && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, overwriting an existing one in place when a name
    /// addressing the same slot (namespace + local) is already present.
    /// Overwriting keeps the original position, so repeated merges stay
    /// byte-stable.
    pub fn set_attribute(&mut self, name: QName, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name.same_slot(&name)) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// The default namespace declared on this element, if any.
    pub fn declared_default_namespace(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is_xmlns() && a.name.prefix.is_none())
            .map(|a| a.value.as_str())
    }

    /// Direct child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// All element descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&Element> = self.child_elements().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// The concatenated character data of direct text children.
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            Node::Text(text) => Some(text.as_str()),
            Node::Element(_) => None,
        })
    }

    /// Append a child element.
    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }
}

/// Depth-first iterator over element descendants in document order.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Push children in reverse so the first child is popped first.
        let children: Vec<&Element> = next.child_elements().collect();
        self.stack.extend(children.into_iter().rev());
        Some(next)
    }
}
