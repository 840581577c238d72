//! Owned XAML element tree for the resource dictionary merger.
//!
//! This crate provides the document model every other rdmerge crate works
//! with. XAML files are parsed into an owned [`Element`] tree (no borrowed
//! lifetimes, so documents can be cached and their entries deep-copied into a
//! merged output), serialized back out through a canonical writer, and
//! queried for the resource key each entry is stored under.
//!
//! # Key Types
//!
//! - [`Element`] — an element with ordered attributes and children
//! - [`QName`] — qualified name keeping the original prefix and resolved URI
//! - [`parse_document`] — build an [`Element`] tree from XAML text
//! - [`to_bytes`] — deterministic, byte-stable serialization
//! - [`resource_key`] — derive the key a resource entry is stored under

pub mod element;
pub mod error;
pub mod key;
pub mod parse;
pub mod writer;

pub use element::{Attribute, Descendants, Element, Node, QName};
pub use error::{XamlError, XamlResult};
pub use key::resource_key;
pub use parse::parse_document;
pub use writer::to_bytes;

/// The XML namespace URI that namespace declarations themselves live in.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// The XAML language namespace (`x:` by convention) holding `x:Key`.
pub const XAML_LANGUAGE_NAMESPACE: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

/// Local name of the dictionary element; also the prefix that identifies
/// nested dictionary machinery (`ResourceDictionary.MergedDictionaries`).
pub const RESOURCE_DICTIONARY: &str = "ResourceDictionary";
