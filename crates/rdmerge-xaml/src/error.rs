//! Error types for XAML parsing.

/// Errors produced while building an element tree from XAML text.
#[derive(Debug, thiserror::Error)]
pub enum XamlError {
    /// The text is not well-formed XML.
    #[error("invalid XML: {0}")]
    Parse(#[from] roxmltree::Error),
}

/// Result alias for XAML operations.
pub type XamlResult<T> = Result<T, XamlError>;
