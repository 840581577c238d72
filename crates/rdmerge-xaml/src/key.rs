//! Resource key derivation.
//!
//! Every entry in a merged dictionary must be addressable by exactly one key.
//! An explicit `x:Key` always wins; `Style` and `DataTemplate` elements can
//! fall back to the type they target, matching how WPF itself keys them.

use crate::element::Element;
use crate::XAML_LANGUAGE_NAMESPACE;

/// Markup-extension prefix wrapping a `TargetType` value: `{x:Type Button}`.
const X_TYPE_PREFIX: &str = "{x:Type ";

/// Derive the canonical resource key for a dictionary entry.
///
/// Rules, in order:
/// 1. a non-empty `x:Key` attribute,
/// 2. for `Style` elements, the `TargetType` value with any `{x:Type ...}`
///    wrapper stripped,
/// 3. for `DataTemplate` elements, the `DataType` value.
///
/// Returns `None` when no key can be derived; the merge engine treats that
/// as fatal.
pub fn resource_key(element: &Element) -> Option<String> {
    if let Some(key) = element.attribute_ns(XAML_LANGUAGE_NAMESPACE, "Key") {
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }

    match element.name.local.as_str() {
        "Style" => element.attribute("TargetType").map(strip_x_type),
        "DataTemplate" => element.attribute("DataType").map(str::to_string),
        _ => None,
    }
}

fn strip_x_type(target_type: &str) -> String {
    match target_type.strip_prefix(X_TYPE_PREFIX) {
        Some(rest) => rest.strip_suffix('}').unwrap_or(rest).to_string(),
        None => target_type.to_string(),
    }
}
