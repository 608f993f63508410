//! Helpers for JVM type and method descriptors.

use crate::errors::ClassReadError;

/// Split a method descriptor into its parameter segment and return segment.
///
/// `"(Ljava/lang/String;I)Lapp/Config;"` becomes
/// `("Ljava/lang/String;I", "Lapp/Config;")`.
pub fn split_method(desc: &str) -> Result<(&str, &str), ClassReadError> {
    let rest = desc
        .strip_prefix('(')
        .ok_or_else(|| ClassReadError::BadDescriptor(desc.to_string()))?;
    let close = rest
        .find(')')
        .ok_or_else(|| ClassReadError::BadDescriptor(desc.to_string()))?;
    Ok((&rest[..close], &rest[close + 1..]))
}

/// Strip array levels, leaving the element type descriptor.
pub fn unwrap_arrays(desc: &str) -> &str {
    desc.trim_start_matches('[')
}

/// Extract the class name from a reference descriptor (`L<name>;`).
/// Returns `None` for primitives, arrays and malformed input.
pub fn reference_class(desc: &str) -> Option<&str> {
    desc.strip_prefix('L')?.strip_suffix(';')
}

/// Whether a descriptor names a reference type under the platform library.
pub fn is_platform_reference(desc: &str) -> bool {
    desc.starts_with("Ljava/")
}
