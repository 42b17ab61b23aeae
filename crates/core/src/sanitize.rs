//! Identifier sanitization for generated screen elements.
//!
//! Field names are written for humans ("Output file", "--dry-run?") but the
//! elements generated for them need addresses that are safe to use as ids.

use crate::error::{Error, Result};

/// Character used to replace runs of invalid characters when none is given.
pub const DEFAULT_REPLACEMENT: char = '_';

/// Whether a character may not appear in a sanitized identifier.
fn is_invalid(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_whitespace() || c.is_control()
}

/// Sanitizes `name` using [`DEFAULT_REPLACEMENT`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `name` is empty.
pub fn sanitize_default(name: &str) -> Result<String> {
    sanitize(name, DEFAULT_REPLACEMENT)
}

/// Converts `name` into a safe identifier.
///
/// Every maximal run of punctuation, whitespace and control characters
/// becomes a single `replacement`. Since `_` is punctuation, runs of it
/// collapse too, while a letter used as `replacement` is left alone where it
/// already appears in `name`. A leading digit is prefixed with `replacement`.
///
/// # Arguments
///
/// * `name` - Any text, usually a parameter destination
/// * `replacement` - Character written in place of each invalid run
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `name` is empty, or if `replacement`
/// is not `_` and is itself punctuation or whitespace.
///
/// # Examples
///
/// ```
/// use argui_core::sanitize::sanitize;
///
/// let cleaned = sanitize("? this+ -?\\ /. is # a    ____ string", '_').unwrap();
/// assert_eq!(cleaned, "_this_is_a_string");
///
/// assert_eq!(sanitize("2nd value", '_').unwrap(), "_2nd_value");
/// ```
pub fn sanitize(name: &str, replacement: char) -> Result<String> {
    if name.is_empty() {
        return Err(Error::invalid_argument(
            "Cannot sanitize a name that was not supplied",
        ));
    }

    if replacement != DEFAULT_REPLACEMENT && is_invalid(replacement) {
        return Err(Error::invalid_argument(format!(
            "`{}` cannot be used as a replacement since it would need to be sanitized itself",
            replacement.escape_default()
        )));
    }

    let mut cleaned = String::with_capacity(name.len());
    let mut in_run = false;

    for c in name.chars() {
        if is_invalid(c) {
            if !in_run {
                cleaned.push(replacement);
                in_run = true;
            }
        } else {
            cleaned.push(c);
            in_run = false;
        }
    }

    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        cleaned.insert(0, replacement);
    }

    Ok(cleaned)
}
