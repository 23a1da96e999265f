//! Control-character stripping for text that ends up in spreadsheet cells.
//!
//! The ads API passes through user-authored text (brand names, ad titles)
//! that occasionally carries raw control bytes. XLSX rejects most of them,
//! so every string field of an [`crate::AdRecord`] goes through
//! [`sanitize_string`] before it is stored.

/// Removes every ASCII control character (`0x00`–`0x1F` and `0x7F`).
///
/// All other characters, including non-ASCII text, pass through unchanged.
#[must_use]
pub fn sanitize_string(value: &str) -> String {
    value.chars().filter(|c| !c.is_ascii_control()).collect()
}

/// [`sanitize_string`] lifted over an optional field.
#[must_use]
pub fn sanitize_opt(value: Option<&str>) -> Option<String> {
    value.map(sanitize_string)
}
