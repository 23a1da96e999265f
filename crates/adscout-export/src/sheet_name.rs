//! Sheet-name rules for xlsx workbooks.
//!
//! Excel rejects names longer than 31 characters, names containing any of
//! `[ ] : * ? / \`, names starting or ending with an apostrophe, the reserved
//! name `History`, and names that differ from another sheet only by case.

use std::collections::HashSet;

pub const MAX_SHEET_NAME_CHARS: usize = 31;

const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const FALLBACK: &str = "Sheet";

/// Makes `name` a valid sheet name on its own.
///
/// Forbidden characters become `_`, the result is truncated to 31 characters,
/// and a blank result becomes `Sheet`.
#[must_use]
pub fn sanitize_sheet_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    let truncated: String = replaced
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    let trimmed = truncated.trim_end_matches('\'');

    if trimmed.trim().is_empty() {
        FALLBACK.to_owned()
    } else if trimmed.eq_ignore_ascii_case("history") {
        format!("{trimmed}_")
    } else {
        trimmed.to_owned()
    }
}

/// Sanitizes every name and disambiguates repeats with ` (2)`, ` (3)`, ...
///
/// Comparison is case-insensitive. The base name is shortened as needed so
/// the suffixed name still fits in 31 characters.
pub fn unique_sheet_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for name in names {
        let base = sanitize_sheet_name(name);
        let mut candidate = base.clone();
        let mut n = 2u32;
        while taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            let keep = MAX_SHEET_NAME_CHARS.saturating_sub(suffix.chars().count());
            let stem: String = base.chars().take(keep).collect();
            candidate = format!("{stem}{suffix}");
            n += 1;
        }
        taken.insert(candidate.to_lowercase());
        out.push(candidate);
    }

    out
}
