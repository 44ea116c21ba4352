//! Directive extraction from field metadata.
//!
//! The metadata of a field is a space-separated list of `key:"value"` tokens, for example
//! `gen-copier:"identifier" json:"id"`. The parser is intentionally minimal: it splits on single
//! spaces and trims quote characters from the value. Values that contain spaces and keys that
//! are repeated are not supported, the result for such metadata is unspecified.

/// Key of the directive that names the target field of a copy.
pub const DIRECTIVE_KEY: &str = "gen-copier";

/// Returns the value associated with `key` in `metadata`, or an empty string if `metadata` is
/// empty or doesn't contain `key`.
pub fn extract_tag_value<'m>(metadata: &'m str, key: &str) -> &'m str {
    if metadata.is_empty() {
        return "";
    }

    for part in metadata.split(' ') {
        let Some(rest) = part.strip_prefix(key) else {
            continue;
        };

        if let Some(value) = rest.strip_prefix(':') {
            return value.trim_matches('"');
        }
    }

    ""
}

/// Returns the target field named by the `gen-copier` directive in `metadata`, if any.
pub fn copier_directive(metadata: &str) -> Option<&str> {
    let value = extract_tag_value(metadata, DIRECTIVE_KEY);
    if value.is_empty() { None } else { Some(value) }
}
