//! Alias normalization.
//!
//! Asset aliases are usually relative paths (`ui/button.png`). Declaration
//! keys use the same text with path separators and dots flattened to `_`.

/// Characters replaced by [`normalize_alias`].
pub const SEPARATORS: [char; 3] = ['/', '\\', '.'];

/// Replace every `/`, `\` and `.` in `alias` with `_`.
pub fn normalize_alias(alias: &str) -> String {
    alias.replace(&SEPARATORS[..], "_")
}

/// Render `key` as a double-quoted string literal.
pub fn quote_key(key: &str) -> String {
    // JSON string escaping is a subset of what TypeScript accepts.
    serde_json::to_string(key).unwrap_or_else(|_| format!("\"{}\"", key))
}

/// Check whether `name` can be used as a bare property name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Render a property name, quoting it only when it is not an identifier.
pub fn property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote_key(name)
    }
}
