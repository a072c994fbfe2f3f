//! Log sanitization helpers.
//!
//! Response bodies can be large and API tokens must never appear in logs,
//! so both go through here before reaching the `log` macros.

/// Maximum number of bytes of a body written to the log.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading token characters left visible by [`mask_token`].
const TOKEN_VISIBLE_PREFIX: usize = 4;

/// Largest char boundary `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Truncates `s` to [`TRUNCATE_LIMIT`] bytes on a char boundary, noting the
/// original size.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    format!(
        "{}... [truncated, total {} bytes]",
        &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
        s.len()
    )
}

/// Lossy UTF-8 view of a raw response body, truncated for logging.
pub fn body_for_log(body: &[u8]) -> String {
    truncate_for_log(&String::from_utf8_lossy(body))
}

/// Masks an API token, keeping only a short prefix.
pub fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return "<empty>".to_string();
    }
    let visible = floor_char_boundary(token, TOKEN_VISIBLE_PREFIX.min(token.len() / 2));
    format!("{}****", &token[..visible])
}
