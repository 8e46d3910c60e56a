//! UTF-8-safe string truncation

/// Truncate a string to at most `max_chars` characters (not bytes).
///
/// Never panics on multi-byte characters; returns the whole string when it is
/// already short enough.
///
/// ```
/// # use serpsheet::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("été", 2), "ét");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}
