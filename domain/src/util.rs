//! Shared utility functions.

/// Characters-per-token approximation used when sizing evidence text.
pub const DEFAULT_CHARS_PER_TOKEN: f64 = 3.5;

/// Keep at most `limit × ratio` characters from the **end** of `text`.
///
/// Long documentation front-loads banners (NAME, SYNOPSIS) and back-loads
/// examples, so the suffix is the part worth keeping. Counting is done in
/// `char`s, so a multi-byte character is never split. Text that already
/// fits is returned unchanged.
pub fn truncate_tail(text: &str, limit: usize, ratio: f64) -> &str {
    let max_chars = (limit as f64 * ratio).max(0.0).floor() as usize;
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    let skip = total - max_chars;
    match text.char_indices().nth(skip) {
        Some((start, _)) => &text[start..],
        None => "",
    }
}

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_suffix() {
        // 2 tokens * 2.0 chars = 4 chars
        assert_eq!(truncate_tail("NAME synopsis EXAMPLES", 2, 2.0), "PLES");
    }

    #[test]
    fn tail_short_text_unchanged() {
        let text = "grep - print lines that match patterns";
        assert_eq!(truncate_tail(text, 4096, DEFAULT_CHARS_PER_TOKEN), text);
    }

    #[test]
    fn tail_respects_fractional_ratio() {
        // 3 * 3.5 = 10.5 → 10 chars
        let text = "abcdefghijklmnopqrstuvwxyz";
        let out = truncate_tail(text, 3, 3.5);
        assert_eq!(out.chars().count(), 10);
        assert!(text.ends_with(out));
    }

    #[test]
    fn tail_bound_holds_for_many_lengths() {
        let text: String = (0..500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        for limit in [0usize, 1, 7, 50, 142, 143, 1000] {
            let out = truncate_tail(&text, limit, DEFAULT_CHARS_PER_TOKEN);
            let bound = (limit as f64 * DEFAULT_CHARS_PER_TOKEN).floor() as usize;
            assert!(out.chars().count() <= bound);
            assert!(text.ends_with(out));
        }
    }

    #[test]
    fn tail_never_splits_multibyte() {
        let text = "あのね、ねこ";
        let out = truncate_tail(text, 1, 2.0);
        assert_eq!(out, "ねこ");
    }

    #[test]
    fn tail_zero_limit_is_empty() {
        assert_eq!(truncate_tail("anything", 0, 3.5), "");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        let s = "あのね"; // 9 bytes: 3+3+3
        assert_eq!(truncate_str(s, 4), "あ");
        assert_eq!(truncate_str(s, 6), "あの");
    }
}
