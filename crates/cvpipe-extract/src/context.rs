//! Anchor-keyword context window
//!
//! The local backend gets a short window starting at the first
//! case-insensitive occurrence of "education" (prompt budget is tight
//! on a local model); when the anchor is absent, a fixed-size prefix of
//! the document is used instead of failing. The hosted backend gets a
//! much larger plain prefix and finds the section itself.

use crate::backend::BackendKind;

/// Anchor keyword marking the education section
const ANCHOR: &str = "education";

/// ~60 words at ~6 chars per word
const WINDOW_CHARS: usize = 360;

/// Fallback prefix when the anchor is absent: three windows' worth
const LOCAL_FALLBACK_CHARS: usize = WINDOW_CHARS * 3;

/// Hosted models take a generous prefix and locate the section themselves
const HOSTED_PREFIX_CHARS: usize = WINDOW_CHARS * 20;

/// Narrow `text` to the context window sent to the backend.
pub fn context_window(text: &str, backend: BackendKind) -> &str {
    match backend {
        BackendKind::Hosted => char_prefix(text, HOSTED_PREFIX_CHARS),
        BackendKind::Local => match find_anchor(text) {
            Some(start) => char_prefix(&text[start..], ANCHOR.len() + WINDOW_CHARS),
            None => {
                log::debug!("no {ANCHOR:?} anchor found, using document prefix");
                char_prefix(text, LOCAL_FALLBACK_CHARS)
            }
        },
    }
}

/// Byte offset of the first ASCII-case-insensitive occurrence of the
/// anchor keyword.
fn find_anchor(text: &str) -> Option<usize> {
    let needle = ANCHOR.as_bytes();
    let haystack = text.as_bytes();
    (0..haystack.len().checked_sub(needle.len())? + 1)
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Prefix of at most `n` chars, never splitting a char boundary.
fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_at_anchor() {
        let text = format!("{}EDUCATION\nPh.D. Example University", "x".repeat(500));
        let window = context_window(&text, BackendKind::Local);
        assert!(window.starts_with("EDUCATION"));
        assert!(window.contains("Example University"));
    }

    #[test]
    fn anchor_match_is_case_insensitive() {
        assert_eq!(find_anchor("A\nEduCaTion\nB"), Some(2));
        assert_eq!(find_anchor("no anchor here"), None);
    }

    #[test]
    fn window_is_bounded() {
        let text = format!("education{}", "y".repeat(5000));
        let window = context_window(&text, BackendKind::Local);
        assert_eq!(window.chars().count(), ANCHOR.len() + WINDOW_CHARS);
    }

    #[test]
    fn missing_anchor_falls_back_to_prefix() {
        let text = "z".repeat(5000);
        let window = context_window(&text, BackendKind::Local);
        assert_eq!(window.len(), LOCAL_FALLBACK_CHARS);
    }

    #[test]
    fn short_document_returned_whole() {
        let text = "short CV with no anchor";
        assert_eq!(context_window(text, BackendKind::Local), text);
        assert_eq!(context_window(text, BackendKind::Hosted), text);
    }

    #[test]
    fn hosted_prefix_is_larger() {
        let text = "w".repeat(20_000);
        let hosted = context_window(&text, BackendKind::Hosted);
        assert_eq!(hosted.len(), HOSTED_PREFIX_CHARS);
    }

    #[test]
    fn multibyte_text_never_split_mid_char() {
        let text = "é".repeat(4000);
        let window = context_window(&text, BackendKind::Local);
        assert_eq!(window.chars().count(), LOCAL_FALLBACK_CHARS);
        // Would panic on a bad boundary; also verify it round-trips
        assert!(text.starts_with(window));
    }
}
