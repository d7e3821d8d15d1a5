//! String utilities for the domain layer.

/// Normalise a free-text item for comparison (trimmed, lowercased).
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive substring test.
///
/// `needle` is expected to be lowercase already (keyword tables are).
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// De-duplicate strings case-insensitively (after trimming), keeping the
/// first spelling seen and the original order. Blank items are dropped.
pub fn dedup_ci<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let key = normalize(item);
        if key.is_empty() {
            continue;
        }
        if seen.insert(key) {
            out.push(item.trim().to_string());
        }
    }
    out
}

/// Cut a window around `[start, end)` of `s`, extending up to `before` bytes
/// to the left and `after` bytes to the right, snapped to UTF-8 boundaries.
pub fn window(s: &str, start: usize, end: usize, before: usize, after: usize) -> &str {
    let mut lo = start.saturating_sub(before);
    while lo > 0 && !s.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = end.saturating_add(after).min(s.len());
    while hi < s.len() && !s.is_char_boundary(hi) {
        hi += 1;
    }
    s[lo..hi].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_ci_keeps_first_spelling() {
        let items = vec![
            "Latency ".to_string(),
            "latency".to_string(),
            "  ".to_string(),
            "Cost".to_string(),
        ];
        assert_eq!(dedup_ci(&items), vec!["Latency", "Cost"]);
    }

    #[test]
    fn test_window_clamps_to_bounds() {
        let text = "we need this now";
        let start = text.find("this").unwrap();
        assert_eq!(window(text, start, start + 4, 30, 50), "we need this now");
        assert_eq!(window(text, start, start + 4, 3, 0), "ed this");
    }

    #[test]
    fn test_window_multibyte() {
        // 'é' is 2 bytes; cutting inside it must snap outward
        let text = "café urgent";
        let start = text.find("urgent").unwrap();
        let w = window(text, start, start + 6, 2, 0);
        assert!(w.ends_with("urgent"));
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Senior Product Manager", "product"));
        assert!(!contains_ci("Engineer", "product"));
    }
}
