//! Character-level matching and snippet construction.
//!
//! Text is case-folded one char at a time so folded and original text have
//! identical char indices; windows are measured in chars, never bytes.

/// Lower-case `s` char by char, keeping a one-to-one index mapping.
pub fn fold(s: &str) -> Vec<char> {
    s.chars().map(fold_char).collect()
}

/// [`fold`] over text already split into chars.
pub fn fold_chars(text: &[char]) -> Vec<char> {
    text.iter().copied().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// First index at or after `start` where `needle` occurs in `hay`.
pub fn find_from(hay: &[char], needle: &[char], start: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > hay.len() {
        return None;
    }
    (start..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()] == *needle)
}

/// Non-overlapping occurrences of `needle`, scanning left to right.
pub fn count_matches(hay: &[char], needle: &[char]) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while let Some(i) = find_from(hay, needle, pos) {
        count += 1;
        pos = i + needle.len();
    }
    count
}

/// Excerpt of `text` around a match at `at` spanning `len` chars.
///
/// Takes up to `window` chars on each side, collapses whitespace runs to a
/// single space, and marks clipped ends with "...".
pub fn snippet(text: &[char], at: usize, len: usize, window: usize) -> String {
    let start = at.saturating_sub(window);
    let end = at.saturating_add(len).saturating_add(window).min(text.len());

    let raw: String = text[start..end].iter().collect();
    let mut out = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if start > 0 {
        out.insert_str(0, "...");
    }
    if end < text.len() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_keeps_length() {
        let text = "Straße ÅNGSTRÖM İstanbul";
        assert_eq!(fold(text).len(), text.chars().count());
        assert_eq!(fold("TanStack").iter().collect::<String>(), "tanstack");
    }

    #[test]
    fn find_and_count() {
        let hay = fold("Virtualization and virtualization");
        let needle = fold("virtualization");
        assert_eq!(find_from(&hay, &needle, 0), Some(0));
        assert_eq!(find_from(&hay, &needle, 1), Some(19));
        assert_eq!(count_matches(&hay, &needle), 2);
    }

    #[test]
    fn count_is_non_overlapping() {
        assert_eq!(count_matches(&fold("aaaa"), &fold("aa")), 2);
        assert_eq!(count_matches(&fold("aaa"), &fold("aa")), 1);
    }

    #[test]
    fn needle_longer_than_hay() {
        assert_eq!(find_from(&fold("ab"), &fold("abc"), 0), None);
        assert_eq!(count_matches(&fold(""), &fold("ab")), 0);
    }

    #[test]
    fn snippet_short_text_has_no_ellipsis() {
        let text: Vec<char> = "  row\n\nselection   logic ".chars().collect();
        assert_eq!(snippet(&text, 5, 3, 100), "row selection logic");
    }

    #[test]
    fn snippet_clips_both_ends() {
        let body = format!("{}needle{}", "x".repeat(50), "y".repeat(50));
        let text: Vec<char> = body.chars().collect();
        let s = snippet(&text, 50, 6, 10);
        assert_eq!(s, format!("...{}needle{}...", "x".repeat(10), "y".repeat(10)));
    }

    #[test]
    fn snippet_window_counts_chars() {
        let body = format!("{}match{}", "é".repeat(20), "ü".repeat(20));
        let text: Vec<char> = body.chars().collect();
        let s = snippet(&text, 20, 5, 3);
        assert_eq!(s, "...ééématchüüü...");
    }

    #[test]
    fn snippet_huge_window_takes_whole_text() {
        let text: Vec<char> = "abc needle def".chars().collect();
        assert_eq!(snippet(&text, 4, 6, usize::MAX), "abc needle def");
    }
}
