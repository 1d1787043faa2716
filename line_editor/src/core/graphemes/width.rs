// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! How many terminal columns a codepoint, a grapheme cluster, or a string occupies.

use super::boundaries::GraphemeIter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Zero width joiner. Glues the clusters on either side into one.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Zero width space.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Variation selectors, including text (VS15) and emoji (VS16) presentation.
pub const VARIATION_SELECTORS: std::ops::RangeInclusive<char> = '\u{FE00}'..='\u{FE0F}';

/// Fitzpatrick skin tone modifiers.
pub const SKIN_TONE_MODIFIERS: std::ops::RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

/// Tag characters used by subdivision flags, eg 🏴󠁧󠁢󠁳󠁣󠁴󠁿.
pub const TAG_CHARACTERS: std::ops::RangeInclusive<char> = '\u{E0020}'..='\u{E007F}';

/// Codepoints that never advance the cursor on their own, in addition to everything
/// [`unicode_width`] reports as zero width (combining marks and friends).
#[must_use]
pub fn is_zero_width(ch: char) -> bool {
    ch == ZERO_WIDTH_JOINER
        || ch == ZERO_WIDTH_SPACE
        || VARIATION_SELECTORS.contains(&ch)
        || SKIN_TONE_MODIFIERS.contains(&ch)
        || TAG_CHARACTERS.contains(&ch)
        || (!ch.is_control() && UnicodeWidthChar::width(ch) == Some(0))
}

/// Width of a single codepoint: 0, 1 or 2. Control characters report 0.
#[must_use]
pub fn codepoint_width(ch: char) -> usize {
    if is_zero_width(ch) {
        return 0;
    }
    UnicodeWidthChar::width(ch).unwrap_or(0).min(2)
}

/// Width of one grapheme cluster. Emoji presentation sequences, ZWJ sequences and flags
/// are resolved by [`UnicodeWidthStr`]. A cluster never takes more than 2 columns.
#[must_use]
pub fn grapheme_width(cluster: &str) -> usize {
    if cluster.is_ascii() {
        return cluster.bytes().filter(|byte| !byte.is_ascii_control()).count().min(2);
    }
    UnicodeWidthStr::width(cluster).min(2)
}

/// Display width of a string, summed cluster by cluster.
#[must_use]
pub fn str_width(text: &str) -> usize {
    // ASCII fast path.
    if text.is_ascii() {
        return text.bytes().filter(|byte| !byte.is_ascii_control()).count();
    }
    GraphemeIter::new(text).map(grapheme_width).sum()
}

/// Number of grapheme clusters in a string. This is the display width of a string in
/// mask mode, where each cluster is shown as one `*`.
#[must_use]
pub fn grapheme_count(text: &str) -> usize {
    if text.is_ascii() {
        return text.len();
    }
    GraphemeIter::new(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case('a', 1)]
    #[test_case('é', 1)]
    #[test_case('中', 2)]
    #[test_case('😀', 2)]
    #[test_case('\u{FF21}', 2; "fullwidth latin A")]
    #[test_case('\u{0301}', 0; "combining acute accent")]
    #[test_case(ZERO_WIDTH_JOINER, 0)]
    #[test_case('\u{FE0F}', 0; "variation selector 16")]
    #[test_case('\u{1F3FD}', 0; "skin tone modifier")]
    #[test_case('\t', 0; "control")]
    fn test_codepoint_width(ch: char, expected: usize) {
        assert_eq!(codepoint_width(ch), expected);
    }

    #[test]
    fn test_grapheme_width() {
        assert_eq!(grapheme_width("a"), 1);
        assert_eq!(grapheme_width("e\u{0301}"), 1);
        assert_eq!(grapheme_width("🙏🏽"), 2);
        assert_eq!(grapheme_width("👨‍👩‍👧"), 2);
        assert_eq!(grapheme_width("🇺🇸"), 2);
    }

    #[test]
    fn test_str_width() {
        assert_eq!(str_width(""), 0);
        assert_eq!(str_width("hello> "), 7);
        assert_eq!(str_width("a中b"), 4);
        assert_eq!(str_width("hi 👨‍👩‍👧!"), 6);
    }

    #[test]
    fn test_grapheme_count() {
        assert_eq!(grapheme_count("abc"), 3);
        assert_eq!(grapheme_count("a🙏🏽中"), 3);
    }
}
