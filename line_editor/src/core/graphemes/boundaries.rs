// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Grapheme cluster boundaries. Extended grapheme clusters from
//! [`unicode_segmentation`] are the starting point. On top of that, any run of zero
//! width codepoints, and anything that follows a zero width joiner, is folded into the
//! preceding cluster. This way one cursor step or one backspace always consumes an
//! entire visual unit, even for joiner sequences that UAX #29 would split.

use super::width::{ZERO_WIDTH_JOINER, is_zero_width};
use unicode_segmentation::GraphemeCursor;

/// Returns true if `offset` is a cluster boundary in `text`. The start and end of the
/// text are always boundaries. Offsets that aren't on a char boundary never are.
#[must_use]
pub fn is_grapheme_boundary(text: &str, offset: usize) -> bool {
    if offset == 0 || offset == text.len() {
        return true;
    }
    if !text.is_char_boundary(offset) {
        return false;
    }
    !is_folded(text, offset) && is_uax29_boundary(text, offset)
}

/// Number of bytes in the cluster that starts at `pos`. Returns 0 at (or past) the end
/// of the text.
#[must_use]
pub fn next_grapheme_len(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return 0;
    }
    let mut end = next_uax29_boundary(text, pos);
    while end < text.len() && is_folded(text, end) {
        end = next_uax29_boundary(text, end);
    }
    end - pos
}

/// Number of bytes in the cluster that ends at `pos`. Returns 0 at the start of the
/// text.
#[must_use]
pub fn prev_grapheme_len(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    if pos == 0 {
        return 0;
    }
    let mut start = prev_uax29_boundary(text, pos);
    while start > 0 && is_folded(text, start) {
        start = prev_uax29_boundary(text, start);
    }
    pos - start
}

/// Iterates over the clusters of a string, using the same boundaries as
/// [`next_grapheme_len`].
#[derive(Debug, Clone)]
pub struct GraphemeIter<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> GraphemeIter<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self { Self { text, pos: 0 } }
}

impl<'a> Iterator for GraphemeIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let len = next_grapheme_len(self.text, self.pos);
        if len == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += len;
        self.text.get(start..self.pos)
    }
}

/// A UAX #29 boundary at `offset` is suppressed when the codepoint after it is zero
/// width, or the codepoint before it is a zero width joiner.
fn is_folded(text: &str, offset: usize) -> bool {
    let (before, after) = text.split_at(offset);
    let next_is_zero_width = after
        .chars()
        .next()
        .is_some_and(|ch| !ch.is_control() && is_zero_width(ch));
    let prev_is_joiner = before.chars().next_back() == Some(ZERO_WIDTH_JOINER);
    next_is_zero_width || prev_is_joiner
}

fn is_uax29_boundary(text: &str, offset: usize) -> bool {
    GraphemeCursor::new(offset, text.len(), true)
        .is_boundary(text, 0)
        .unwrap_or(true)
}

fn next_uax29_boundary(text: &str, pos: usize) -> usize {
    match GraphemeCursor::new(pos, text.len(), true).next_boundary(text, 0) {
        Ok(Some(end)) => end,
        // Fall back to a single codepoint step.
        _ => pos + text[pos..].chars().next().map_or(1, char::len_utf8),
    }
}

fn prev_uax29_boundary(text: &str, pos: usize) -> usize {
    match GraphemeCursor::new(pos, text.len(), true).prev_boundary(text, 0) {
        Ok(Some(start)) => start,
        _ => pos - text[..pos].chars().next_back().map_or(1, char::len_utf8),
    }
}
