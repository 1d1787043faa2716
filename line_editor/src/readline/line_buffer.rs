// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The text being edited and the cursor in it. Every operation moves or deletes whole
//! grapheme clusters, so the cursor is always on a cluster boundary. Mutators return
//! `true` if they changed anything, which the session uses to decide whether to
//! refresh.

use crate::{is_grapheme_boundary, next_grapheme_len, prev_grapheme_len};

/// Default content capacity in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4095;

/// A bounded line of text plus a byte cursor.
///
/// The capacity is fixed when the buffer is created. An insertion that would exceed it
/// is refused outright rather than growing the buffer or inserting part of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    /// Byte offset into `text`, always on a grapheme cluster boundary.
    cursor: usize,
    capacity: usize,
}

impl LineBuffer {
    /// `capacity` is in bytes of content.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            capacity,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str { &self.text }

    #[must_use]
    pub fn len(&self) -> usize { self.text.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn capacity(&self) -> usize { self.capacity }

    #[must_use]
    pub fn is_cursor_at_end(&self) -> bool { self.cursor == self.text.len() }

    /// Text before the cursor.
    #[must_use]
    pub fn before_cursor(&self) -> &str { &self.text[..self.cursor] }

    /// Insert `chunk` at the cursor and move the cursor past it. Refused if the result
    /// would not fit in the capacity, or if memory for it cannot be reserved.
    pub fn insert(&mut self, chunk: &str) -> bool {
        if chunk.is_empty() || self.text.len() + chunk.len() > self.capacity {
            return false;
        }
        if self.text.try_reserve(chunk.len()).is_err() {
            tracing::warn!(message = "Insert abandoned, allocation failed", len = chunk.len());
            return false;
        }
        self.text.insert_str(self.cursor, chunk);
        self.cursor += chunk.len();
        // A combining mark typed after a base char extends that cluster, and the cursor
        // stays after it. Anything that leaves the cursor inside a cluster is fixed here.
        self.snap_cursor_forward();
        true
    }

    pub fn move_left(&mut self) -> bool {
        let step = prev_grapheme_len(&self.text, self.cursor);
        self.cursor -= step;
        step > 0
    }

    pub fn move_right(&mut self) -> bool {
        let step = next_grapheme_len(&self.text, self.cursor);
        self.cursor += step;
        step > 0
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let moved = self.cursor != self.text.len();
        self.cursor = self.text.len();
        moved
    }

    /// Delete the cluster under the cursor.
    pub fn delete(&mut self) -> bool {
        let step = next_grapheme_len(&self.text, self.cursor);
        if step == 0 {
            return false;
        }
        self.text.drain(self.cursor..self.cursor + step);
        true
    }

    /// Delete the cluster before the cursor.
    pub fn backspace(&mut self) -> bool {
        let step = prev_grapheme_len(&self.text, self.cursor);
        if step == 0 {
            return false;
        }
        self.text.drain(self.cursor - step..self.cursor);
        self.cursor -= step;
        true
    }

    /// Delete spaces before the cursor, then the run of non space clusters before
    /// those.
    pub fn delete_prev_word(&mut self) -> bool {
        let end = self.cursor;
        let mut start = end;
        while start > 0 && self.text.as_bytes()[start - 1] == b' ' {
            start -= prev_grapheme_len(&self.text, start);
        }
        while start > 0 && self.text.as_bytes()[start - 1] != b' ' {
            start -= prev_grapheme_len(&self.text, start);
        }
        if start == end {
            return false;
        }
        self.text.drain(start..end);
        self.cursor = start;
        true
    }

    /// Delete from the cursor to the end of the line.
    pub fn kill_to_end(&mut self) -> bool {
        let changed = !self.is_cursor_at_end();
        self.text.truncate(self.cursor);
        changed
    }

    /// Delete the whole line.
    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        self.cursor = 0;
        changed
    }

    /// Swap the cluster before the cursor with the one under it, and move the cursor
    /// past both. Only possible when the cursor is strictly inside the line.
    pub fn transpose(&mut self) -> bool {
        let prev_len = prev_grapheme_len(&self.text, self.cursor);
        let curr_len = next_grapheme_len(&self.text, self.cursor);
        if prev_len == 0 || curr_len == 0 {
            return false;
        }
        let start = self.cursor - prev_len;
        let end = self.cursor + curr_len;
        let swapped = format!(
            "{}{}",
            &self.text[self.cursor..end],
            &self.text[start..self.cursor]
        );
        self.text.replace_range(start..end, &swapped);
        self.cursor = end;
        // The swap can create a new cluster (eg a base char landing before a combining
        // mark), so re-align.
        self.snap_cursor_forward();
        true
    }

    /// Replace the whole line, eg with a history entry or a completion candidate. Text
    /// beyond the capacity is cut at the last cluster boundary that fits. The cursor
    /// moves to the end.
    pub fn set_text(&mut self, text: &str) {
        let mut end = text.len().min(self.capacity);
        while end > 0 && !is_grapheme_boundary(text, end) {
            end -= 1;
        }
        self.text.clear();
        self.text.push_str(&text[..end]);
        self.cursor = self.text.len();
    }

    /// Take the text out, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn snap_cursor_forward(&mut self) {
        while self.cursor < self.text.len() && !is_grapheme_boundary(&self.text, self.cursor)
        {
            self.cursor += self.text[self.cursor..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self { Self::new(DEFAULT_BUFFER_CAPACITY) }
}

impl std::fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
