// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Line refresh. Each refresh builds the complete escape sequence for the new state in
//! one [`String`], which the caller writes with a single call so the terminal never
//! shows a half drawn line.
//!
//! - **Single line**: the line scrolls horizontally. Clusters are trimmed from the left
//!   until the cursor fits, then from the right until the whole thing fits.
//! - **Multi line**: the line wraps over as many rows as it needs. [`RenderState`]
//!   remembers how many rows the last refresh used and which one the cursor was on, so
//!   the next refresh can erase exactly those rows before writing.

use crate::{CsiSequence, ERASE_TO_END, GraphemeIter, Hinter, LineBuffer, grapheme_count,
            grapheme_width, next_grapheme_len, prev_grapheme_len, str_width};
use std::fmt::Write as _;

/// Glyph drawn for each cluster in mask mode.
pub const MASK_GLYPH: char = '*';

/// Which half of a refresh to perform. [`RefreshMode::Clean`] and
/// [`RefreshMode::Write`] on their own are how output gets printed above the line
/// being edited without a full redraw in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum RefreshMode {
    /// Erase the line from the screen.
    Clean,
    /// Draw the line, assuming the area is already clear.
    Write,
    /// Erase then draw.
    All,
}

impl RefreshMode {
    #[must_use]
    pub fn cleans(self) -> bool { matches!(self, RefreshMode::Clean | RefreshMode::All) }

    #[must_use]
    pub fn writes(self) -> bool { matches!(self, RefreshMode::Write | RefreshMode::All) }
}

/// What the previous multi line refresh left on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    /// Rows used by the last refresh.
    pub old_rows: usize,
    /// 1-based row of the cursor within those rows.
    pub old_rpos: usize,
    /// Byte cursor at the last refresh.
    pub old_pos: usize,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            old_rows: 0,
            old_rpos: 1,
            old_pos: 0,
        }
    }
}

/// Everything a refresh needs to know about the line.
#[derive(Clone, Copy)]
pub struct LineView<'a> {
    pub prompt: &'a str,
    pub buffer: &'a LineBuffer,
    pub columns: usize,
    pub multiline: bool,
    pub mask_mode: bool,
    pub hinter: Option<&'a dyn Hinter>,
}

impl std::fmt::Debug for LineView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineView")
            .field("prompt", &self.prompt)
            .field("buffer", &self.buffer)
            .field("columns", &self.columns)
            .field("multiline", &self.multiline)
            .field("mask_mode", &self.mask_mode)
            .field("hinter", &self.hinter.is_some())
            .finish()
    }
}

/// Display width of a prompt. Color escapes in the prompt take up no columns.
#[must_use]
pub fn prompt_width(prompt: &str) -> usize {
    if prompt.contains('\x1b') {
        str_width(&strip_ansi_escapes::strip_str(prompt))
    } else {
        str_width(prompt)
    }
}

/// Display width of line content. In mask mode every cluster is one column, matching
/// the single [`MASK_GLYPH`] drawn for it.
#[must_use]
pub fn content_width(text: &str, mask_mode: bool) -> usize {
    if mask_mode { grapheme_count(text) } else { str_width(text) }
}

fn push_content(out: &mut String, text: &str, mask_mode: bool) {
    if mask_mode {
        out.extend(std::iter::repeat_n(MASK_GLYPH, grapheme_count(text)));
    } else {
        out.push_str(text);
    }
}

impl LineView<'_> {
    /// Build the escape sequence that takes the screen from the last refresh to the
    /// current state.
    #[must_use]
    pub fn render(&self, state: &mut RenderState, mode: RefreshMode) -> String {
        if self.multiline {
            self.render_multi_line(state, mode)
        } else {
            self.render_single_line(mode)
        }
    }

    fn columns(&self) -> usize { self.columns.max(1) }

    fn render_single_line(&self, mode: RefreshMode) -> String {
        let cols = self.columns();
        let pwidth = prompt_width(self.prompt);
        let text = self.buffer.as_str();

        let mut start = 0;
        let mut end = text.len();
        let pos = self.buffer.cursor();
        let mut poscol = content_width(&text[..pos], self.mask_mode);
        let mut lencol = content_width(text, self.mask_mode);

        // Scroll left until the cursor fits.
        while pwidth + poscol >= cols && start < pos {
            let step = next_grapheme_len(text, start);
            let width = self.cluster_width(&text[start..start + step]);
            start += step;
            poscol -= width;
            lencol -= width;
        }
        // Then drop whatever still overflows on the right.
        while pwidth + lencol > cols && end > pos {
            let step = prev_grapheme_len(text, end);
            lencol -= self.cluster_width(&text[end - step..end]);
            end -= step;
        }

        let mut out = String::from("\r");
        let mut written = 0;
        if mode.writes() {
            out.push_str(self.prompt);
            push_content(&mut out, &text[start..end], self.mask_mode);
            written = pwidth + lencol + self.push_hint(&mut out, pwidth);
        }
        // A line that fills every column leaves the cursor in the pending wrap state,
        // where erasing would take out the last cell.
        if written < cols {
            write!(out, "{}", CsiSequence::EraseLine(ERASE_TO_END)).ok();
        }
        if mode.writes() {
            out.push('\r');
            let col = poscol + pwidth;
            if col > 0 {
                write!(out, "{}", CsiSequence::CursorForward(col)).ok();
            }
        }
        out
    }

    fn render_multi_line(&self, state: &mut RenderState, mode: RefreshMode) -> String {
        let cols = self.columns();
        let pwidth = prompt_width(self.prompt);
        let bufwidth = content_width(self.buffer.as_str(), self.mask_mode);
        let poswidth = content_width(self.buffer.before_cursor(), self.mask_mode);
        // Widths are summed as if the row were one long strip. A wide cluster pushed
        // to the next row by the terminal is not accounted for.
        let mut rows = (pwidth + bufwidth).div_ceil(cols);
        let rpos = state.old_rpos;
        let old_rows = state.old_rows;
        state.old_rows = rows;

        let mut out = String::new();

        if mode.cleans() {
            // Go to the last row used, then clear each row on the way back up.
            if old_rows > rpos {
                write!(out, "{}", CsiSequence::CursorDown(old_rows - rpos)).ok();
            }
            for _ in 1..old_rows {
                write!(
                    out,
                    "\r{}{}",
                    CsiSequence::EraseLine(ERASE_TO_END),
                    CsiSequence::CursorUp(1)
                ).ok();
            }
        }

        write!(out, "\r{}", CsiSequence::EraseLine(ERASE_TO_END)).ok();

        if mode.writes() {
            out.push_str(self.prompt);
            push_content(&mut out, self.buffer.as_str(), self.mask_mode);
            self.push_hint(&mut out, pwidth);

            // With the cursor exactly at the end of a full row, the terminal is in its
            // pending wrap state. Force the wrap so the cursor is where we think it is.
            let cursor = self.buffer.cursor();
            if cursor > 0
                && self.buffer.is_cursor_at_end()
                && (poswidth + pwidth).is_multiple_of(cols)
            {
                out.push_str("\n\r");
                rows += 1;
                state.old_rows = state.old_rows.max(rows);
            }

            let rpos2 = (pwidth + poswidth + cols) / cols;
            if rows > rpos2 {
                write!(out, "{}", CsiSequence::CursorUp(rows - rpos2)).ok();
            }

            out.push('\r');
            let col = (pwidth + poswidth) % cols;
            if col > 0 {
                write!(out, "{}", CsiSequence::CursorForward(col)).ok();
            }
            state.old_rpos = rpos2;
        }

        state.old_pos = self.buffer.cursor();
        out
    }

    fn cluster_width(&self, cluster: &str) -> usize {
        if self.mask_mode { 1 } else { grapheme_width(cluster) }
    }

    /// Append the hint, if there is one and there is room for any of it after the
    /// content. The hint is cut at a cluster boundary to fit. Returns the columns it
    /// takes up.
    fn push_hint(&self, out: &mut String, pwidth: usize) -> usize {
        let Some(hinter) = self.hinter else {
            return 0;
        };
        let used = pwidth + content_width(self.buffer.as_str(), self.mask_mode);
        let cols = self.columns();
        if used >= cols {
            return 0;
        }
        let Some(hint) = hinter.hint(self.buffer.as_str()) else {
            return 0;
        };

        let available = cols - used;
        let mut width = 0;
        let mut len = 0;
        for cluster in GraphemeIter::new(&hint.text) {
            let cluster_width = grapheme_width(cluster);
            if width + cluster_width > available {
                break;
            }
            width += cluster_width;
            len += cluster.len();
        }

        match hint.style_sequences() {
            Some((start, end)) => {
                out.push_str(&start);
                out.push_str(&hint.text[..len]);
                out.push_str(&end);
            }
            None => out.push_str(&hint.text[..len]),
        }
        hinter.release_hint(hint);
        width
    }
}
