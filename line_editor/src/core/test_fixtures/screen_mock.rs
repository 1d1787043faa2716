// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A minimal terminal screen for tests. It understands exactly the subset of VT100 that
//! the line editor emits: printable text (with wide and zero width characters), `\r`,
//! `\n`, cursor movement (CUU, CUD, CUF, CUB, CUP), and erase (EL, ED). Rows are
//! unbounded downwards and never scroll, which makes it easy to assert that a redraw
//! left no stale content behind on any row.
//!
//! Like a real terminal, writing into the last column leaves the cursor there with a
//! pending wrap; the wrap happens when the next printable character arrives. Zero width
//! codepoints, and anything following a zero width joiner, join the cell to their left.

use crate::{CUB_CURSOR_BACKWARD, CUD_CURSOR_DOWN, CUF_CURSOR_FORWARD, CUP_CURSOR_POSITION,
            CUU_CURSOR_UP, ED_ERASE_DISPLAY, EL_ERASE_LINE, ERASE_ALL, ERASE_TO_END,
            ERASE_TO_START, ZERO_WIDTH_JOINER, codepoint_width};
use vte::{Params, Parser, Perform};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Empty,
    Text(String),
    /// Right half of a double width character.
    WideTail,
}

#[derive(Debug)]
struct ScreenState {
    columns: usize,
    rows: Vec<Vec<Cell>>,
    cursor_row: usize,
    cursor_col: usize,
    wrap_pending: bool,
    after_joiner: bool,
}

/// See the [module docs](self).
#[allow(missing_debug_implementations)]
pub struct ScreenMock {
    state: ScreenState,
    parser: Parser,
}

impl ScreenMock {
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            state: ScreenState {
                columns: columns.max(1),
                rows: vec![vec![Cell::Empty; columns.max(1)]],
                cursor_row: 0,
                cursor_col: 0,
                wrap_pending: false,
                after_joiner: false,
            },
            parser: Parser::new(),
        }
    }

    /// Feed bytes written by the editor.
    pub fn apply(&mut self, bytes: &[u8]) { self.parser.advance(&mut self.state, bytes); }

    /// The visible text of every row that has ever been touched, with trailing blanks
    /// removed.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.state.rows.len()).map(|row| self.line(row)).collect()
    }

    /// The visible text of one row, with trailing blanks removed.
    #[must_use]
    pub fn line(&self, row: usize) -> String {
        let Some(cells) = self.state.rows.get(row) else {
            return String::new();
        };
        let mut acc = String::new();
        for cell in cells {
            match cell {
                Cell::Empty => acc.push(' '),
                Cell::Text(text) => acc.push_str(text),
                Cell::WideTail => {}
            }
        }
        acc.trim_end().to_string()
    }

    /// Rows that contain any visible text.
    #[must_use]
    pub fn non_empty_lines(&self) -> Vec<String> {
        self.lines().into_iter().filter(|it| !it.is_empty()).collect()
    }

    /// `(row, col)` of the cursor, both 0-based.
    #[must_use]
    pub fn cursor(&self) -> (usize, usize) { (self.state.cursor_row, self.state.cursor_col) }
}

impl ScreenState {
    fn ensure_row(&mut self, row: usize) {
        while self.rows.len() <= row {
            self.rows.push(vec![Cell::Empty; self.columns]);
        }
    }

    fn move_to(&mut self, row: usize, col: usize) {
        self.cursor_row = row;
        self.cursor_col = col.min(self.columns - 1);
        self.wrap_pending = false;
        self.after_joiner = false;
        self.ensure_row(self.cursor_row);
    }

    fn erase(&mut self, row: usize, cols: std::ops::Range<usize>) {
        self.ensure_row(row);
        for col in cols {
            if let Some(cell) = self.rows[row].get_mut(col) {
                *cell = Cell::Empty;
            }
        }
    }
}

impl Perform for ScreenState {
    fn print(&mut self, c: char) {
        let width = codepoint_width(c);
        let attach = width == 0 || self.after_joiner;
        self.after_joiner = c == ZERO_WIDTH_JOINER;

        if attach {
            // Attach to the cell to the left of the cursor.
            let col = if self.wrap_pending {
                self.cursor_col
            } else {
                self.cursor_col.saturating_sub(1)
            };
            let row = self.cursor_row;
            let target = (0..=col)
                .rev()
                .find(|&it| matches!(self.rows[row][it], Cell::Text(_)));
            if let Some(it) = target {
                if let Cell::Text(text) = &mut self.rows[row][it] {
                    text.push(c);
                }
            }
            return;
        }

        if self.wrap_pending || self.cursor_col + width > self.columns {
            self.move_to(self.cursor_row + 1, 0);
        }

        let (row, col) = (self.cursor_row, self.cursor_col);
        self.rows[row][col] = Cell::Text(c.to_string());
        if width == 2 && col + 1 < self.columns {
            self.rows[row][col + 1] = Cell::WideTail;
        }

        if col + width >= self.columns {
            self.cursor_col = self.columns - 1;
            self.wrap_pending = true;
        } else {
            self.cursor_col = col + width;
        }
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\r' => self.move_to(self.cursor_row, 0),
            b'\n' => self.move_to(self.cursor_row + 1, self.cursor_col),
            0x08 => self.move_to(self.cursor_row, self.cursor_col.saturating_sub(1)),
            _ => {}
        }
    }

    fn csi_dispatch(
        &mut self,
        params: &Params,
        _intermediates: &[u8],
        _ignore: bool,
        action: char,
    ) {
        let mut iter = params.iter().map(|param| usize::from(param[0]));
        let first = iter.next().unwrap_or(0);
        let second = iter.next().unwrap_or(0);
        let count = first.max(1);
        let (row, col) = (self.cursor_row, self.cursor_col);

        match action {
            CUU_CURSOR_UP => self.move_to(row.saturating_sub(count), col),
            CUD_CURSOR_DOWN => self.move_to(row + count, col),
            CUF_CURSOR_FORWARD => self.move_to(row, col + count),
            CUB_CURSOR_BACKWARD => self.move_to(row, col.saturating_sub(count)),
            CUP_CURSOR_POSITION => {
                self.move_to(first.saturating_sub(1), second.saturating_sub(1));
            }
            EL_ERASE_LINE => match u16::try_from(first).unwrap_or(u16::MAX) {
                ERASE_TO_END => self.erase(row, col..self.columns),
                ERASE_TO_START => self.erase(row, 0..col + 1),
                ERASE_ALL => self.erase(row, 0..self.columns),
                _ => {}
            },
            ED_ERASE_DISPLAY => {
                if u16::try_from(first).ok() == Some(ERASE_ALL) {
                    for it in 0..self.rows.len() {
                        self.erase(it, 0..self.columns);
                    }
                }
            }
            _ => {}
        }
    }
}
