// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One edit, from prompt to committed line.
//!
//! ```text
//! Context::start_session ──► Session ──feed()──► More ─┐
//!                              ▲                       │
//!                              └───────────────────────┘
//!                                      │
//!                                      └──► Done(Line | Eof | Interrupted) ──► stop()
//! ```
//!
//! [`Session::feed`] consumes one key (a byte, an escape sequence, or a UTF-8
//! codepoint) per call. With a non blocking input device it returns
//! [`FeedResult::More`] as soon as nothing more is available, which is what lets an
//! external event loop drive the editor.

use crate::{BELL, CompletionState, Completions, Context, FeedResult, Hinter,
            HistoryDirection, Key, KeyDecoder, KeyOutcome, LineBuffer, LineView,
            RawModeGuard, ReadOutcome, ReadlineError, ReadlineEvent, RefreshMode,
            RenderState, SendInputDevice, SendRawTerminal, clear_screen, content_width,
            get_columns, prev_grapheme_len, prompt_width, write_best_effort};
use std::fmt::Debug;

/// An in progress edit. Borrows the [`Context`] it was started from, so a context can
/// only drive one session at a time.
///
/// Dropping a session without calling [`Session::stop`] still restores the terminal and
/// removes the live history slot.
pub struct Session<'ctx> {
    ctx: &'ctx mut Context,
    input: Box<SendInputDevice>,
    output: Box<SendRawTerminal>,
    prompt: String,
    buffer: LineBuffer,
    columns: usize,
    decoder: KeyDecoder,
    completion: CompletionState,
    completions: Completions,
    /// 0 is the live slot, larger is older.
    history_index: usize,
    render_state: RenderState,
    suppress_hints: bool,
    is_tty: bool,
    /// Bytes of a line being read from non tty input.
    plain_line: Vec<u8>,
    raw_mode: Option<RawModeGuard>,
    stopped: bool,
}

impl Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("prompt", &self.prompt)
            .field("buffer", &self.buffer)
            .field("columns", &self.columns)
            .field("completion", &self.completion)
            .field("history_index", &self.history_index)
            .field("render_state", &self.render_state)
            .field("is_tty", &self.is_tty)
            .field("raw_mode", &self.raw_mode.is_some())
            .finish_non_exhaustive()
    }
}

impl<'ctx> Session<'ctx> {
    /// Start editing: enter raw mode, measure the terminal, open the live history slot
    /// and draw the prompt. Input that is not a terminal skips all of that and is read
    /// as plain lines.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::InvalidBufferCapacity`] if the configured capacity is 0.
    /// - [`ReadlineError::RawMode`] if the terminal can't be switched to raw mode.
    pub(crate) fn start(
        ctx: &'ctx mut Context,
        input: Box<SendInputDevice>,
        output: Box<SendRawTerminal>,
        prompt: &str,
    ) -> Result<Self, ReadlineError> {
        let config = ctx.config;
        if config.buffer_capacity == 0 {
            return Err(ReadlineError::InvalidBufferCapacity);
        }

        let assume_tty = ctx.terminal_config.assume_tty;
        let is_tty = assume_tty || input.is_terminal();
        let raw_mode = if is_tty && !assume_tty {
            let guard = RawModeGuard::new().map_err(|err| ReadlineError::RawMode {
                reason: err.to_string(),
            })?;
            Some(guard)
        } else {
            None
        };

        let mut session = Self {
            ctx,
            input,
            output,
            prompt: prompt.to_owned(),
            buffer: LineBuffer::new(config.buffer_capacity),
            columns: 0,
            decoder: KeyDecoder::new(config.escape_timeout),
            completion: CompletionState::default(),
            completions: Completions::new(),
            history_index: 0,
            render_state: RenderState::default(),
            suppress_hints: false,
            is_tty,
            plain_line: Vec::new(),
            raw_mode,
            stopped: false,
        };

        if !is_tty {
            tracing::debug!(message = "Input is not a tty, reading plain lines");
            return Ok(session);
        }

        session.columns = get_columns(
            &mut *session.input,
            &mut *session.output,
            &session.ctx.terminal_config,
        );
        session.ctx.history.begin_live_slot();
        write_best_effort!(session.output, session.prompt.as_bytes());

        tracing::debug!(
            message = "Session started",
            columns = session.columns,
            multiline = config.multiline
        );
        Ok(session)
    }

    /// The line as currently edited.
    #[must_use]
    pub fn line(&self) -> &str { self.buffer.as_str() }

    /// Byte offset of the cursor in [`Session::line`].
    #[must_use]
    pub fn cursor(&self) -> usize { self.buffer.cursor() }

    #[must_use]
    pub fn columns(&self) -> usize { self.columns }

    /// Consume one key of input.
    ///
    /// Returns [`FeedResult::More`] while the edit goes on, including when the input
    /// device has nothing to read right now. Once a [`FeedResult::Done`] has been
    /// returned, call [`Session::stop`].
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::IO`] if reading input fails.
    pub fn feed(&mut self) -> Result<FeedResult, ReadlineError> {
        if !self.is_tty {
            return self.feed_plain();
        }

        let key = match self.decoder.read_key(&mut *self.input)? {
            KeyOutcome::Key(key) => key,
            KeyOutcome::NotReady => return Ok(FeedResult::More),
            KeyOutcome::Eof => {
                self.ctx.history.end_live_slot();
                return Ok(FeedResult::Done(ReadlineEvent::Eof));
            }
        };

        let key = if self.completion.is_active()
            || (key == Key::Tab && self.ctx.completer.is_some())
        {
            match self.complete_line(key) {
                Some(key) => key,
                None => return Ok(FeedResult::More),
            }
        } else {
            key
        };

        Ok(match self.handle_key(key) {
            Some(event) => {
                tracing::debug!(message = "Session done", ?event);
                FeedResult::Done(event)
            }
            None => FeedResult::More,
        })
    }

    /// Erase the line from the screen, eg before printing something else.
    pub fn hide(&mut self) {
        if self.is_tty {
            self.refresh(RefreshMode::Clean);
        }
    }

    /// Draw the line again after [`Session::hide`].
    pub fn show(&mut self) {
        if self.is_tty {
            self.refresh(RefreshMode::Write);
        }
    }

    /// Print `text` above the line being edited, then redraw the line below it.
    pub fn print_above(&mut self, text: &str) {
        self.hide();
        let mut converted = String::with_capacity(text.len() + 2);
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                converted.push_str("\r\n");
            }
            converted.push_str(line);
        }
        if !text.ends_with('\n') {
            converted.push_str("\r\n");
        }
        write_best_effort!(self.output, converted.as_bytes());
        self.show();
    }

    /// End the session: leave raw mode and move to a fresh line.
    pub fn stop(mut self) { self.finish(); }

    fn finish(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.ctx.history.end_live_slot();
        drop(self.raw_mode.take());
        if self.is_tty {
            write_best_effort!(self.output, b"\n");
        }
        tracing::debug!(message = "Session stopped");
    }

    /// Non tty input is read a line at a time with no length limit.
    fn feed_plain(&mut self) -> Result<FeedResult, ReadlineError> {
        loop {
            match self.input.read_byte()? {
                ReadOutcome::Byte(b'\n') => {
                    let line = String::from_utf8_lossy(&self.plain_line).into_owned();
                    self.plain_line.clear();
                    return Ok(FeedResult::Done(ReadlineEvent::Line(line)));
                }
                ReadOutcome::Byte(byte) => self.plain_line.push(byte),
                ReadOutcome::NotReady => return Ok(FeedResult::More),
                ReadOutcome::Eof if self.plain_line.is_empty() => {
                    return Ok(FeedResult::Done(ReadlineEvent::Eof));
                }
                ReadOutcome::Eof => {
                    let line = String::from_utf8_lossy(&self.plain_line).into_owned();
                    self.plain_line.clear();
                    return Ok(FeedResult::Done(ReadlineEvent::Line(line)));
                }
            }
        }
    }

    fn handle_key(&mut self, key: Key) -> Option<ReadlineEvent> {
        let changed = match key {
            Key::Enter => return Some(self.handle_enter()),
            Key::Interrupt => {
                self.ctx.history.end_live_slot();
                return Some(ReadlineEvent::Interrupted);
            }
            Key::DeleteOrEof if self.buffer.is_empty() => {
                self.ctx.history.end_live_slot();
                return Some(ReadlineEvent::Eof);
            }
            Key::Char(ch) => {
                self.insert_char(ch);
                false
            }
            Key::DeleteOrEof | Key::Delete => self.buffer.delete(),
            Key::Backspace => self.buffer.backspace(),
            Key::Transpose => self.buffer.transpose(),
            Key::Left => self.buffer.move_left(),
            Key::Right => self.buffer.move_right(),
            Key::Home => self.buffer.move_home(),
            Key::End => self.buffer.move_end(),
            Key::KillLine => self.buffer.clear(),
            Key::KillToEnd => self.buffer.kill_to_end(),
            Key::DeletePrevWord => self.buffer.delete_prev_word(),
            Key::Up => self.navigate_history(HistoryDirection::Prev),
            Key::Down => self.navigate_history(HistoryDirection::Next),
            Key::ClearScreen => {
                clear_screen(&mut *self.output);
                self.render_state = RenderState::default();
                true
            }
            Key::Tab | Key::Escape | Key::Ignored => false,
        };
        if changed {
            self.refresh(RefreshMode::All);
        }
        None
    }

    fn handle_enter(&mut self) -> ReadlineEvent {
        self.ctx.history.end_live_slot();
        if self.ctx.config.multiline && self.buffer.move_end() {
            self.refresh(RefreshMode::All);
        }
        if self.ctx.hinter.is_some() {
            // Leave the committed line on screen without its hint.
            self.suppress_hints = true;
            self.refresh(RefreshMode::All);
            self.suppress_hints = false;
        }
        ReadlineEvent::Line(self.buffer.as_str().to_owned())
    }

    /// Appending a lone cluster that still fits on a single line only needs the new
    /// text written. Everything else goes through a full refresh.
    fn insert_char(&mut self, ch: char) {
        let mut encoded = [0_u8; 4];
        let chunk = ch.encode_utf8(&mut encoded);
        let was_at_end = self.buffer.is_cursor_at_end();
        if !self.buffer.insert(chunk) {
            return;
        }

        let mask_mode = self.ctx.config.mask_mode;
        let is_own_cluster =
            prev_grapheme_len(self.buffer.as_str(), self.buffer.cursor()) == chunk.len();
        let fits = prompt_width(&self.prompt) + content_width(self.buffer.as_str(), mask_mode)
            < self.columns;

        if was_at_end
            && is_own_cluster
            && fits
            && !self.ctx.config.multiline
            && self.ctx.hinter.is_none()
        {
            if mask_mode {
                write_best_effort!(self.output, b"*");
            } else {
                write_best_effort!(self.output, chunk.as_bytes());
            }
        } else {
            self.refresh(RefreshMode::All);
        }
    }

    fn navigate_history(&mut self, direction: HistoryDirection) -> bool {
        match self
            .ctx
            .history
            .navigate(&mut self.history_index, self.buffer.as_str(), direction)
        {
            Some(entry) => {
                self.buffer.set_text(entry);
                true
            }
            None => false,
        }
    }

    /// Completion mode. Returns the key to go on handling, or `None` if completion
    /// consumed it.
    ///
    /// `Tab` cycles through the candidates and then back to the original line. `Escape`
    /// restores the original line. Any other key accepts the candidate on screen.
    fn complete_line(&mut self, key: Key) -> Option<Key> {
        if !self.completion.is_active() {
            self.completions = Completions::new();
            if let Some(completer) = self.ctx.completer.as_deref() {
                completer.complete(self.buffer.as_str(), &mut self.completions);
            }
            if self.completions.is_empty() {
                self.beep();
                return if key == Key::Tab { None } else { Some(key) };
            }
        }

        match key {
            Key::Tab => {
                let (_, wrapped) = self.completion.advance(self.completions.len());
                if wrapped {
                    self.beep();
                }
                self.refresh(RefreshMode::All);
                None
            }
            Key::Escape => {
                self.completion.reset();
                self.refresh(RefreshMode::All);
                None
            }
            _ => {
                if let Some(candidate) =
                    self.completion.index.and_then(|it| self.completions.get(it))
                {
                    self.buffer.set_text(candidate);
                }
                self.completion.reset();
                self.completions = Completions::new();
                self.refresh(RefreshMode::All);
                Some(key)
            }
        }
    }

    fn beep(&mut self) { write_best_effort!(self.output, BELL); }

    /// Redraw. While cycling through completions the candidate is drawn in place of
    /// the line, without touching the line itself.
    fn refresh(&mut self, mode: RefreshMode) {
        let candidate = self
            .completion
            .index
            .and_then(|it| self.completions.get(it))
            .map(|text| {
                let mut it = LineBuffer::new(self.buffer.capacity());
                it.set_text(text);
                it
            });

        let hinter: Option<&dyn Hinter> = match self.ctx.hinter.as_deref() {
            Some(hinter) if !self.suppress_hints => Some(hinter),
            _ => None,
        };

        let view = LineView {
            prompt: &self.prompt,
            buffer: candidate.as_ref().unwrap_or(&self.buffer),
            columns: self.columns,
            multiline: self.ctx.config.multiline,
            mask_mode: self.ctx.config.mask_mode,
            hinter,
        };
        let output = view.render(&mut self.render_state, mode);
        write_best_effort!(self.output, output.as_bytes());
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) { self.finish(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorConfig, Hint, InputDeviceMock, ScreenMock, StdoutMock, TerminalConfig};
    use pretty_assertions::assert_eq;

    fn context(columns: usize) -> Context {
        let mut context = Context::new();
        context.set_terminal_config(TerminalConfig::new_mock(columns));
        context
    }

    /// Feed every scripted byte and return the final result.
    fn run(session: &mut Session<'_>) -> FeedResult {
        loop {
            let result = session.feed().unwrap();
            if !result.is_more() {
                return result;
            }
        }
    }

    fn start<'a>(
        context: &'a mut Context,
        input: &InputDeviceMock,
        stdout: &StdoutMock,
    ) -> Session<'a> {
        context
            .start_session(Box::new(input.clone()), Box::new(stdout.clone()), "> ")
            .unwrap()
    }

    #[test]
    fn test_typing_and_enter() {
        let mut context = context(80);
        let input = InputDeviceMock::new(b"hello\r");
        let stdout = StdoutMock::default();
        let mut session = start(&mut context, &input, &stdout);

        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("hello".into()))
        );
        session.stop();

        // Each char went through the fast path: prompt, then the bytes as typed.
        assert_eq!(stdout.get_copy_of_buffer_as_string(), "> hello\n");
        assert!(context.history().is_empty());
    }

    #[test]
    fn test_non_blocking_feed_returns_more() {
        let mut context = context(80);
        let input = InputDeviceMock::new_non_blocking(b"ab");
        let stdout = StdoutMock::default();
        let mut session = start(&mut context, &input, &stdout);

        assert_eq!(session.feed().unwrap(), FeedResult::More);
        assert_eq!(session.feed().unwrap(), FeedResult::More);
        assert_eq!(session.feed().unwrap(), FeedResult::More);
        assert_eq!(session.line(), "ab");

        input.push_bytes(b"c\r");
        assert_eq!(session.feed().unwrap(), FeedResult::More);
        assert_eq!(
            session.feed().unwrap(),
            FeedResult::Done(ReadlineEvent::Line("abc".into()))
        );
    }

    #[test]
    fn test_ctrl_c_and_ctrl_d() {
        let mut context = context(80);
        let stdout = StdoutMock::default();

        let input = InputDeviceMock::new(b"abc\x03");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(run(&mut session), FeedResult::Done(ReadlineEvent::Interrupted));
        drop(session);

        // Ctrl+D deletes while there is text, then ends input on an empty line.
        let input = InputDeviceMock::new(b"ab\x01\x04\x04\x04");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(run(&mut session), FeedResult::Done(ReadlineEvent::Eof));
        drop(session);

        assert!(context.history().is_empty());
    }

    #[test]
    fn test_end_of_input_is_eof() {
        let mut context = context(80);
        let input = InputDeviceMock::new(b"partial");
        let stdout = StdoutMock::default();
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(run(&mut session), FeedResult::Done(ReadlineEvent::Eof));
    }

    #[test]
    fn test_editing_keys() {
        let mut context = context(80);
        let stdout = StdoutMock::default();
        // Ctrl+W drops "world", then Left Left Ctrl+T swaps "e" and "r".
        let input = InputDeviceMock::new(b"hello world\x17there\x1b[D\x1b[D\x14\r");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("hello three".into()))
        );
    }

    #[test]
    fn test_kill_keys() {
        let mut context = context(80);
        let stdout = StdoutMock::default();
        let input = InputDeviceMock::new(b"one two\x1b[H\x1b[C\x1b[C\x1b[C\x0b\x01x\r");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("xone".into()))
        );
        drop(session);

        let input = InputDeviceMock::new(b"junk\x15ok\r");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("ok".into()))
        );
    }

    #[test]
    fn test_emoji_backspace_removes_whole_cluster() {
        let mut context = context(80);
        let input = InputDeviceMock::new_non_blocking("😀".as_bytes());
        let stdout = StdoutMock::default();
        let mut session = start(&mut context, &input, &stdout);

        while session.feed().unwrap().is_more() && input.remaining() > 0 {}
        assert_eq!(session.line(), "😀");
        assert_eq!(session.cursor(), 4);

        input.push_bytes(b"\x7f");
        assert_eq!(session.feed().unwrap(), FeedResult::More);
        assert_eq!(session.line(), "");
        assert_eq!(session.cursor(), 0);

        let mut screen = ScreenMock::new(80);
        screen.apply(&stdout.get_copy_of_buffer());
        assert_eq!(screen.line(0), ">");
        assert_eq!(screen.cursor(), (0, 2));

        input.push_bytes(b"ok\r");
        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("ok".into()))
        );
    }

    #[test]
    fn test_history_navigation_keeps_edits() {
        let mut context = context(80);
        context.history_add("first");
        context.history_add("second");
        let stdout = StdoutMock::default();

        // Up, Up, Down: lands on "second". Edit it, go Up and back Down: edit is kept.
        let input = InputDeviceMock::new(b"\x1b[A\x1b[A\x1b[B!\x10\x0e\r");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("second!".into()))
        );
        drop(session);
        assert_eq!(context.history().iter().collect::<Vec<_>>(), vec!["first", "second!"]);
    }

    #[test]
    fn test_completion_cycle_and_accept() {
        let mut context = context(80);
        context.set_completer(|line: &str, completions: &mut Completions| {
            if line.starts_with('h') {
                completions.add("hello");
                completions.add("help");
            }
        });
        let stdout = StdoutMock::default();

        // Tab, Tab shows "help"; typing "!" accepts it and inserts.
        let input = InputDeviceMock::new(b"h\t\t!\r");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("help!".into()))
        );
        drop(session);

        // Cycling past the last candidate rings the bell and shows the original.
        stdout.clear();
        let input = InputDeviceMock::new(b"h\t\t\t\r");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(run(&mut session), FeedResult::Done(ReadlineEvent::Line("h".into())));
        assert!(stdout.get_copy_of_buffer_as_string().contains('\x07'));
    }

    #[test]
    fn test_completion_escape_restores() {
        let mut context = context(80);
        context.set_completer(|_: &str, completions: &mut Completions| {
            completions.add("candidate");
        });
        let stdout = StdoutMock::default();
        // ESC followed by nothing within the timeout is a bare Escape. The mock
        // reports a timeout once drained, so push the rest after feeding it.
        let input = InputDeviceMock::new_non_blocking(b"x\t\x1b");
        let mut session = start(&mut context, &input, &stdout);
        for _ in 0..3 {
            assert_eq!(session.feed().unwrap(), FeedResult::More);
        }
        assert_eq!(session.line(), "x");
        input.push_bytes(b"y\r");
        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("xy".into()))
        );
    }

    #[test]
    fn test_tab_without_candidates_beeps() {
        let mut context = context(80);
        context.set_completer(|_: &str, _: &mut Completions| {});
        let stdout = StdoutMock::default();
        let input = InputDeviceMock::new(b"a\tb\r");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(run(&mut session), FeedResult::Done(ReadlineEvent::Line("ab".into())));
        assert!(stdout.get_copy_of_buffer_as_string().contains('\x07'));
    }

    #[test]
    fn test_hint_removed_on_enter() {
        let mut context = context(80);
        context.set_hinter(|line: &str| (line == "git").then(|| Hint::new(" commit")));
        let stdout = StdoutMock::default();
        let input = InputDeviceMock::new(b"git\r");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(run(&mut session), FeedResult::Done(ReadlineEvent::Line("git".into())));

        let mut screen = ScreenMock::new(80);
        let output = stdout.get_copy_of_buffer();
        assert!(String::from_utf8_lossy(&output).contains(" commit"));
        screen.apply(&output);
        assert_eq!(screen.line(0), "> git");
    }

    #[test]
    fn test_mask_mode() {
        let mut context = context(80);
        context.set_mask_mode(true);
        let stdout = StdoutMock::default();
        let input = InputDeviceMock::new("pa😀".as_bytes());
        let mut session = start(&mut context, &input, &stdout);
        for _ in 0..3 {
            session.feed().unwrap();
        }
        assert_eq!(session.line(), "pa😀");

        let mut screen = ScreenMock::new(80);
        screen.apply(&stdout.get_copy_of_buffer());
        assert_eq!(screen.line(0), "> ***");
    }

    #[test]
    fn test_mask_mode_wraps_in_multiline() {
        let mut context = context(10);
        context.set_mask_mode(true);
        context.set_multiline(true);
        let stdout = StdoutMock::default();
        // 14 clusters, some wide: masked, each one takes a single column.
        let secret = "pässwörd😀中文xyz";
        let input = InputDeviceMock::new_non_blocking(secret.as_bytes());
        let mut session = start(&mut context, &input, &stdout);
        while input.remaining() > 0 {
            session.feed().unwrap();
        }
        assert_eq!(session.line(), secret);

        let mut screen = ScreenMock::new(10);
        screen.apply(&stdout.get_copy_of_buffer());
        assert_eq!(screen.non_empty_lines(), vec!["> ********", "******"]);
        assert_eq!(screen.cursor(), (1, 6));

        // Home, then three clusters right.
        input.push_bytes(b"\x01\x1b[C\x1b[C\x1b[C");
        while input.remaining() > 0 {
            session.feed().unwrap();
        }
        let mut screen = ScreenMock::new(10);
        screen.apply(&stdout.get_copy_of_buffer());
        assert_eq!(screen.non_empty_lines(), vec!["> ********", "******"]);
        assert_eq!(screen.cursor(), (0, 5));

        let visible = stdout.get_copy_of_buffer_as_string_strip_ansi();
        assert!(
            visible.chars().all(|it| matches!(it, '*' | '>' | ' ' | '\r' | '\n')),
            "secret leaked: {visible:?}"
        );
    }

    #[test]
    fn test_insert_refused_when_full() {
        let mut context = Context::with_config(EditorConfig {
            buffer_capacity: 3,
            ..EditorConfig::default()
        });
        context.set_terminal_config(TerminalConfig::new_mock(80));
        let stdout = StdoutMock::default();
        let input = InputDeviceMock::new(b"abcdef\r");
        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(run(&mut session), FeedResult::Done(ReadlineEvent::Line("abc".into())));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut context = Context::with_config(EditorConfig {
            buffer_capacity: 0,
            ..EditorConfig::default()
        });
        context.set_terminal_config(TerminalConfig::new_mock(80));
        let result = context.start_session(
            Box::new(InputDeviceMock::new(b"")),
            Box::new(StdoutMock::default()),
            "> ",
        );
        assert!(matches!(result, Err(ReadlineError::InvalidBufferCapacity)));
        drop(result);
        assert!(context.history().is_empty());
    }

    #[test]
    fn test_non_tty_reads_plain_lines() {
        let mut context = Context::new();
        context.set_terminal_config(TerminalConfig::default());
        let stdout = StdoutMock::default();
        let input = InputDeviceMock::new(b"first line\x1b[A\nsecond");

        let mut session = start(&mut context, &input, &stdout);
        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("first line\x1b[A".into()))
        );
        assert_eq!(
            run(&mut session),
            FeedResult::Done(ReadlineEvent::Line("second".into()))
        );
        assert_eq!(run(&mut session), FeedResult::Done(ReadlineEvent::Eof));
        session.stop();

        // No prompt, no escapes, no trailing newline.
        assert_eq!(stdout.get_copy_of_buffer_as_string(), "");
    }

    #[test]
    fn test_hide_show_and_print_above() {
        let mut context = context(40);
        let stdout = StdoutMock::default();
        let input = InputDeviceMock::new_non_blocking(b"abc");
        let mut session = start(&mut context, &input, &stdout);
        while input.remaining() > 0 {
            session.feed().unwrap();
        }

        session.print_above("log line\n");
        let mut screen = ScreenMock::new(40);
        screen.apply(&stdout.get_copy_of_buffer());
        assert_eq!(screen.non_empty_lines(), vec!["log line", "> abc"]);
        assert_eq!(screen.cursor(), (1, 5));
    }

    #[test]
    fn test_clear_screen_redraws() {
        let mut context = context(40);
        let stdout = StdoutMock::default();
        let input = InputDeviceMock::new_non_blocking(b"abc\x0c");
        let mut session = start(&mut context, &input, &stdout);
        while input.remaining() > 0 {
            session.feed().unwrap();
        }
        let output = stdout.get_copy_of_buffer_as_string();
        assert!(output.contains("\x1b[H\x1b[2J"));
        let mut screen = ScreenMock::new(40);
        screen.apply(output.as_bytes());
        assert_eq!(screen.non_empty_lines(), vec!["> abc"]);
    }
}
