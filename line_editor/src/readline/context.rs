// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Completer, DEFAULT_BUFFER_CAPACITY, FeedResult, Hinter, History, InputDevice,
            ReadOutcome, ReadlineError, ReadlineEvent, SendInputDevice, SendRawTerminal,
            Session, StdinInputDevice, TerminalConfig, clear_screen, print_key_codes,
            write_best_effort};
use std::{fmt::Debug, io, path::Path, time::Duration};

/// How long to wait for the rest of an escape sequence after `ESC` before deciding that
/// the user pressed `Escape` on its own.
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(100);

/// Editing behavior. Everything here can also be changed on a [`Context`] between
/// edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Wrap long lines over several rows instead of scrolling horizontally.
    pub multiline: bool,
    /// Draw `*` for every character, eg for passwords.
    pub mask_mode: bool,
    /// Maximum length of a line in bytes. Keystrokes that would exceed it are ignored.
    pub buffer_capacity: usize,
    pub escape_timeout: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            multiline: false,
            mask_mode: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            escape_timeout: DEFAULT_ESCAPE_TIMEOUT,
        }
    }
}

/// Configuration, callbacks and [`History`] that outlive any single edit.
///
/// Contexts are independent of each other: each has its own settings and history, and
/// separate contexts can be used from separate threads. A context drives at most one
/// [`Session`] at a time, which the borrow in [`Context::start_session`] enforces.
pub struct Context {
    pub(crate) config: EditorConfig,
    pub(crate) terminal_config: TerminalConfig,
    pub(crate) completer: Option<Box<dyn Completer + Send>>,
    pub(crate) hinter: Option<Box<dyn Hinter + Send>>,
    pub(crate) history: History,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("terminal_config", &self.terminal_config)
            .field("completer", &self.completer.is_some())
            .field("hinter", &self.hinter.is_some())
            .field("history", &self.history)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self { Self::new() }
}

impl Context {
    /// A context with default settings. The terminal configuration is read from the
    /// environment, see [`TerminalConfig::from_env`].
    #[must_use]
    pub fn new() -> Self { Self::with_config(EditorConfig::default()) }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            terminal_config: TerminalConfig::from_env(),
            completer: None,
            hinter: None,
            history: History::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig { &self.config }

    pub fn set_multiline(&mut self, multiline: bool) { self.config.multiline = multiline; }

    pub fn set_mask_mode(&mut self, mask_mode: bool) { self.config.mask_mode = mask_mode; }

    pub fn set_completer(&mut self, completer: impl Completer + Send + 'static) {
        self.completer = Some(Box::new(completer));
    }

    pub fn clear_completer(&mut self) { self.completer = None; }

    pub fn set_hinter(&mut self, hinter: impl Hinter + Send + 'static) {
        self.hinter = Some(Box::new(hinter));
    }

    pub fn clear_hinter(&mut self) { self.hinter = None; }

    #[must_use]
    pub fn terminal_config(&self) -> &TerminalConfig { &self.terminal_config }

    pub fn set_terminal_config(&mut self, terminal_config: TerminalConfig) {
        self.terminal_config = terminal_config;
    }

    #[must_use]
    pub fn history(&self) -> &History { &self.history }

    pub fn history_mut(&mut self) -> &mut History { &mut self.history }

    /// See [`History::add`].
    pub fn history_add(&mut self, line: &str) -> bool { self.history.add(line) }

    /// See [`History::set_max_len`].
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::InvalidHistoryLength`] if `max_len` is 0.
    pub fn history_set_max_len(&mut self, max_len: usize) -> Result<(), ReadlineError> {
        self.history.set_max_len(max_len)
    }

    /// See [`History::save`].
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::IO`] if the file can't be written.
    pub fn history_save(&self, path: impl AsRef<Path>) -> Result<(), ReadlineError> {
        self.history.save(path)
    }

    /// See [`History::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::IO`] if the file can't be read.
    pub fn history_load(&mut self, path: impl AsRef<Path>) -> Result<(), ReadlineError> {
        self.history.load(path)
    }

    /// Read one line from stdin, editing it on stdout. Blocks until the user presses
    /// `Enter`, `Ctrl+C` or `Ctrl+D`.
    ///
    /// # Errors
    ///
    /// See [`Context::read_line_with`].
    pub fn read_line(&mut self, prompt: &str) -> Result<ReadlineEvent, ReadlineError> {
        self.read_line_with(
            Box::new(StdinInputDevice::new()),
            Box::new(io::stdout()),
            prompt,
        )
    }

    /// Read one line from `input`, editing it on `output`. This is a loop over
    /// [`Session::feed`], so `input` should block.
    ///
    /// On a terminal that can't handle escape sequences (see
    /// [`TerminalConfig::is_unsupported_term`]) the line is read without any editing.
    ///
    /// # Errors
    ///
    /// Returns an error if the session can't start or reading input fails.
    pub fn read_line_with(
        &mut self,
        mut input: Box<SendInputDevice>,
        mut output: Box<SendRawTerminal>,
        prompt: &str,
    ) -> Result<ReadlineEvent, ReadlineError> {
        let is_tty = input.is_terminal() || self.terminal_config.assume_tty;
        if is_tty && self.terminal_config.is_unsupported_term() {
            tracing::debug!(message = "Unsupported terminal, reading without editing");
            write_best_effort!(output, prompt.as_bytes());
            return read_unedited_line(&mut *input, self.config.buffer_capacity);
        }

        let mut session = self.start_session(input, output, prompt)?;
        let event = loop {
            if let FeedResult::Done(event) = session.feed()? {
                break event;
            }
        };
        session.stop();
        Ok(event)
    }

    /// Start a non blocking edit. Drive it with [`Session::feed`] whenever `input` has
    /// bytes to read.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::InvalidBufferCapacity`] if the configured capacity is 0.
    /// - [`ReadlineError::RawMode`] if the terminal can't be put into raw mode.
    pub fn start_session(
        &mut self,
        input: Box<SendInputDevice>,
        output: Box<SendRawTerminal>,
        prompt: &str,
    ) -> Result<Session<'_>, ReadlineError> {
        Session::start(self, input, output, prompt)
    }

    /// Clear stdout's screen.
    pub fn clear_screen(&self) { clear_screen(&mut io::stdout()); }

    /// Interactive diagnostic that echoes the code of every key pressed on stdin.
    ///
    /// # Errors
    ///
    /// See [`print_key_codes`].
    pub fn print_key_codes(&self) -> Result<(), ReadlineError> {
        print_key_codes(
            &mut StdinInputDevice::new(),
            &mut io::stdout(),
            &self.terminal_config,
        )
    }
}

/// Read up to a newline with no editing, keeping at most `capacity` bytes. Trailing
/// `\r` and `\n` are dropped.
fn read_unedited_line(
    input: &mut dyn InputDevice,
    capacity: usize,
) -> Result<ReadlineEvent, ReadlineError> {
    let mut bytes = Vec::new();
    loop {
        match input.read_byte()? {
            ReadOutcome::Byte(b'\n') => break,
            ReadOutcome::Byte(byte) => {
                if bytes.len() < capacity {
                    bytes.push(byte);
                }
            }
            ReadOutcome::NotReady => {}
            ReadOutcome::Eof if bytes.is_empty() => return Ok(ReadlineEvent::Eof),
            ReadOutcome::Eof => break,
        }
    }
    while bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    Ok(ReadlineEvent::Line(String::from_utf8_lossy(&bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InputDeviceMock, StdoutMock};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_line_with_blocking_loop() {
        let mut context = Context::new();
        context.set_terminal_config(TerminalConfig::new_mock(80));
        let stdout = StdoutMock::default();

        let event = context
            .read_line_with(
                Box::new(InputDeviceMock::new(b"ls -la\r")),
                Box::new(stdout.clone()),
                "$ ",
            )
            .unwrap();
        assert_eq!(event, ReadlineEvent::Line("ls -la".into()));
        assert_eq!(stdout.get_copy_of_buffer_as_string(), "$ ls -la\n");
    }

    #[test]
    fn test_unsupported_terminal_reads_plain_line() {
        let mut context = Context::new();
        context.set_terminal_config(TerminalConfig {
            term: Some("dumb".into()),
            ..TerminalConfig::default()
        });
        let stdout = StdoutMock::default();
        let mut input = InputDeviceMock::new(b"abc\x7f\r\nnext");
        input.is_terminal = true;

        let event = context
            .read_line_with(Box::new(input), Box::new(stdout.clone()), "> ")
            .unwrap();
        assert_eq!(event, ReadlineEvent::Line("abc\x7f".into()));
        assert_eq!(stdout.get_copy_of_buffer_as_string(), "> ");
        assert!(context.history().is_empty());
    }

    #[test]
    fn test_unsupported_terminal_wins_over_assume_tty() {
        let mut context = Context::new();
        context.set_terminal_config(TerminalConfig {
            term: Some("dumb".into()),
            ..TerminalConfig::new_mock(80)
        });
        let stdout = StdoutMock::default();

        let event = context
            .read_line_with(
                Box::new(InputDeviceMock::new(b"ab\x1b[Dc\r\n")),
                Box::new(stdout.clone()),
                "> ",
            )
            .unwrap();
        assert_eq!(event, ReadlineEvent::Line("ab\x1b[Dc".into()));
        assert_eq!(stdout.get_copy_of_buffer_as_string(), "> ");
    }

    #[test]
    fn test_independent_contexts() {
        let mut one = Context::new();
        let mut two = Context::new();
        one.set_multiline(true);
        one.history_add("only in one");
        assert!(!two.config().multiline);
        assert!(two.history().is_empty());
        two.set_mask_mode(true);
        assert!(!one.config().mask_mode);
    }

    #[test]
    fn test_history_set_max_len_rejects_zero() {
        let mut context = Context::new();
        assert!(matches!(
            context.history_set_max_len(0),
            Err(ReadlineError::InvalidHistoryLength(0))
        ));
    }

    #[test]
    fn test_contexts_on_separate_threads() {
        let handles: Vec<_> = (0..2)
            .map(|id| {
                std::thread::spawn(move || {
                    let mut context = Context::new();
                    context.set_terminal_config(TerminalConfig::new_mock(40));
                    let line = format!("thread {id}\r");
                    context
                        .read_line_with(
                            Box::new(InputDeviceMock::new(line.as_bytes())),
                            Box::new(StdoutMock::default()),
                            "> ",
                        )
                        .unwrap()
                })
            })
            .collect();
        let events: Vec<_> = handles.into_iter().map(|it| it.join().unwrap()).collect();
        assert_eq!(
            events,
            vec![
                ReadlineEvent::Line("thread 0".into()),
                ReadlineEvent::Line("thread 1".into()),
            ]
        );
    }
}
