// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Errors returned by the line editor. A user pressing `Ctrl+C` or `Ctrl+D` is not an
/// error; those are reported as [`ReadlineEvent::Interrupted`] and
/// [`ReadlineEvent::Eof`].
#[derive(Debug, Error, Diagnostic)]
pub enum ReadlineError {
    /// An internal I/O error occurred, eg reading input or a history file.
    #[error(transparent)]
    #[diagnostic(code(r3bl_line_editor::io))]
    IO(#[from] io::Error),

    #[error("line buffer capacity must be greater than zero")]
    #[diagnostic(
        code(r3bl_line_editor::config::buffer_capacity),
        help("Set `EditorConfig::buffer_capacity` to at least 1")
    )]
    InvalidBufferCapacity,

    #[error("history max length must be at least 1, got {0}")]
    #[diagnostic(code(r3bl_line_editor::config::history_len))]
    InvalidHistoryLength(usize),

    #[error("stdin is not a tty")]
    #[diagnostic(
        code(r3bl_line_editor::env::not_a_tty),
        help("Set `R3BL_LINE_EDITOR_ASSUME_TTY` to edit piped input")
    )]
    NotATty,

    #[error("failed to change terminal mode: {reason}")]
    #[diagnostic(code(r3bl_line_editor::env::raw_mode))]
    RawMode { reason: String },
}

/// How an edit concluded.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ReadlineEvent {
    /// The user entered a line of text. Ownership passes to the caller.
    Line(String),

    /// The user pressed `Ctrl+D` on an empty line, or the input stream ended.
    Eof,

    /// The user pressed `Ctrl+C`.
    Interrupted,
}

/// Result of feeding one keystroke to a [`crate::Session`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FeedResult {
    /// The edit is still in progress; feed more input.
    More,
    /// The edit is over.
    Done(ReadlineEvent),
}

impl FeedResult {
    #[must_use]
    pub fn is_more(&self) -> bool { matches!(self, FeedResult::More) }
}
