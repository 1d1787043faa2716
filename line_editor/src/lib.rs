// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words linenoise termios ctrl

//! # `r3bl_line_editor`
//!
//! Interactive line editing for raw terminals, in the spirit of `linenoise`. It turns
//! the raw byte stream coming from a terminal into a single edited line of text, and
//! redraws only what changed so that the display never flickers.
//!
//! Features:
//! - Single line mode with horizontal scrolling, and multi line mode with row wrapping.
//! - Cursor movement, insertion and deletion always step over whole grapheme clusters
//!   (emoji with skin tone modifiers, ZWJ sequences, flags, combining marks).
//! - History with deduplication, a bounded size, and file persistence.
//! - Tab completion and inline hints via the [`Completer`] and [`Hinter`] traits.
//! - Mask mode for password entry.
//! - Two ways to drive it: a blocking [`Context::read_line`] call, or a non blocking
//!   [`Session`] that you [`Session::feed`] from your own event loop. The blocking call
//!   is a thin loop over `feed`.
//!
//! # Blocking usage
//!
//! ```no_run
//! use r3bl_line_editor::{Context, ReadlineEvent};
//!
//! # fn main() -> miette::Result<()> {
//! let mut context = Context::new();
//! context.set_completer(|line: &str, completions: &mut r3bl_line_editor::Completions| {
//!     if line.starts_with('h') {
//!         completions.add("hello");
//!         completions.add("hello there");
//!     }
//! });
//!
//! loop {
//!     match context.read_line("hello> ")? {
//!         ReadlineEvent::Line(line) => {
//!             context.history_add(&line);
//!             println!("echo: {line}");
//!         }
//!         ReadlineEvent::Eof | ReadlineEvent::Interrupted => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Non blocking usage
//!
//! [`Context::start_session`] returns a [`Session`] that borrows the [`Context`] for the
//! duration of one edit. Call [`Session::feed`] whenever the input device is readable.
//! It consumes one keystroke and returns [`FeedResult::More`] until the edit concludes.
//! [`Session::hide`] and [`Session::show`] (or [`Session::print_above`]) let you print
//! asynchronous output without corrupting the line being edited.
//!
//! # Testing hooks
//!
//! Set `R3BL_LINE_EDITOR_ASSUME_TTY` to treat piped input as an interactive terminal
//! (raw mode is skipped), and `R3BL_LINE_EDITOR_COLS` to pin the terminal width. The
//! same knobs are available programmatically via [`TerminalConfig`].
//!
//! # Logging
//!
//! The crate emits [`tracing`] events but never installs a subscriber. Since stdout is
//! the terminal being edited, log to a file using [`try_initialize_logging_global`]
//! with [`WriterConfig::File`].

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod core;
pub mod readline;

// Re-export.
pub use core::*;
pub use readline::*;
