// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Building blocks that know nothing about line editing: display width and grapheme
//! cluster math, the escape sequences we emit, raw mode and byte level terminal I/O,
//! logging setup, and test fixtures.

// Connect to source file.
pub mod ansi;
pub mod decl_macros;
pub mod graphemes;
pub mod log;
pub mod terminal_io;
pub mod test_fixtures;

// Re-export.
pub use ansi::*;
pub use graphemes::*;
pub use log::*;
pub use terminal_io::*;
pub use test_fixtures::*;
