// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte level terminal plumbing: raw mode, the process wide exit hook that restores the
//! terminal, reading bytes with a timeout, and probing the terminal width.

// Private modules (hide internal structure).
mod exit_hook;
mod input_device;
mod raw_mode;
#[cfg(unix)]
mod raw_mode_unix;
mod term;
mod terminal_config;
mod terminal_io_type_aliases;

// Re-exports for flat public API.
pub use exit_hook::*;
pub use input_device::*;
pub use raw_mode::*;
pub use term::*;
pub use terminal_config::*;
pub use terminal_io_type_aliases::*;
