// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words isatty termios

//! Unix/Linux/macOS implementation of raw mode using rustix's safe termios API.

use crate::ok;
use miette::miette;
use rustix::{stdio,
             termios::{self, OptionalActions, Termios}};
use std::sync::{LazyLock, Mutex};

/// Stores the original terminal settings to restore later.
static ORIGINAL_TERMIOS: LazyLock<Mutex<Option<Termios>>> =
    LazyLock::new(|| Mutex::new(None));

/// Enable raw mode on the terminal attached to stdin.
///
/// 1. Check that stdin is a tty.
/// 2. Save the original terminal settings for restoration.
/// 3. Apply [`Termios::make_raw`], which disables canonical mode, echo, signal
///    generation and output post processing, and sets VMIN=1, VTIME=0.
///
/// # Errors
///
/// Returns miette diagnostic errors if stdin is not a tty, the terminal attributes
/// can't be retrieved or set, or the mutex is poisoned.
pub fn enable_raw_mode() -> miette::Result<()> {
    let fd = stdio::stdin();

    if !termios::isatty(fd) {
        return Err(miette!("stdin is not a tty"));
    }

    let mut termios = termios::tcgetattr(fd)
        .map_err(|e| miette!("failed to retrieve terminal attributes: {e}"))?;

    // Save original settings.
    {
        let mut original = ORIGINAL_TERMIOS
            .lock()
            .map_err(|e| miette!("terminal settings lock poisoned: {e}"))?;

        if original.is_none() {
            *original = Some(termios.clone());
        }
    }

    termios.make_raw();

    // Pending input typed before raw mode is discarded.
    termios::tcsetattr(fd, OptionalActions::Flush, &termios)
        .map_err(|e| miette!("failed to set terminal attributes: {e}"))?;

    ok!()
}

/// Restore the settings saved by [`enable_raw_mode`]. No-op if nothing was saved.
///
/// # Errors
///
/// Returns miette diagnostic errors if the attributes can't be set or the mutex is
/// poisoned.
pub fn disable_raw_mode() -> miette::Result<()> {
    let original = ORIGINAL_TERMIOS
        .lock()
        .map_err(|e| miette!("terminal settings lock poisoned: {e}"))?;

    if let Some(ref termios) = *original {
        termios::tcsetattr(stdio::stdin(), OptionalActions::Flush, termios)
            .map_err(|e| miette!("failed to set terminal attributes: {e}"))?;
    }

    ok!()
}
