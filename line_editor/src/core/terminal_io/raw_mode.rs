// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal raw mode.
//!
//! **Cooked Mode** (default):
//! - Input is line-buffered (waits for Enter key)
//! - Special characters are interpreted (Ctrl+C sends SIGINT, Ctrl+D, etc.)
//! - Echoing is enabled (typed characters appear on screen)
//!
//! **Raw Mode**:
//! - No line buffering, bytes are available immediately
//! - No special character processing, `Ctrl+C` arrives as byte `0x03`
//! - No echo, the line editor draws every character itself
//! - No output post processing, so `\n` does not imply `\r`
//!
//! There is exactly one real terminal per process, so raw mode is process global state.
//! Enabling it twice is harmless, and so is disabling it twice. The first call to
//! [`enable_raw_mode`] also installs the [exit hook](crate::install_exit_hook) that
//! restores the terminal if the process dies while raw mode is on.

#[cfg(unix)]
use super::raw_mode_unix;
use crate::install_exit_hook;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether this process currently has the terminal in raw mode.
static IS_RAW_MODE: AtomicBool = AtomicBool::new(false);

#[must_use]
pub fn is_raw_mode_enabled() -> bool { IS_RAW_MODE.load(Ordering::SeqCst) }

/// Switch the terminal attached to stdin into raw mode, saving the current attributes so
/// they can be restored later.
///
/// # Errors
///
/// Returns an error if stdin is not a tty, or its attributes can't be read or set.
pub fn enable_raw_mode() -> miette::Result<()> {
    install_exit_hook();

    #[cfg(unix)]
    {
        raw_mode_unix::enable_raw_mode()?;
        IS_RAW_MODE.store(true, Ordering::SeqCst);
        tracing::debug!(message = "Raw mode enabled");
        Ok(())
    }

    #[cfg(not(unix))]
    {
        Err(miette::miette!("Platform not supported"))
    }
}

/// Restore the attributes saved by [`enable_raw_mode`]. No-op if raw mode is not on,
/// which makes this safe to call from several cleanup paths.
///
/// # Errors
///
/// Returns an error if the saved attributes can't be applied.
pub fn disable_raw_mode() -> miette::Result<()> {
    if !IS_RAW_MODE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }

    #[cfg(unix)]
    {
        raw_mode_unix::disable_raw_mode()?;
        tracing::debug!(message = "Raw mode disabled");
        Ok(())
    }

    #[cfg(not(unix))]
    {
        Err(miette::miette!("Platform not supported"))
    }
}

/// RAII handle that keeps the terminal in raw mode for as long as it is alive.
#[derive(Debug)]
pub struct RawModeGuard;

impl RawModeGuard {
    /// # Errors
    ///
    /// See [`enable_raw_mode`].
    pub fn new() -> miette::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            tracing::warn!(message = "Failed to restore terminal", error = ?err);
        }
    }
}
