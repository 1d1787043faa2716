// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Process wide hook that puts the terminal back into cooked mode if the process goes
//! away while raw mode is on. It is installed once, the first time raw mode is enabled,
//! and covers:
//! - panics, via a panic hook that chains to the previously installed one,
//! - `SIGTERM`, `SIGHUP` and `SIGQUIT` on Unix, via a [`signal_hook`] watcher thread
//!   that restores the terminal and then performs the signal's default action.
//!
//! Normal returns are covered by [`crate::RawModeGuard`]'s [`Drop`] impl. Restoring is
//! idempotent, so it doesn't matter how many of these paths run.

use crate::disable_raw_mode;
use std::sync::Once;

static INSTALL_EXIT_HOOK: Once = Once::new();

pub fn install_exit_hook() {
    INSTALL_EXIT_HOOK.call_once(|| {
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            restore_terminal_on_exit();
            previous_hook(panic_info);
        }));

        #[cfg(unix)]
        spawn_signal_watcher();

        tracing::debug!(message = "Exit hook installed");
    });
}

fn restore_terminal_on_exit() {
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(message = "Failed to restore terminal on exit", error = ?err);
    }
}

#[cfg(unix)]
fn spawn_signal_watcher() {
    use signal_hook::{consts::{SIGHUP, SIGQUIT, SIGTERM},
                      iterator::Signals,
                      low_level::emulate_default_handler};

    let mut signals = match Signals::new([SIGTERM, SIGHUP, SIGQUIT]) {
        Ok(it) => it,
        Err(err) => {
            tracing::warn!(message = "Failed to register exit signals", error = ?err);
            return;
        }
    };

    let spawn_result = std::thread::Builder::new()
        .name("line-editor-exit-hook".into())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                restore_terminal_on_exit();
                if let Err(err) = emulate_default_handler(signal) {
                    tracing::warn!(message = "Failed to re-raise signal", signal, error = ?err);
                }
            }
        });

    if let Err(err) = spawn_result {
        tracing::warn!(message = "Failed to spawn exit hook thread", error = ?err);
    }
}
