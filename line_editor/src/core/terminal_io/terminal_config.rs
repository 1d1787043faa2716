// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Treat non-tty input (eg a pipe) as an interactive terminal. Raw mode is skipped.
/// Any non-empty value turns this on.
pub const ENV_ASSUME_TTY: &str = "R3BL_LINE_EDITOR_ASSUME_TTY";

/// Pin the terminal width to this many columns, bypassing all width queries.
pub const ENV_COLUMNS: &str = "R3BL_LINE_EDITOR_COLS";

/// Name of the terminal type, used to detect terminals that can't do line editing.
pub const ENV_TERM: &str = "TERM";

/// Terminal types that can't handle the escape sequences the editor emits. Reading a line
/// on these falls back to plain line input.
pub const UNSUPPORTED_TERMS: [&str; 3] = ["dumb", "cons25", "emacs"];

/// How the editor should treat the terminal. [`TerminalConfig::from_env`] captures the
/// environment once; tests can build one directly and skip the environment entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Edit even if the input is not a tty, and never touch raw mode.
    pub assume_tty: bool,
    /// Use this width instead of querying the terminal.
    pub fixed_columns: Option<usize>,
    /// Value of `TERM`.
    pub term: Option<String>,
}

impl TerminalConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let assume_tty = std::env::var_os(ENV_ASSUME_TTY).is_some_and(|it| !it.is_empty());
        let fixed_columns = std::env::var(ENV_COLUMNS)
            .ok()
            .and_then(|it| it.trim().parse::<usize>().ok())
            .filter(|&it| it > 0);
        let term = std::env::var(ENV_TERM).ok();
        Self {
            assume_tty,
            fixed_columns,
            term,
        }
    }

    /// Deterministic configuration for tests: assume a tty of the given width.
    #[must_use]
    pub fn new_mock(columns: usize) -> Self {
        Self {
            assume_tty: true,
            fixed_columns: Some(columns),
            term: None,
        }
    }

    #[must_use]
    pub fn is_unsupported_term(&self) -> bool {
        self.term.as_deref().is_some_and(|term| {
            UNSUPPORTED_TERMS
                .iter()
                .any(|it| it.eq_ignore_ascii_case(term))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    /// Restores an env var when dropped.
    struct EnvVarGuard {
        key: &'static str,
        previous: Option<std::ffi::OsString>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = std::env::var_os(key);
            // SAFETY: tests that touch the environment are `#[serial]`.
            unsafe { std::env::set_var(key, value) };
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            // SAFETY: tests that touch the environment are `#[serial]`.
            unsafe {
                match &self.previous {
                    Some(it) => std::env::set_var(self.key, it),
                    None => std::env::remove_var(self.key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_from_env() {
        let _assume = EnvVarGuard::set(ENV_ASSUME_TTY, "1");
        let _cols = EnvVarGuard::set(ENV_COLUMNS, "60");
        let _term = EnvVarGuard::set(ENV_TERM, "xterm-256color");

        let config = TerminalConfig::from_env();
        assert_eq!(
            config,
            TerminalConfig {
                assume_tty: true,
                fixed_columns: Some(60),
                term: Some("xterm-256color".into()),
            }
        );
        assert!(!config.is_unsupported_term());
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_columns() {
        let _assume = EnvVarGuard::set(ENV_ASSUME_TTY, "");
        let _cols = EnvVarGuard::set(ENV_COLUMNS, "zero");

        let config = TerminalConfig::from_env();
        assert!(!config.assume_tty);
        assert_eq!(config.fixed_columns, None);

        let _cols = EnvVarGuard::set(ENV_COLUMNS, "0");
        assert_eq!(TerminalConfig::from_env().fixed_columns, None);
    }

    #[test]
    fn test_unsupported_terms() {
        for term in ["dumb", "cons25", "emacs", "DUMB"] {
            let config = TerminalConfig {
                term: Some(term.into()),
                ..Default::default()
            };
            assert!(config.is_unsupported_term(), "{term}");
        }
        assert!(!TerminalConfig::default().is_unsupported_term());
    }
}
