// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Structured logging setup. The editor only emits [`tracing`] events; applications
//! decide where they go. Stdout is usually the very terminal being edited, so a file is
//! the sensible destination.
//!
//! ```no_run
//! use r3bl_line_editor::{TracingConfig, try_initialize_logging_global};
//! use tracing_core::LevelFilter;
//!
//! # fn main() -> miette::Result<()> {
//! try_initialize_logging_global(TracingConfig::new_file(
//!     Some("/tmp/line_editor.log".into()),
//!     LevelFilter::DEBUG,
//! ))?;
//! # Ok(())
//! # }
//! ```

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use rolling_file_appender_impl::*;
pub use tracing_config::*;
pub use tracing_init::*;
