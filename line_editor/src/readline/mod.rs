// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line editing engine. A [`Context`] holds configuration, callbacks and
//! [`History`], and outlives any one edit. Each edit is a [`Session`] that borrows the
//! context, owns a [`LineBuffer`], and is driven one keystroke at a time by
//! [`Session::feed`]. Every state change is followed by a refresh from
//! [`render`](mod@render).

// Attach.
pub mod completion;
pub mod context;
pub mod error;
pub mod history;
pub mod key;
pub mod key_codes;
pub mod line_buffer;
pub mod render;
pub mod session;

// Re-export.
pub use completion::*;
pub use context::*;
pub use error::*;
pub use history::*;
pub use key::*;
pub use key_codes::*;
pub use line_buffer::*;
pub use render::*;
pub use session::*;
