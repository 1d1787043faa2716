// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Display width and grapheme cluster math.
//!
//! A line being edited is tracked in three different units at the same time:
//! - **Byte index**: where the cursor is in the UTF-8 encoded [String].
//! - **Grapheme cluster**: the user perceived character. Cursor movement, insertion and
//!   deletion always step over whole clusters, eg `🙏🏽` (4 + 4 bytes) or `👨‍👩‍👧`
//!   (18 bytes) are each one cursor step and one backspace.
//! - **Display column**: how many terminal cells a cluster occupies (0, 1 or 2).
//!
//! Here's an example for `"a🙏🏽b"`:
//!
//! ```text
//! byte index:    0 1       9
//!                a 🙏🏽      b
//! cluster:       0 1       2
//! display col:   0 1 2     3
//! ```
//!
//! Nothing in this module can fail. Malformed input falls back to single byte steps so
//! that the cursor always makes progress.

// Attach.
pub mod boundaries;
pub mod utf8;
pub mod width;

// Re-export.
pub use boundaries::*;
pub use utf8::*;
pub use width::*;
