// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The small subset of ANSI escape sequences that the line editor emits and parses.

// Attach.
pub mod constants;
pub mod csi_sequence;

// Re-export.
pub use constants::*;
pub use csi_sequence::*;
