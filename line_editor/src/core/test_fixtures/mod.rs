// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test doubles for the terminal: a scripted input device, an output device that
//! records everything written to it, and a tiny screen model that interprets the escape
//! sequences the editor emits.

// Attach.
pub mod input_device_mock;
pub mod screen_mock;
pub mod stdout_mock;

// Re-export.
pub use input_device_mock::*;
pub use screen_mock::*;
pub use stdout_mock::*;
