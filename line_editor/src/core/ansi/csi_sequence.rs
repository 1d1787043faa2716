// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! CSI sequence builder for the cursor movement, erase and styling operations the
//! renderer performs.

use super::constants::{CSI_PARAM_SEPARATOR, CSI_START, CUB_CURSOR_BACKWARD,
                       CUD_CURSOR_DOWN, CUF_CURSOR_FORWARD, CUP_CURSOR_POSITION,
                       CUU_CURSOR_UP, DSR_DEVICE_STATUS, ED_ERASE_DISPLAY, EL_ERASE_LINE,
                       SGR_SET_GRAPHICS};
use std::fmt::{Display, Formatter, Result};

/// Builder for CSI (Control Sequence Introducer) sequences. Use the [`Display`] impl
/// to serialize a variant into its escape code, eg `CsiSequence::CursorUp(2)` becomes
/// `ESC[2A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiSequence {
    /// Cursor Up (CUU) - ESC [ n A
    CursorUp(usize),
    /// Cursor Down (CUD) - ESC [ n B
    CursorDown(usize),
    /// Cursor Forward (CUF) - ESC [ n C
    CursorForward(usize),
    /// Cursor Backward (CUB) - ESC [ n D
    CursorBackward(usize),
    /// Cursor Position (CUP) with no params - ESC [ H
    CursorHome,
    /// Erase Display (ED) - ESC [ n J
    EraseDisplay(u16),
    /// Erase Line (EL) - ESC [ n K
    EraseLine(u16),
    /// Device Status Report (DSR) - ESC [ n n
    DeviceStatusReport(u16),
    /// Select Graphic Rendition (SGR) with exactly three params - ESC [ a ; b ; c m
    SelectGraphicRendition(u16, u16, u16),
    /// Select Graphic Rendition (SGR) with one param - ESC [ n m
    SelectGraphicRenditionSingle(u16),
}

impl Display for CsiSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(CSI_START)?;
        match self {
            CsiSequence::CursorUp(n) => write!(f, "{n}{CUU_CURSOR_UP}"),
            CsiSequence::CursorDown(n) => write!(f, "{n}{CUD_CURSOR_DOWN}"),
            CsiSequence::CursorForward(n) => write!(f, "{n}{CUF_CURSOR_FORWARD}"),
            CsiSequence::CursorBackward(n) => write!(f, "{n}{CUB_CURSOR_BACKWARD}"),
            CsiSequence::CursorHome => write!(f, "{CUP_CURSOR_POSITION}"),
            CsiSequence::EraseDisplay(n) => write!(f, "{n}{ED_ERASE_DISPLAY}"),
            CsiSequence::EraseLine(n) => write!(f, "{n}{EL_ERASE_LINE}"),
            CsiSequence::DeviceStatusReport(n) => write!(f, "{n}{DSR_DEVICE_STATUS}"),
            CsiSequence::SelectGraphicRendition(a, b, c) => write!(
                f,
                "{a}{CSI_PARAM_SEPARATOR}{b}{CSI_PARAM_SEPARATOR}{c}{SGR_SET_GRAPHICS}"
            ),
            CsiSequence::SelectGraphicRenditionSingle(n) => {
                write!(f, "{n}{SGR_SET_GRAPHICS}")
            }
        }
    }
}
