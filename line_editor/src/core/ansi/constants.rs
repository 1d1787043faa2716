// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte and character constants for the escape sequences and control keys handled by
//! the line editor.
//!
//! ## Control bytes
//!
//! In raw mode the terminal delivers `Ctrl+<letter>` as the letter's position in the
//! alphabet, eg `Ctrl+A` is `0x01`. `Enter` is a carriage return and `Backspace` is
//! usually `DEL` (0x7F), although some terminals send `Ctrl+H` instead.

// CSI sequence components.

/// CSI sequence start: ESC [
pub const CSI_START: &str = "\x1b[";

/// Separator between numeric CSI parameters.
pub const CSI_PARAM_SEPARATOR: char = ';';

/// CSI A: Cursor Up (CUU)
pub const CUU_CURSOR_UP: char = 'A';

/// CSI B: Cursor Down (CUD)
pub const CUD_CURSOR_DOWN: char = 'B';

/// CSI C: Cursor Forward (CUF)
pub const CUF_CURSOR_FORWARD: char = 'C';

/// CSI D: Cursor Backward (CUB)
pub const CUB_CURSOR_BACKWARD: char = 'D';

/// CSI H: Cursor Position (CUP). Without params it homes the cursor.
pub const CUP_CURSOR_POSITION: char = 'H';

/// CSI J: Erase in Display (ED)
pub const ED_ERASE_DISPLAY: char = 'J';

/// CSI K: Erase in Line (EL)
pub const EL_ERASE_LINE: char = 'K';

/// CSI m: Select Graphic Rendition (SGR)
pub const SGR_SET_GRAPHICS: char = 'm';

/// CSI n: Device Status Report (DSR)
pub const DSR_DEVICE_STATUS: char = 'n';

/// DSR parameter that asks the terminal to report the cursor position.
pub const DSR_CURSOR_POSITION_REQUEST: u16 = 6;

/// Cursor position response terminator: R
pub const DSR_CURSOR_POSITION_RESPONSE_END: u8 = b'R';

/// `EL` / `ED` parameter: erase from the cursor to the end.
pub const ERASE_TO_END: u16 = 0;

/// `EL` / `ED` parameter: erase from the start to the cursor.
pub const ERASE_TO_START: u16 = 1;

/// `EL` / `ED` parameter: erase everything.
pub const ERASE_ALL: u16 = 2;

// SGR parameters used for hints.

/// Reset all attributes.
pub const SGR_RESET: u16 = 0;

/// Bold.
pub const SGR_BOLD: u16 = 1;

/// White/Gray foreground.
pub const SGR_FG_WHITE: u16 = 37;

/// Default background.
pub const SGR_BG_DEFAULT: u16 = 49;

// Control bytes delivered by the terminal in raw mode.

pub const CTRL_A: u8 = 0x01;
pub const CTRL_B: u8 = 0x02;
pub const CTRL_C: u8 = 0x03;
pub const CTRL_D: u8 = 0x04;
pub const CTRL_E: u8 = 0x05;
pub const CTRL_F: u8 = 0x06;
pub const CTRL_H: u8 = 0x08;
pub const TAB: u8 = 0x09;
pub const LINE_FEED: u8 = 0x0A;
pub const CTRL_K: u8 = 0x0B;
pub const CTRL_L: u8 = 0x0C;
pub const CARRIAGE_RETURN: u8 = 0x0D;
pub const CTRL_N: u8 = 0x0E;
pub const CTRL_P: u8 = 0x10;
pub const CTRL_T: u8 = 0x14;
pub const CTRL_U: u8 = 0x15;
pub const CTRL_W: u8 = 0x17;
pub const ESC: u8 = 0x1B;
pub const BACKSPACE: u8 = 0x7F;

/// Bell, written when there is nothing to complete.
pub const BELL: &[u8] = b"\x07";

/// Introducer of SS3 sequences (`ESC O`), used by some terminals for Home and End.
pub const SS3_INTRODUCER: u8 = b'O';

/// Introducer of CSI sequences (`ESC [`).
pub const CSI_INTRODUCER: u8 = b'[';

/// Final byte of `ESC [ <n> ~` editing key sequences.
pub const CSI_TILDE: u8 = b'~';

/// Upper bound for bytes consumed while absorbing an unknown CSI sequence.
pub const MAX_CSI_PARAM_BYTES: usize = 16;

// UTF-8 start byte ranges.

/// ASCII range maximum: single-byte UTF-8. Pattern: `0xxxxxxx`
pub const UTF8_1BYTE_MAX: u8 = 0b0111_1111;

/// Minimum first byte of a 2-byte sequence. Pattern: `110xxxxx`
pub const UTF8_2BYTE_MIN: u8 = 0b1100_0000;

/// Maximum first byte of a 2-byte sequence.
pub const UTF8_2BYTE_MAX: u8 = 0b1101_1111;

/// Minimum first byte of a 3-byte sequence. Pattern: `1110xxxx`
pub const UTF8_3BYTE_MIN: u8 = 0b1110_0000;

/// Maximum first byte of a 3-byte sequence.
pub const UTF8_3BYTE_MAX: u8 = 0b1110_1111;

/// Minimum first byte of a 4-byte sequence. Pattern: `11110xxx`
pub const UTF8_4BYTE_MIN: u8 = 0b1111_0000;

/// Maximum first byte of a 4-byte sequence.
pub const UTF8_4BYTE_MAX: u8 = 0b1111_0111;

/// Mask to check the continuation byte pattern.
pub const UTF8_CONTINUATION_MASK: u8 = 0b1100_0000;

/// Expected pattern for continuation bytes: `10xxxxxx`
pub const UTF8_CONTINUATION_PATTERN: u8 = 0b1000_0000;

/// Data bits of the first byte of a 2-byte sequence.
pub const UTF8_2BYTE_FIRST_MASK: u8 = 0b0001_1111;

/// Data bits of the first byte of a 3-byte sequence.
pub const UTF8_3BYTE_FIRST_MASK: u8 = 0b0000_1111;

/// Data bits of the first byte of a 4-byte sequence.
pub const UTF8_4BYTE_FIRST_MASK: u8 = 0b0000_0111;

/// Data bits of a continuation byte.
pub const UTF8_CONTINUATION_DATA_MASK: u8 = 0b0011_1111;
