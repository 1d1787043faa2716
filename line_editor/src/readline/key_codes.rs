// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Diagnostic mode that shows the raw bytes each key sends. Handy when a terminal emits
//! an escape sequence the editor doesn't recognize.

use crate::{InputDevice, RawModeGuard, ReadOutcome, ReadlineError, TerminalConfig,
            ok, write_best_effort};
use std::io::Write;

/// Typing this word ends [`print_key_codes`].
pub const KEY_CODES_QUIT_WORD: &[u8; 4] = b"quit";

const KEY_CODES_BANNER: &str = "Line editor key codes debugging mode.\n\
                                Press keys to see scan codes. Type 'quit' at any time to \
                                exit.\n";

/// Put the terminal in raw mode and print one line per byte read, eg
/// `'a' 61 (97) (type quit to exit)`, until `quit` is typed or input ends.
///
/// # Errors
///
/// - [`ReadlineError::NotATty`] if `input` is not a terminal and
///   [`TerminalConfig::assume_tty`] is off.
/// - [`ReadlineError::RawMode`] if raw mode can't be enabled.
/// - [`ReadlineError::IO`] if reading fails.
pub fn print_key_codes(
    input: &mut dyn InputDevice,
    output: &mut dyn Write,
    terminal_config: &TerminalConfig,
) -> Result<(), ReadlineError> {
    if !input.is_terminal() && !terminal_config.assume_tty {
        return Err(ReadlineError::NotATty);
    }

    write_best_effort!(output, KEY_CODES_BANNER.as_bytes());

    let _raw_mode = if terminal_config.assume_tty {
        None
    } else {
        Some(
            RawModeGuard::new()
                .map_err(|err| ReadlineError::RawMode { reason: err.to_string() })?,
        )
    };

    let mut last_four = [b' '; 4];
    loop {
        let byte = match input.read_byte()? {
            ReadOutcome::Byte(byte) => byte,
            ReadOutcome::NotReady => continue,
            ReadOutcome::Eof => break,
        };

        last_four.rotate_left(1);
        last_four[3] = byte;
        if &last_four == KEY_CODES_QUIT_WORD {
            break;
        }

        let printable = if byte.is_ascii_graphic() || byte == b' ' {
            char::from(byte)
        } else {
            '?'
        };
        let line = format!("'{printable}' {byte:02x} ({byte}) (type quit to exit)\n\r");
        write_best_effort!(output, line.as_bytes());
    }

    ok!()
}
