// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words winsize tcgetwinsize

use crate::{CSI_PARAM_SEPARATOR, CSI_START, CsiSequence, DSR_CURSOR_POSITION_REQUEST,
            DSR_CURSOR_POSITION_RESPONSE_END, ERASE_ALL, InputDevice, ReadOutcome,
            TerminalConfig, write_best_effort};
use std::{io::Write, time::Duration};

/// Width used when every way of asking the terminal fails.
pub const DEFAULT_COLUMNS: usize = 80;

/// How far right to push the cursor when probing the width. Terminals clamp it to the
/// last column.
pub const FAR_RIGHT_COLUMNS: usize = 999;

/// Upper bound on the size of a cursor position report.
const MAX_CURSOR_POSITION_RESPONSE_LEN: usize = 32;

/// How long to wait for each byte of a cursor position report.
const CURSOR_POSITION_RESPONSE_TIMEOUT: Duration = Duration::from_millis(100);

/// Get the terminal width in columns.
///
/// 1. [`TerminalConfig::fixed_columns`], if set.
/// 2. The OS, via [`InputDevice::query_columns`].
/// 3. A cursor position probe: ask where the cursor is, push it to the far right, ask
///    again, then move it back.
/// 4. [`DEFAULT_COLUMNS`].
pub fn get_columns(
    input: &mut dyn InputDevice,
    output: &mut dyn Write,
    config: &TerminalConfig,
) -> usize {
    if let Some(columns) = config.fixed_columns {
        return columns;
    }
    if let Some(columns) = input.query_columns() {
        return columns;
    }
    probe_columns(input, output).unwrap_or(DEFAULT_COLUMNS)
}

fn probe_columns(input: &mut dyn InputDevice, output: &mut dyn Write) -> Option<usize> {
    let start = query_cursor_column(input, output)?;

    write_best_effort!(
        output,
        CsiSequence::CursorForward(FAR_RIGHT_COLUMNS).to_string().as_bytes()
    );
    let columns = query_cursor_column(input, output)?;

    if columns > start {
        write_best_effort!(
            output,
            CsiSequence::CursorBackward(columns - start).to_string().as_bytes()
        );
    }

    tracing::debug!(message = "Probed terminal width", columns);
    Some(columns)
}

/// Ask the terminal for the cursor position and return its 1-based column.
fn query_cursor_column(
    input: &mut dyn InputDevice,
    output: &mut dyn Write,
) -> Option<usize> {
    let request = CsiSequence::DeviceStatusReport(DSR_CURSOR_POSITION_REQUEST).to_string();
    output.write_all(request.as_bytes()).ok()?;
    output.flush().ok()?;

    let mut response = Vec::with_capacity(MAX_CURSOR_POSITION_RESPONSE_LEN);
    while response.len() < MAX_CURSOR_POSITION_RESPONSE_LEN {
        match input.read_byte_with_timeout(CURSOR_POSITION_RESPONSE_TIMEOUT) {
            Ok(ReadOutcome::Byte(byte)) => {
                response.push(byte);
                if byte == DSR_CURSOR_POSITION_RESPONSE_END {
                    break;
                }
            }
            _ => return None,
        }
    }

    parse_cursor_position_response(&response).map(|(_row, col)| col)
}

/// Parse a cursor position report of the form `ESC [ rows ; cols R` into
/// `(rows, cols)`.
#[must_use]
pub fn parse_cursor_position_response(response: &[u8]) -> Option<(usize, usize)> {
    let text = std::str::from_utf8(response).ok()?;
    let body = text
        .strip_prefix(CSI_START)?
        .strip_suffix(char::from(DSR_CURSOR_POSITION_RESPONSE_END))?;
    let (rows, cols) = body.split_once(CSI_PARAM_SEPARATOR)?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// Move the cursor home and erase the whole screen.
pub fn clear_screen(output: &mut dyn Write) {
    let sequence = format!(
        "{}{}",
        CsiSequence::CursorHome,
        CsiSequence::EraseDisplay(ERASE_ALL)
    );
    write_best_effort!(output, sequence.as_bytes());
}
