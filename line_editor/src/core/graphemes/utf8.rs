// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte level UTF-8 helpers used while assembling keystrokes from the raw input stream.

use crate::{UTF8_1BYTE_MAX, UTF8_2BYTE_FIRST_MASK, UTF8_2BYTE_MAX, UTF8_2BYTE_MIN,
            UTF8_3BYTE_FIRST_MASK, UTF8_3BYTE_MAX, UTF8_3BYTE_MIN, UTF8_4BYTE_FIRST_MASK,
            UTF8_4BYTE_MAX, UTF8_4BYTE_MIN, UTF8_CONTINUATION_DATA_MASK,
            UTF8_CONTINUATION_MASK, UTF8_CONTINUATION_PATTERN};

/// Returns the length of the UTF-8 sequence that starts with `first_byte`. Continuation
/// bytes and invalid leading bytes report 1, so a decoder always makes progress.
#[must_use]
pub fn utf8_byte_len(first_byte: u8) -> usize {
    match first_byte {
        UTF8_2BYTE_MIN..=UTF8_2BYTE_MAX => 2,
        UTF8_3BYTE_MIN..=UTF8_3BYTE_MAX => 3,
        UTF8_4BYTE_MIN..=UTF8_4BYTE_MAX => 4,
        _ => 1,
    }
}

#[must_use]
pub fn is_utf8_continuation(byte: u8) -> bool {
    byte & UTF8_CONTINUATION_MASK == UTF8_CONTINUATION_PATTERN
}

/// Decodes the first codepoint in `bytes`. Returns the codepoint and the number of bytes
/// it used. Truncated or malformed sequences decode to [`char::REPLACEMENT_CHARACTER`]
/// and consume a single byte. Empty input returns `None`.
#[must_use]
pub fn utf8_decode(bytes: &[u8]) -> Option<(char, usize)> {
    let first = *bytes.first()?;
    let len = utf8_byte_len(first);

    if len == 1 {
        return Some(if first <= UTF8_1BYTE_MAX {
            (char::from(first), 1)
        } else {
            (char::REPLACEMENT_CHARACTER, 1)
        });
    }

    let Some(tail) = bytes.get(1..len) else {
        return Some((char::REPLACEMENT_CHARACTER, 1));
    };
    if !tail.iter().copied().all(is_utf8_continuation) {
        return Some((char::REPLACEMENT_CHARACTER, 1));
    }

    let lead_mask = match len {
        2 => UTF8_2BYTE_FIRST_MASK,
        3 => UTF8_3BYTE_FIRST_MASK,
        _ => UTF8_4BYTE_FIRST_MASK,
    };
    let codepoint = tail.iter().fold(u32::from(first & lead_mask), |acc, byte| {
        (acc << 6) | u32::from(byte & UTF8_CONTINUATION_DATA_MASK)
    });

    // Overlong encodings and surrogates are rejected here.
    match char::from_u32(codepoint) {
        Some(ch) if ch.len_utf8() == len => Some((ch, len)),
        _ => Some((char::REPLACEMENT_CHARACTER, 1)),
    }
}
