// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words smallvec

//! Turns raw terminal bytes into [`Key`]s.
//!
//! | Input                               | Key                         |
//! |-------------------------------------|-----------------------------|
//! | `Enter` (CR), `Ctrl+J` (LF)         | [`Key::Enter`]              |
//! | `Ctrl+A`, `ESC [ H`, `ESC O H`      | [`Key::Home`]               |
//! | `Ctrl+E`, `ESC [ F`, `ESC O F`      | [`Key::End`]                |
//! | `Ctrl+B`, `ESC [ D`                 | [`Key::Left`]               |
//! | `Ctrl+F`, `ESC [ C`                 | [`Key::Right`]              |
//! | `Ctrl+P`, `ESC [ A`                 | [`Key::Up`]                 |
//! | `Ctrl+N`, `ESC [ B`                 | [`Key::Down`]               |
//! | `Ctrl+H`, `DEL`                     | [`Key::Backspace`]          |
//! | `ESC [ 3 ~`                         | [`Key::Delete`]             |
//! | `Ctrl+C`, `Ctrl+D`, `Ctrl+K`, ...   | one variant each            |
//! | `ESC` followed by nothing           | [`Key::Escape`]             |
//!
//! Any other escape sequence, including ones with modifier parameters such as
//! `ESC [ 1 ; 5 C`, is consumed whole and decodes to [`Key::Ignored`].

use crate::{BACKSPACE, CARRIAGE_RETURN, CSI_INTRODUCER, CSI_TILDE, CTRL_A, CTRL_B, CTRL_C,
            CTRL_D, CTRL_E, CTRL_F, CTRL_H, CTRL_K, CTRL_L, CTRL_N, CTRL_P, CTRL_T,
            CTRL_U, CTRL_W, CUB_CURSOR_BACKWARD, CUD_CURSOR_DOWN, CUF_CURSOR_FORWARD,
            CUU_CURSOR_UP, ESC, InputDevice, LINE_FEED, MAX_CSI_PARAM_BYTES, ReadOutcome,
            SS3_INTRODUCER, TAB, is_utf8_continuation, utf8_byte_len, utf8_decode};
use smallvec::SmallVec;
use std::{io, ops::RangeInclusive, time::Duration};

/// Bytes that end a CSI sequence.
const CSI_FINAL_BYTES: RangeInclusive<u8> = 0x40..=0x7E;

/// Final byte of `ESC [ F` and `ESC O F` (End).
const END_FINAL_BYTE: u8 = b'F';

/// Final byte of `ESC [ H` and `ESC O H` (Home).
const HOME_FINAL_BYTE: u8 = b'H';

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Key {
    /// A printable codepoint to insert.
    Char(char),
    Enter,
    /// `Ctrl+C`.
    Interrupt,
    /// `Ctrl+D`: delete under the cursor, or end of input on an empty line.
    DeleteOrEof,
    Backspace,
    Delete,
    /// `Ctrl+T`.
    Transpose,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    /// `Ctrl+U`.
    KillLine,
    /// `Ctrl+K`.
    KillToEnd,
    /// `Ctrl+L`.
    ClearScreen,
    /// `Ctrl+W`.
    DeletePrevWord,
    Tab,
    /// A bare `Escape` press.
    Escape,
    /// Unbound control byte or unrecognized escape sequence.
    Ignored,
}

/// What one call to [`KeyDecoder::read_key`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Key(Key),
    /// No complete key is available yet. Partial UTF-8 input is kept for the next call.
    NotReady,
    Eof,
}

/// Assembles keys from an [`InputDevice`], one key per call.
///
/// A multi byte UTF-8 codepoint may arrive across several calls when the device is non
/// blocking, so the decoder holds the bytes it has seen so far. Escape sequences are
/// read in one go, waiting at most `escape_timeout` for each byte after `ESC`.
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    escape_timeout: Duration,
    pending_utf8: SmallVec<[u8; 4]>,
    /// A byte that interrupted a UTF-8 sequence, decoded on the next call.
    stashed: Option<u8>,
}

impl KeyDecoder {
    #[must_use]
    pub fn new(escape_timeout: Duration) -> Self {
        Self {
            escape_timeout,
            pending_utf8: SmallVec::new(),
            stashed: None,
        }
    }

    /// Read the next key.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the device fails.
    pub fn read_key(&mut self, input: &mut dyn InputDevice) -> io::Result<KeyOutcome> {
        loop {
            let byte = match self.stashed.take() {
                Some(byte) => byte,
                None => match input.read_byte()? {
                    ReadOutcome::Byte(byte) => byte,
                    ReadOutcome::NotReady => return Ok(KeyOutcome::NotReady),
                    ReadOutcome::Eof if self.pending_utf8.is_empty() => {
                        return Ok(KeyOutcome::Eof);
                    }
                    ReadOutcome::Eof => {
                        self.pending_utf8.clear();
                        return Ok(KeyOutcome::Key(Key::Char(char::REPLACEMENT_CHARACTER)));
                    }
                },
            };

            if !self.pending_utf8.is_empty() {
                if !is_utf8_continuation(byte) {
                    self.pending_utf8.clear();
                    self.stashed = Some(byte);
                    return Ok(KeyOutcome::Key(Key::Char(char::REPLACEMENT_CHARACTER)));
                }
                self.pending_utf8.push(byte);
                if let Some(key) = self.take_complete_utf8() {
                    return Ok(KeyOutcome::Key(key));
                }
                continue;
            }

            let key = match byte {
                ESC => self.read_escape_sequence(input)?,
                byte if byte.is_ascii() => decode_ascii(byte),
                byte if utf8_byte_len(byte) == 1 => Key::Char(char::REPLACEMENT_CHARACTER),
                byte => {
                    self.pending_utf8.push(byte);
                    continue;
                }
            };
            tracing::trace!(message = "Decoded key", %key);
            return Ok(KeyOutcome::Key(key));
        }
    }

    fn take_complete_utf8(&mut self) -> Option<Key> {
        if self.pending_utf8.len() < utf8_byte_len(self.pending_utf8[0]) {
            return None;
        }
        let ch = utf8_decode(&self.pending_utf8).map_or(char::REPLACEMENT_CHARACTER, |it| it.0);
        self.pending_utf8.clear();
        Some(Key::Char(ch))
    }

    /// Called after `ESC`. A timeout before the next byte means a bare `Escape`.
    fn read_escape_sequence(&mut self, input: &mut dyn InputDevice) -> io::Result<Key> {
        let Some(first) = self.read_timed(input)? else {
            return Ok(Key::Escape);
        };
        let Some(second) = self.read_timed(input)? else {
            return Ok(Key::Ignored);
        };

        let key = match (first, second) {
            (CSI_INTRODUCER, digit) if digit.is_ascii_digit() => {
                return self.read_csi_with_params(input, digit);
            }
            (CSI_INTRODUCER, byte) => match char::from(byte) {
                CUU_CURSOR_UP => Key::Up,
                CUD_CURSOR_DOWN => Key::Down,
                CUF_CURSOR_FORWARD => Key::Right,
                CUB_CURSOR_BACKWARD => Key::Left,
                _ if byte == HOME_FINAL_BYTE => Key::Home,
                _ if byte == END_FINAL_BYTE => Key::End,
                _ => Key::Ignored,
            },
            (SS3_INTRODUCER, HOME_FINAL_BYTE) => Key::Home,
            (SS3_INTRODUCER, END_FINAL_BYTE) => Key::End,
            _ => Key::Ignored,
        };
        Ok(key)
    }

    /// Consume `ESC [ <params> <final>`, where the first parameter byte has already
    /// been read.
    fn read_csi_with_params(
        &mut self,
        input: &mut dyn InputDevice,
        first_param: u8,
    ) -> io::Result<Key> {
        let mut params: SmallVec<[u8; MAX_CSI_PARAM_BYTES]> = SmallVec::new();
        params.push(first_param);

        let final_byte = loop {
            let Some(byte) = self.read_timed(input)? else {
                return Ok(Key::Ignored);
            };
            if CSI_FINAL_BYTES.contains(&byte) {
                break byte;
            }
            if params.len() >= MAX_CSI_PARAM_BYTES {
                return Ok(Key::Ignored);
            }
            params.push(byte);
        };

        if final_byte != CSI_TILDE {
            return Ok(Key::Ignored);
        }
        Ok(match params.as_slice() {
            b"3" => Key::Delete,
            b"1" | b"7" => Key::Home,
            b"4" | b"8" => Key::End,
            _ => Key::Ignored,
        })
    }

    fn read_timed(&mut self, input: &mut dyn InputDevice) -> io::Result<Option<u8>> {
        Ok(match input.read_byte_with_timeout(self.escape_timeout)? {
            ReadOutcome::Byte(byte) => Some(byte),
            ReadOutcome::NotReady | ReadOutcome::Eof => None,
        })
    }
}

fn decode_ascii(byte: u8) -> Key {
    match byte {
        CARRIAGE_RETURN | LINE_FEED => Key::Enter,
        CTRL_A => Key::Home,
        CTRL_B => Key::Left,
        CTRL_C => Key::Interrupt,
        CTRL_D => Key::DeleteOrEof,
        CTRL_E => Key::End,
        CTRL_F => Key::Right,
        CTRL_H | BACKSPACE => Key::Backspace,
        TAB => Key::Tab,
        CTRL_K => Key::KillToEnd,
        CTRL_L => Key::ClearScreen,
        CTRL_N => Key::Down,
        CTRL_P => Key::Up,
        CTRL_T => Key::Transpose,
        CTRL_U => Key::KillLine,
        CTRL_W => Key::DeletePrevWord,
        byte if byte.is_ascii_control() => Key::Ignored,
        byte => Key::Char(char::from(byte)),
    }
}
