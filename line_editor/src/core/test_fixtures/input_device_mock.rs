// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InputDevice, ReadOutcome, StdMutex};
use std::{collections::VecDeque, io, sync::Arc, time::Duration};

/// Scripted [`InputDevice`]. Bytes are handed out in order; once drained, every read
/// returns `when_drained` ([`ReadOutcome::Eof`] by default, or
/// [`ReadOutcome::NotReady`] to model a non blocking stream that is waiting for more).
///
/// Clones share the same queue, so a test can keep one clone and
/// [push](Self::push_bytes) more input after handing the other to a session.
#[derive(Clone, Debug)]
pub struct InputDeviceMock {
    pub bytes: Arc<StdMutex<VecDeque<u8>>>,
    pub when_drained: ReadOutcome,
    pub is_terminal: bool,
    pub columns: Option<usize>,
}

impl InputDeviceMock {
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: Arc::new(StdMutex::new(bytes.iter().copied().collect())),
            when_drained: ReadOutcome::Eof,
            is_terminal: false,
            columns: None,
        }
    }

    /// A non blocking stream: reads report [`ReadOutcome::NotReady`] once drained.
    #[must_use]
    pub fn new_non_blocking(bytes: &[u8]) -> Self {
        Self {
            when_drained: ReadOutcome::NotReady,
            ..Self::new(bytes)
        }
    }

    #[allow(clippy::missing_panics_doc)]
    pub fn push_bytes(&self, bytes: &[u8]) {
        self.bytes.lock().unwrap().extend(bytes.iter().copied());
    }

    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn remaining(&self) -> usize { self.bytes.lock().unwrap().len() }
}

impl InputDevice for InputDeviceMock {
    fn read_byte(&mut self) -> io::Result<ReadOutcome> {
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| io::Error::other("input mock lock poisoned"))?;
        Ok(bytes.pop_front().map_or(self.when_drained, ReadOutcome::Byte))
    }

    fn read_byte_with_timeout(&mut self, _timeout: Duration) -> io::Result<ReadOutcome> {
        match self.read_byte()? {
            ReadOutcome::Byte(byte) => Ok(ReadOutcome::Byte(byte)),
            // A timed read on a drained stream always times out.
            ReadOutcome::NotReady | ReadOutcome::Eof => Ok(ReadOutcome::NotReady),
        }
    }

    fn is_terminal(&self) -> bool { self.is_terminal }

    fn query_columns(&self) -> Option<usize> { self.columns }
}
