// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io, time::Duration};

/// Result of a single byte read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Byte(u8),
    /// Nothing available right now: the timeout expired, or a non blocking read would
    /// have blocked.
    NotReady,
    /// The input stream is closed.
    Eof,
}

/// A source of raw terminal bytes. The line editor only ever reads one byte at a time;
/// escape sequences are disambiguated with [`InputDevice::read_byte_with_timeout`].
///
/// See [`crate::InputDeviceMock`] for a scripted implementation used in tests.
pub trait InputDevice {
    /// Read one byte, blocking if the underlying stream is blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn read_byte(&mut self) -> io::Result<ReadOutcome>;

    /// Read one byte, waiting at most `timeout` for it to arrive.
    ///
    /// # Errors
    ///
    /// Returns an error if polling or reading fails.
    fn read_byte_with_timeout(&mut self, timeout: Duration) -> io::Result<ReadOutcome>;

    /// Whether this device is an interactive terminal.
    fn is_terminal(&self) -> bool;

    /// Width of the terminal in columns, if the OS can tell.
    fn query_columns(&self) -> Option<usize> { None }
}

/// [`InputDevice`] backed by the process' stdin file descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinInputDevice;

impl StdinInputDevice {
    #[must_use]
    pub fn new() -> Self { Self }
}

#[cfg(unix)]
impl InputDevice for StdinInputDevice {
    fn read_byte(&mut self) -> io::Result<ReadOutcome> {
        use rustix::io::Errno;

        let mut buf = [0_u8; 1];
        loop {
            match rustix::io::read(rustix::stdio::stdin(), &mut buf) {
                Ok(0) => return Ok(ReadOutcome::Eof),
                Ok(_) => return Ok(ReadOutcome::Byte(buf[0])),
                Err(Errno::INTR) => {}
                Err(Errno::AGAIN) => return Ok(ReadOutcome::NotReady),
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn read_byte_with_timeout(&mut self, timeout: Duration) -> io::Result<ReadOutcome> {
        use rustix::event::{PollFd, PollFlags, Timespec, poll};

        let timespec = Timespec::try_from(timeout)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "bad timeout"))?;
        let stdin = rustix::stdio::stdin();
        let mut fds = [PollFd::new(&stdin, PollFlags::IN)];

        let ready = loop {
            match poll(&mut fds, Some(&timespec)) {
                Ok(it) => break it,
                Err(rustix::io::Errno::INTR) => {}
                Err(err) => return Err(err.into()),
            }
        };

        if ready == 0 {
            return Ok(ReadOutcome::NotReady);
        }
        self.read_byte()
    }

    fn is_terminal(&self) -> bool { rustix::termios::isatty(rustix::stdio::stdin()) }

    fn query_columns(&self) -> Option<usize> {
        rustix::termios::tcgetwinsize(rustix::stdio::stdout())
            .ok()
            .map(|winsize| usize::from(winsize.ws_col))
            .filter(|&cols| cols > 0)
    }
}

#[cfg(not(unix))]
impl InputDevice for StdinInputDevice {
    fn read_byte(&mut self) -> io::Result<ReadOutcome> {
        use std::io::Read;

        let mut buf = [0_u8; 1];
        match io::stdin().read(&mut buf)? {
            0 => Ok(ReadOutcome::Eof),
            _ => Ok(ReadOutcome::Byte(buf[0])),
        }
    }

    fn read_byte_with_timeout(&mut self, _timeout: Duration) -> io::Result<ReadOutcome> {
        self.read_byte()
    }

    fn is_terminal(&self) -> bool {
        use std::io::IsTerminal;
        io::stdin().is_terminal()
    }
}
