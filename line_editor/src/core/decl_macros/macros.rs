// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Simple macro to create a [`Result`] with an [`Ok`] variant. It is just syntactic sugar
/// that helps having to write `Ok(())`.
/// - If no arg is passed in then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Write bytes to a terminal and flush. Errors are logged and then dropped, since the
/// next refresh repaints the whole line.
#[macro_export]
macro_rules! write_best_effort {
    ($writer:expr, $bytes:expr) => {{
        let writer = &mut *$writer;
        if let Err(err) = ::std::io::Write::write_all(&mut *writer, $bytes)
            .and_then(|()| ::std::io::Write::flush(writer))
        {
            ::tracing::warn!(message = "Dropped terminal write", error = ?err);
        }
    }};
}
