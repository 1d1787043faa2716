// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ReadlineError, ok};
use std::{collections::VecDeque,
          fs::{File, OpenOptions},
          io::{BufRead, BufReader, BufWriter, Write},
          path::Path};

/// Default maximum number of entries kept in [`History`].
pub const DEFAULT_HISTORY_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum HistoryDirection {
    /// Towards older entries (Up, `Ctrl+P`).
    Prev,
    /// Towards newer entries (Down, `Ctrl+N`).
    Next,
}

/// Bounded FIFO of previously entered lines, oldest first.
///
/// - Adding a line identical to the newest entry is a no-op.
/// - When full, the oldest entry is evicted to make room.
///
/// While a [`crate::Session`] is active, the newest slot is a *live slot* that mirrors
/// the line being edited, so that browsing away from an in-progress edit and back again
/// doesn't lose it. The live slot is removed when the session ends.
///
/// The file format is one entry per line. Entries that contain `\n` or `\r` can't be
/// round tripped: on load they are cut at the first line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    max_len: usize,
    has_live_slot: bool,
}

impl Default for History {
    fn default() -> Self { Self::new() }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            max_len: DEFAULT_HISTORY_MAX_LEN,
            has_live_slot: false,
        }
    }

    /// # Errors
    ///
    /// Returns [`ReadlineError::InvalidHistoryLength`] if `max_len` is 0.
    pub fn with_max_len(max_len: usize) -> Result<Self, ReadlineError> {
        let mut it = Self::new();
        it.set_max_len(max_len)?;
        Ok(it)
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn max_len(&self) -> usize { self.max_len }

    /// Entry at `index`, where 0 is the oldest.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(String::as_str) }

    /// Append `line`. Returns `false` if it was not added: it duplicates the newest
    /// entry, or memory for it could not be reserved.
    pub fn add(&mut self, line: &str) -> bool {
        if self.max_len == 0 {
            return false;
        }
        if self.entries.back().is_some_and(|last| last == line) {
            return false;
        }

        let mut owned = String::new();
        if owned.try_reserve_exact(line.len()).is_err() {
            return false;
        }
        owned.push_str(line);

        if self.entries.len() >= self.max_len {
            self.entries.pop_front();
        } else if self.entries.try_reserve(1).is_err() {
            return false;
        }
        self.entries.push_back(owned);
        true
    }

    /// Change the maximum length. If there are more entries than that, the oldest ones
    /// are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::InvalidHistoryLength`] if `max_len` is 0.
    pub fn set_max_len(&mut self, max_len: usize) -> Result<(), ReadlineError> {
        if max_len < 1 {
            return Err(ReadlineError::InvalidHistoryLength(max_len));
        }
        while self.entries.len() > max_len {
            self.entries.pop_front();
        }
        self.entries.shrink_to(max_len);
        self.max_len = max_len;
        ok!()
    }

    /// Write every entry to `path`, one per line. On Unix the file is only readable by
    /// its owner.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::IO`] if the file can't be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReadlineError> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options.open(path.as_ref())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        let mut writer = BufWriter::new(file);
        for entry in &self.entries {
            writer.write_all(entry.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        tracing::debug!(
            message = "History saved",
            path = %path.as_ref().display(),
            entries = self.entries.len()
        );
        ok!()
    }

    /// Read `path` and [`add`](Self::add) each line, so deduplication and the maximum
    /// length apply exactly as they do at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::IO`] if the file can't be opened or read.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), ReadlineError> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);
        let mut raw_line = Vec::new();

        loop {
            raw_line.clear();
            if reader.read_until(b'\n', &mut raw_line)? == 0 {
                break;
            }
            let end = raw_line
                .iter()
                .position(|&byte| byte == b'\r' || byte == b'\n')
                .unwrap_or(raw_line.len());
            self.add(&String::from_utf8_lossy(&raw_line[..end]));
        }

        tracing::debug!(
            message = "History loaded",
            path = %path.as_ref().display(),
            entries = self.entries.len()
        );
        ok!()
    }
}

/// Support for the live slot of an active session.
impl History {
    pub(crate) fn begin_live_slot(&mut self) {
        if self.has_live_slot {
            return;
        }
        if self.entries.len() >= self.max_len {
            self.entries.pop_front();
        }
        self.entries.push_back(String::new());
        self.has_live_slot = true;
    }

    pub(crate) fn end_live_slot(&mut self) {
        if self.has_live_slot {
            self.entries.pop_back();
            self.has_live_slot = false;
        }
    }

    /// Move the browse `index` (0 is the live slot, growing towards older entries) one
    /// step in `direction`. The slot being left is first overwritten with `current`, so
    /// an edit made to a recalled entry is still there when the user comes back to it.
    ///
    /// Returns the entry to load into the buffer, or `None` if there is nothing to
    /// browse or the index is already at that end.
    pub(crate) fn navigate(
        &mut self,
        index: &mut usize,
        current: &str,
        direction: HistoryDirection,
    ) -> Option<&str> {
        let len = self.entries.len();
        if len <= 1 {
            return None;
        }

        if let Some(slot) = self.entries.get_mut(len - 1 - (*index).min(len - 1)) {
            slot.clear();
            slot.push_str(current);
        }

        let next_index = match direction {
            HistoryDirection::Prev => *index + 1,
            HistoryDirection::Next => index.checked_sub(1)?,
        };
        if next_index >= len {
            *index = len - 1;
            return None;
        }

        *index = next_index;
        self.get(len - 1 - next_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(history: &History) -> Vec<&str> { history.iter().collect() }

    #[test]
    fn test_add_dedups_consecutive() {
        let mut history = History::new();
        assert!(history.add("ls"));
        assert!(!history.add("ls"));
        assert!(history.add("pwd"));
        assert!(history.add("ls"));
        assert_eq!(entries(&history), vec!["ls", "pwd", "ls"]);
    }

    #[test]
    fn test_add_evicts_oldest() {
        let mut history = History::with_max_len(3).unwrap();
        for line in ["1", "2", "3", "4"] {
            history.add(line);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(entries(&history), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_set_max_len() {
        let mut history = History::new();
        for line in ["a", "b", "c", "d"] {
            history.add(line);
        }
        history.set_max_len(2).unwrap();
        assert_eq!(entries(&history), vec!["c", "d"]);
        assert_eq!(history.max_len(), 2);

        assert!(matches!(
            history.set_max_len(0),
            Err(ReadlineError::InvalidHistoryLength(0))
        ));
        assert_eq!(history.max_len(), 2);
        assert!(History::with_max_len(0).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");

        let mut history = History::new();
        for line in ["first", "second 🙏🏽", "third"] {
            history.add(line);
        }
        history.save(&path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "first\nsecond 🙏🏽\nthird\n"
        );

        let mut loaded = History::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded, history);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        History::new().save(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_splits_at_first_terminator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        std::fs::write(&path, "one\r\ntwo\rjunk\nthree\nthree\nfour").unwrap();

        let mut history = History::new();
        history.load(&path).unwrap();
        assert_eq!(entries(&history), vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = History::new();
        assert!(matches!(
            history.load(dir.path().join("nope")),
            Err(ReadlineError::IO(_))
        ));
    }

    #[test]
    fn test_live_slot_and_navigation() {
        let mut history = History::new();
        history.add("old");
        history.add("new");

        history.begin_live_slot();
        assert_eq!(entries(&history), vec!["old", "new", ""]);

        let mut index = 0;
        assert_eq!(
            history.navigate(&mut index, "typed", HistoryDirection::Prev),
            Some("new")
        );
        assert_eq!(
            history.navigate(&mut index, "new!", HistoryDirection::Prev),
            Some("old")
        );
        // Clamped at the oldest entry.
        assert_eq!(history.navigate(&mut index, "old", HistoryDirection::Prev), None);
        assert_eq!(index, 2);

        assert_eq!(
            history.navigate(&mut index, "old", HistoryDirection::Next),
            Some("new!")
        );
        assert_eq!(
            history.navigate(&mut index, "new!", HistoryDirection::Next),
            Some("typed")
        );
        // Clamped at the live slot.
        assert_eq!(history.navigate(&mut index, "typed", HistoryDirection::Next), None);
        assert_eq!(index, 0);

        history.end_live_slot();
        assert_eq!(entries(&history), vec!["old", "new!"]);
    }

    #[test]
    fn test_navigation_needs_two_entries() {
        let mut history = History::new();
        history.begin_live_slot();
        let mut index = 0;
        assert_eq!(history.navigate(&mut index, "x", HistoryDirection::Prev), None);
        history.end_live_slot();
        assert!(history.is_empty());
    }

    #[test]
    fn test_live_slot_does_not_dedup_against_empty_entry() {
        let mut history = History::new();
        history.add("");
        history.begin_live_slot();
        history.end_live_slot();
        assert_eq!(entries(&history), vec![""]);
    }
}
