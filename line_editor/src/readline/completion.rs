// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tab completion and inline hints. Both are capability traits so that a static word
//! list, a path completer, or something language aware can be plugged in without the
//! editor knowing about it. Plain closures implement both traits.

use crate::{CsiSequence, SGR_BG_DEFAULT, SGR_BOLD, SGR_FG_WHITE, SGR_RESET};

/// Candidates collected by a [`Completer`] for one press of `Tab`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Completions {
    candidates: Vec<String>,
}

impl Completions {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Register a candidate. Returns `false` if memory for it could not be reserved, in
    /// which case the candidate set is unchanged.
    pub fn add(&mut self, candidate: impl AsRef<str>) -> bool {
        let candidate = candidate.as_ref();
        let mut owned = String::new();
        if owned.try_reserve_exact(candidate.len()).is_err()
            || self.candidates.try_reserve(1).is_err()
        {
            return false;
        }
        owned.push_str(candidate);
        self.candidates.push(owned);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize { self.candidates.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.candidates.is_empty() }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(String::as_str)
    }
}

/// Produces completion candidates for the current line.
pub trait Completer {
    fn complete(&self, line: &str, completions: &mut Completions);
}

impl<F> Completer for F
where
    F: Fn(&str, &mut Completions),
{
    fn complete(&self, line: &str, completions: &mut Completions) { self(line, completions); }
}

/// Text shown to the right of the cursor, without becoming part of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub text: String,
    /// ANSI foreground color code, eg 35 for magenta.
    pub color: Option<u8>,
    pub bold: bool,
}

impl Hint {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: u8) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// SGR sequences that wrap the hint text, if it is styled at all. Bold without a
    /// color is drawn in white.
    #[must_use]
    pub fn style_sequences(&self) -> Option<(String, String)> {
        let color = match (self.color, self.bold) {
            (None, false) => return None,
            (None, true) => SGR_FG_WHITE,
            (Some(color), _) => u16::from(color),
        };
        let weight = if self.bold { SGR_BOLD } else { SGR_RESET };
        let start = CsiSequence::SelectGraphicRendition(weight, color, SGR_BG_DEFAULT);
        let end = CsiSequence::SelectGraphicRenditionSingle(SGR_RESET);
        Some((start.to_string(), end.to_string()))
    }
}

/// Produces a [`Hint`] for the current line, after every refresh.
pub trait Hinter {
    fn hint(&self, line: &str) -> Option<Hint>;

    /// Called with each hint once it has been drawn. Override this if hints are pooled
    /// or otherwise need to be handed back.
    fn release_hint(&self, hint: Hint) { drop(hint); }
}

impl<F> Hinter for F
where
    F: Fn(&str) -> Option<Hint>,
{
    fn hint(&self, line: &str) -> Option<Hint> { self(line) }
}

/// Where a completion cycle is. The index runs over the candidates and then one past
/// the end, which shows the original line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompletionState {
    pub index: Option<usize>,
}

impl CompletionState {
    #[must_use]
    pub fn is_active(&self) -> bool { self.index.is_some() }

    /// Handle `Tab` with `len` candidates available. Returns the new index and whether
    /// the bell should ring because the cycle wrapped back to the original line.
    pub fn advance(&mut self, len: usize) -> (usize, bool) {
        let next = match self.index {
            None => 0,
            Some(index) => (index + 1) % (len + 1),
        };
        self.index = Some(next);
        (next, next == len)
    }

    pub fn reset(&mut self) { self.index = None; }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_closure_completer() {
        let completer = |line: &str, completions: &mut Completions| {
            if line.starts_with('h') {
                completions.add("hello");
                completions.add(String::from("hello there"));
            }
        };
        let mut completions = Completions::new();
        completer.complete("h", &mut completions);
        assert_eq!(completions.iter().collect::<Vec<_>>(), vec!["hello", "hello there"]);

        let mut completions = Completions::new();
        completer.complete("x", &mut completions);
        assert!(completions.is_empty());
    }

    #[test]
    fn test_closure_hinter() {
        let hinter = |line: &str| (line == "git").then(|| Hint::new(" commit").with_color(35));
        assert_eq!(
            hinter.hint("git"),
            Some(Hint {
                text: " commit".into(),
                color: Some(35),
                bold: false
            })
        );
        assert_eq!(hinter.hint("ls"), None);
    }

    #[test]
    fn test_hint_style_sequences() {
        assert_eq!(Hint::new("x").style_sequences(), None);
        assert_eq!(
            Hint::new("x").with_bold(true).style_sequences(),
            Some(("\x1b[1;37;49m".into(), "\x1b[0m".into()))
        );
        assert_eq!(
            Hint::new("x").with_color(35).style_sequences(),
            Some(("\x1b[0;35;49m".into(), "\x1b[0m".into()))
        );
    }

    #[test]
    fn test_completion_state_cycles() {
        let mut state = CompletionState::default();
        assert!(!state.is_active());
        assert_eq!(state.advance(2), (0, false));
        assert_eq!(state.advance(2), (1, false));
        assert_eq!(state.advance(2), (2, true));
        assert_eq!(state.advance(2), (0, false));
        state.reset();
        assert!(!state.is_active());
    }
}
