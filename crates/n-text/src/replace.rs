//! Replace — "Replace" and "Replace All" on top of the find engine.
//!
//! Replace-all makes a single left-to-right pass. Inserted replacement text
//! is never scanned again, so a pattern that occurs inside its own
//! replacement (`a` → `aa`) still terminates with one substitution per
//! original occurrence.

use log::debug;

use crate::search::{self, SearchDescriptor, Selection};

// ---------------------------------------------------------------------------
// Replace all
// ---------------------------------------------------------------------------

/// Replace every occurrence of `pattern` in `haystack` with `replacement`.
///
/// An empty `pattern` returns `haystack` unchanged.
#[must_use]
pub fn replace_all(haystack: &str, pattern: &str, replacement: &str, match_case: bool) -> String {
    replace_all_counted(haystack, pattern, replacement, match_case).0
}

/// [`replace_all`], also returning how many occurrences were replaced.
#[must_use]
pub fn replace_all_counted(
    haystack: &str,
    pattern: &str,
    replacement: &str,
    match_case: bool,
) -> (String, usize) {
    if pattern.is_empty() || haystack.is_empty() {
        return (haystack.to_string(), 0);
    }

    if match_case {
        // Exact matching has no folding ambiguity; std does it in one pass.
        let count = haystack.matches(pattern).count();
        return (haystack.replace(pattern, replacement), count);
    }

    let hay: Vec<char> = haystack.chars().collect();
    let pat: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    let mut count = 0;

    while let Some(idx) = search::first_match_from(&hay, &pat, cursor, false) {
        out.extend(&hay[cursor..idx]);
        out.push_str(replacement);
        cursor = idx + pat.len();
        count += 1;
    }
    out.extend(&hay[cursor..]);

    (out, count)
}

// ---------------------------------------------------------------------------
// ReplaceRequest
// ---------------------------------------------------------------------------

/// One replace request submitted by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceRequest {
    pub pattern: String,
    pub replacement: String,
    pub match_case: bool,
    pub search_down: bool,
    pub selection: Selection,
}

/// Result of "Replace All".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceAllOutcome {
    /// The whole new text.
    pub text: String,
    /// Number of occurrences replaced.
    pub replaced: usize,
    /// Where the caret goes: the old selection start, clamped to the new text.
    pub caret: usize,
}

/// Result of a single "Replace".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceOnceOutcome {
    /// The new text, if the selection was a match and got replaced.
    pub text: Option<String>,
    /// The next match to select, searched in the (possibly new) text.
    pub selection: Option<Selection>,
}

impl ReplaceRequest {
    /// Build a request from the host's remembered search state.
    #[must_use]
    pub fn from_descriptor(
        descriptor: &SearchDescriptor,
        replacement: impl Into<String>,
        selection: Selection,
    ) -> Self {
        Self {
            pattern: descriptor.needle().to_string(),
            replacement: replacement.into(),
            match_case: descriptor.match_case(),
            search_down: descriptor.search_down(),
            selection,
        }
    }

    /// "Replace All": substitute every occurrence in `haystack`.
    #[must_use]
    pub fn replace_all(&self, haystack: &str) -> ReplaceAllOutcome {
        let (text, replaced) =
            replace_all_counted(haystack, &self.pattern, &self.replacement, self.match_case);
        let caret = self.selection.start.min(text.chars().count());
        debug!("replace all {:?}: {replaced} replaced", self.pattern);
        ReplaceAllOutcome {
            text,
            replaced,
            caret,
        }
    }

    /// "Replace": if the current selection is a match, replace it, then find
    /// the next match from just after the inserted text. Otherwise behave as
    /// a plain find-next.
    #[must_use]
    pub fn replace_once(&self, haystack: &str) -> ReplaceOnceOutcome {
        if self.pattern.is_empty() {
            return ReplaceOnceOutcome {
                text: None,
                selection: None,
            };
        }

        let sel = self.selection;
        let (text, from) = if self.selection_is_match(haystack) {
            let mut replaced = String::with_capacity(haystack.len() + self.replacement.len());
            replaced.extend(haystack.chars().take(sel.start));
            replaced.push_str(&self.replacement);
            replaced.extend(haystack.chars().skip(sel.end()));
            let caret = sel.start + self.replacement.chars().count();
            (Some(replaced), Selection::caret(caret))
        } else {
            (None, sel)
        };

        let current = text.as_deref().unwrap_or(haystack);
        let selection = search::find_next(
            current,
            &self.pattern,
            from.start,
            from.len,
            self.search_down,
            self.match_case,
            false,
        )
        .map(|start| Selection::new(start, self.pattern.chars().count()));

        ReplaceOnceOutcome { text, selection }
    }

    /// Whether the request would replace the current selection.
    #[must_use]
    pub fn selection_is_match(&self, haystack: &str) -> bool {
        search::selection_matches(
            haystack,
            self.selection.start,
            self.selection.len,
            &self.pattern,
            self.match_case,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
