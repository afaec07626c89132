//! Search — wrap-around literal find over the whole document text.
//!
//! The host keeps a [`SearchDescriptor`] (last needle, match-case flag,
//! direction) across repeated "find next" presses. Each press becomes a
//! [`SearchRequest`] carrying the current selection; [`SearchRequest::find`]
//! answers with the selection to apply, or `None` when the needle occurs
//! nowhere in the text. [`SearchRequest::locate`] also says whether the scan
//! wrapped to get there.
//!
//! Searches are literal substring matches. All offsets are char offsets.
//!
//! # Scan origin
//!
//! - Forward resumes right after the current selection
//!   (`start + len`), so repeating a find advances instead of re-finding the
//!   same hit. With no match before the end, the scan restarts at 0.
//! - Backward resumes right before the selection (`start - 1`, floored at 0)
//!   and takes the last match lying entirely at or before that origin. With
//!   none, it takes the last match in the whole text.
//!
//! # Case-insensitive matching
//!
//! Two chars are equal ignoring case when they're identical, or their full
//! lowercase mappings agree, or their full uppercase mappings agree. That
//! covers Greek final sigma, the Kelvin sign and capital sharp s without
//! consulting any locale. Comparison is char by char, so a match always spans
//! exactly as many chars as the needle.

use log::trace;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Search direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

impl SearchDirection {
    /// Effective direction of a find: forward only when the dialog says
    /// "down" and the request isn't a reversed ("find previous") one.
    #[must_use]
    pub const fn resolve(search_down: bool, reverse: bool) -> Self {
        if search_down && !reverse {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A selection in the host's text widget: start offset and length in chars.
/// A zero-length selection is a plain caret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub start: usize,
    pub len: usize,
}

impl Selection {
    /// Create a selection.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// A caret with nothing selected.
    #[inline]
    #[must_use]
    pub const fn caret(at: usize) -> Self {
        Self { start: at, len: 0 }
    }

    /// Offset just past the selection.
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// True when nothing is selected.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

// ---------------------------------------------------------------------------
// SearchDescriptor
// ---------------------------------------------------------------------------

/// What the user last searched for. Lives in the host, never in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchDescriptor {
    needle: String,
    match_case: bool,
    search_down: bool,
}

impl SearchDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(needle: impl Into<String>, match_case: bool, search_down: bool) -> Self {
        Self {
            needle: needle.into(),
            match_case,
            search_down,
        }
    }

    /// The remembered search string.
    #[inline]
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    #[inline]
    #[must_use]
    pub const fn match_case(&self) -> bool {
        self.match_case
    }

    #[inline]
    #[must_use]
    pub const fn search_down(&self) -> bool {
        self.search_down
    }

    /// The direction a plain "find next" goes.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> SearchDirection {
        SearchDirection::resolve(self.search_down, false)
    }

    pub fn set_needle(&mut self, needle: impl Into<String>) {
        self.needle = needle.into();
    }

    pub const fn set_match_case(&mut self, match_case: bool) {
        self.match_case = match_case;
    }

    pub const fn set_search_down(&mut self, search_down: bool) {
        self.search_down = search_down;
    }

    /// Whether the needle is empty. An empty needle never searches.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Build the request for one "find next" (or, with `reverse`, one
    /// "find previous") from the current selection.
    #[must_use]
    pub fn request(&self, selection: Selection, reverse: bool) -> SearchRequest {
        SearchRequest {
            needle: self.needle.clone(),
            match_case: self.match_case,
            search_down: self.search_down,
            reverse,
            selection,
        }
    }
}

impl Default for SearchDescriptor {
    fn default() -> Self {
        Self::new(String::new(), false, true)
    }
}

// ---------------------------------------------------------------------------
// SearchHit
// ---------------------------------------------------------------------------

/// A located match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchHit {
    /// The match, as the selection to apply.
    pub selection: Selection,
    /// True when nothing matched between the origin and the boundary in the
    /// search direction, so the scan restarted from the other end.
    pub wrapped: bool,
}

// ---------------------------------------------------------------------------
// SearchRequest
// ---------------------------------------------------------------------------

/// One find request submitted by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub needle: String,
    pub match_case: bool,
    pub search_down: bool,
    pub reverse: bool,
    pub selection: Selection,
}

impl SearchRequest {
    /// Run the request against `haystack`. Returns the match as the new
    /// selection (start, needle length).
    #[must_use]
    pub fn find(&self, haystack: &str) -> Option<Selection> {
        self.locate(haystack).map(|hit| hit.selection)
    }

    /// Like [`find`](Self::find), and also reports whether the scan wrapped.
    #[must_use]
    pub fn locate(&self, haystack: &str) -> Option<SearchHit> {
        let direction = SearchDirection::resolve(self.search_down, self.reverse);
        scan(haystack, &self.needle, self.selection, direction, self.match_case).map(
            |(start, wrapped)| SearchHit {
                selection: Selection::new(start, self.needle.chars().count()),
                wrapped,
            },
        )
    }
}

// ---------------------------------------------------------------------------
// Search functions
// ---------------------------------------------------------------------------

/// Find the next occurrence of `needle`, wrapping around.
///
/// Returns the char offset of the match, or `None` when either string is
/// empty or `needle` occurs nowhere in `haystack`.
#[must_use]
pub fn find_next(
    haystack: &str,
    needle: &str,
    selection_start: usize,
    selection_length: usize,
    search_down: bool,
    match_case: bool,
    reverse: bool,
) -> Option<usize> {
    let direction = SearchDirection::resolve(search_down, reverse);
    let selection = Selection::new(selection_start, selection_length);
    scan(haystack, needle, selection, direction, match_case).map(|(start, _)| start)
}

/// True when the selected span is itself a match for `needle`.
///
/// The selection's length must equal the needle's length before the text is
/// compared at all. Used by "Replace" to decide whether to replace the
/// selection or just find the next match.
#[must_use]
pub fn selection_matches(
    haystack: &str,
    selection_start: usize,
    selection_length: usize,
    needle: &str,
    match_case: bool,
) -> bool {
    if needle.is_empty() || selection_length != needle.chars().count() {
        return false;
    }
    let selected = haystack.chars().skip(selection_start).take(selection_length);
    let mut compared = 0;
    for (a, b) in selected.zip(needle.chars()) {
        if !chars_eq(a, b, match_case) {
            return false;
        }
        compared += 1;
    }
    // Fewer chars than requested means the selection ran past the end.
    compared == selection_length
}

/// All non-overlapping match offsets of `needle`, in document order.
#[must_use]
pub fn find_all(haystack: &str, needle: &str, match_case: bool) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }

    let hay: Vec<char> = haystack.chars().collect();
    let pat: Vec<char> = needle.chars().collect();
    let mut matches = Vec::new();
    let mut from = 0;

    while let Some(idx) = first_match_from(&hay, &pat, from, match_case) {
        matches.push(idx);
        from = idx + pat.len();
    }

    matches
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Match start plus whether the fallback pass from the far boundary found it.
fn scan(
    haystack: &str,
    needle: &str,
    selection: Selection,
    direction: SearchDirection,
    match_case: bool,
) -> Option<(usize, bool)> {
    if haystack.is_empty() || needle.is_empty() {
        return None;
    }

    let hay: Vec<char> = haystack.chars().collect();
    let pat: Vec<char> = needle.chars().collect();
    let last = hay.len() - 1;

    let found = match direction {
        SearchDirection::Forward => {
            let origin = selection.end();
            first_match_from(&hay, &pat, origin, match_case)
                .map(|at| (at, false))
                .or_else(|| first_match_from(&hay, &pat, 0, match_case).map(|at| (at, true)))
        }
        SearchDirection::Backward => {
            let origin = selection.start.saturating_sub(1).min(last);
            last_match_within(&hay, &pat, origin, match_case)
                .map(|at| (at, false))
                .or_else(|| last_match_within(&hay, &pat, last, match_case).map(|at| (at, true)))
        }
    };

    trace!("scan({needle:?}, {selection:?}, {direction:?}, case={match_case}) -> {found:?}");
    found
}

/// First match starting at or after `from`.
pub(crate) fn first_match_from(
    hay: &[char],
    pat: &[char],
    from: usize,
    match_case: bool,
) -> Option<usize> {
    if pat.is_empty() || pat.len() > hay.len() {
        return None;
    }
    let latest = hay.len() - pat.len();
    (from..=latest).find(|&at| matches_at(hay, pat, at, match_case))
}

/// Last match lying entirely within `hay[..=end]`.
fn last_match_within(hay: &[char], pat: &[char], end: usize, match_case: bool) -> Option<usize> {
    if pat.is_empty() || pat.len() > hay.len() || end + 1 < pat.len() {
        return None;
    }
    let latest = (end + 1 - pat.len()).min(hay.len() - pat.len());
    (0..=latest)
        .rev()
        .find(|&at| matches_at(hay, pat, at, match_case))
}

/// Whether `pat` occurs in `hay` starting at `at`. Caller guarantees it fits.
fn matches_at(hay: &[char], pat: &[char], at: usize, match_case: bool) -> bool {
    hay[at..at + pat.len()]
        .iter()
        .zip(pat)
        .all(|(&a, &b)| chars_eq(a, b, match_case))
}

/// Char equality under the requested comparison mode.
#[inline]
fn chars_eq(a: char, b: char, match_case: bool) -> bool {
    a == b || (!match_case && chars_eq_ignore_case(a, b))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(&b);
    }
    a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
