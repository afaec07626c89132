//! Caret positions — char offset ⇄ (line, column).
//!
//! The host tracks the caret as a single char offset into the whole text.
//! The status line wants `Ln L, Col C` and the go-to dialog wants the offset
//! of a line's first character; both conversions live here.
//!
//! All coordinates are **0-indexed** and columns count chars. The `Display`
//! impl converts to the 1-indexed form users see.
//!
//! A line break is `\r\n`, `\n`, or a lone `\r`. `\r\n` is a single break.

use std::fmt;
use std::iter;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A caret's line and column, both 0-indexed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// Line 0, column 0: the start of the text.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Number of lines in `text`. Empty text has one (empty) line, and a trailing
/// break starts one more.
#[must_use]
pub fn line_count(text: &str) -> usize {
    line_starts(text).count()
}

/// Char offset of the first character of 0-indexed `line`, or `None` past
/// the last line.
#[must_use]
pub fn line_start(text: &str, line: usize) -> Option<usize> {
    line_starts(text).nth(line)
}

/// The (line, col) of a caret offset. Offsets past the end clamp to the end.
#[must_use]
pub fn position_of(text: &str, caret: usize) -> Position {
    let caret = caret.min(text.chars().count());
    let mut pos = Position::ZERO;
    let mut start = 0;
    for (line, line_start) in line_starts(text).enumerate() {
        if line_start > caret {
            break;
        }
        pos.line = line;
        start = line_start;
    }
    pos.col = caret - start;
    pos
}

/// Caret offset for a 1-indexed go-to-line request, clamped to the lines that
/// exist (`0` and `1` both mean the first line).
#[must_use]
pub fn goto_line(text: &str, one_based: usize) -> usize {
    let total = line_count(text);
    let line = one_based.clamp(1, total) - 1;
    line_start(text, line).unwrap_or(0)
}

/// Char offsets at which each line begins. Always yields `0` first.
fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    let mut chars = text.chars().enumerate().peekable();
    let breaks = iter::from_fn(move || {
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '\n' => return Some(idx + 1),
                '\r' => {
                    return Some(if chars.next_if(|&(_, next)| next == '\n').is_some() {
                        idx + 2
                    } else {
                        idx + 1
                    });
                }
                _ => {}
            }
        }
        None
    });
    iter::once(0).chain(breaks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
