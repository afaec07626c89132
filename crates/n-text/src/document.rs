//! Document — the per-file metadata the host reads and writes.
//!
//! A `Document` doesn't hold the text. The host's text widget owns that; the
//! document owns everything needed to turn the widget's text back into the
//! file it came from:
//!
//! - the file path (absent for an untitled document)
//! - the [`TextEncoding`] to write with
//! - the declared [`LineEnding`] every terminator is rewritten to on save
//! - whether the text changed since the last load or save
//!
//! # Lifecycle
//!
//! | Event                | Effect                                            |
//! |----------------------|---------------------------------------------------|
//! | new                  | untitled, ANSI, CRLF, unmodified                  |
//! | load                 | path + encoding + detected EOL, unmodified        |
//! | edit / replace all   | modified                                          |
//! | save                 | unmodified                                        |
//! | save as              | new path + encoding, unmodified                   |
//!
//! Every field is overwritten together, so a half-applied load is never
//! observable.

use std::path::{Path, PathBuf};
use std::fmt;

use log::debug;

use crate::encoding::{self, EncodedText, TextEncoding};
use crate::eol::LineEnding;
use crate::position::{self, Position};

/// Shown after the document name in the window title.
pub const APP_NAME: &str = "n-pad";

/// Name shown for a document with no path.
pub const UNTITLED: &str = "Untitled";

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Metadata of the one open document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    path: Option<PathBuf>,
    encoding: TextEncoding,
    eol: LineEnding,
    modified: bool,
}

/// A document freshly read from bytes, with its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub document: Document,
    pub text: String,
    /// Malformed input was replaced with U+FFFD while decoding.
    pub had_errors: bool,
}

impl Document {
    // -- Construction -------------------------------------------------------

    /// An untitled, ANSI, CRLF, unmodified document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a file's bytes and build its document.
    ///
    /// A BOM picks the encoding; without one `fallback` is used. The line
    /// ending is detected from the decoded text.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>, bytes: &[u8], fallback: &TextEncoding) -> Loaded {
        let decoded = encoding::decode(bytes, fallback);
        let mut document = Self::new();
        document.apply_loaded_metadata(path, decoded.encoding, &decoded.text);
        Loaded {
            document,
            text: decoded.text,
            had_errors: decoded.had_errors,
        }
    }

    // -- Load / save --------------------------------------------------------

    /// Adopt the metadata of a just-loaded file: path, encoding, the line
    /// ending detected from `loaded_text`, and a clean modified flag.
    pub fn apply_loaded_metadata(
        &mut self,
        path: impl Into<PathBuf>,
        encoding: TextEncoding,
        loaded_text: &str,
    ) {
        let path = path.into();
        let eol = LineEnding::detect(loaded_text);
        debug!("loaded {}: {encoding}, {eol}", path.display());
        *self = Self {
            path: Some(path),
            encoding,
            eol,
            modified: false,
        };
    }

    /// The text to write: every line terminator rewritten to this
    /// document's line ending.
    #[must_use]
    pub fn prepare_for_save(&self, text: &str) -> String {
        self.eol.normalize(text)
    }

    /// [`prepare_for_save`](Self::prepare_for_save), then encoded with this
    /// document's encoding (BOM included).
    #[must_use]
    pub fn to_bytes(&self, text: &str) -> EncodedText {
        encoding::encode(&self.prepare_for_save(text), &self.encoding)
    }

    /// Mark the document as saved. Called after a successful write.
    #[inline]
    pub const fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Save As succeeded: adopt the new path and encoding, then mark saved.
    pub fn mark_saved_as(&mut self, path: impl Into<PathBuf>, encoding: TextEncoding) {
        self.path = Some(path.into());
        self.encoding = encoding;
        self.modified = false;
    }

    /// Back to an untitled, ANSI, CRLF, unmodified document.
    pub fn reset_to_untitled(&mut self) {
        *self = Self::new();
    }

    // -- Line ending --------------------------------------------------------

    /// The line ending used on save.
    #[inline]
    #[must_use]
    pub const fn eol(&self) -> LineEnding {
        self.eol
    }

    /// Change the line ending used on save. Doesn't touch the text.
    #[inline]
    pub const fn set_eol(&mut self, eol: LineEnding) {
        self.eol = eol;
    }

    /// Change the line ending from a raw terminator sequence. Anything other
    /// than `"\r\n"`, `"\n"` or `"\r"` is ignored and the current style kept.
    /// Returns whether the sequence was accepted.
    pub fn set_eol_sequence(&mut self, seq: &str) -> bool {
        match LineEnding::from_sequence(seq) {
            Some(eol) => {
                self.eol = eol;
                true
            }
            None => {
                debug!("ignoring unrecognized line ending {seq:?}, keeping {}", self.eol);
                false
            }
        }
    }

    /// Status-bar name of the line ending, e.g. `Windows (CRLF)`.
    #[inline]
    #[must_use]
    pub const fn eol_name(&self) -> &'static str {
        self.eol.name()
    }

    // -- Other metadata -----------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn encoding(&self) -> &TextEncoding {
        &self.encoding
    }

    /// Change the encoding used on save.
    #[inline]
    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    /// The file path, if the document has one.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True if the text changed since the last load or save.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Record a text mutation.
    #[inline]
    pub const fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// A copy of this document with the modified flag set.
    #[must_use]
    pub fn with_modified(&self) -> Self {
        Self {
            modified: true,
            ..self.clone()
        }
    }

    /// File name for display, or `Untitled`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| UNTITLED.to_string(), |name| name.to_string_lossy().into_owned())
    }

    /// Window title: `name - n-pad`, prefixed with `*` while modified.
    #[must_use]
    pub fn title(&self) -> String {
        let marker = if self.modified { "*" } else { "" };
        format!("{marker}{} - {APP_NAME}", self.display_name())
    }

    /// Status-bar snapshot for `text` with the caret at `caret`.
    #[must_use]
    pub fn status(&self, text: &str, caret: usize) -> StatusLine {
        StatusLine {
            position: position::position_of(text, caret),
            eol: self.eol_name(),
            encoding: self.encoding.label().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// StatusLine
// ---------------------------------------------------------------------------

/// What the status bar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub position: Position,
    pub eol: &'static str,
    pub encoding: String,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.position, self.eol, self.encoding)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
