//! # n-text — Document model for n-pad
//!
//! Everything a plain-text editor needs between the bytes on disk and the
//! text in its edit widget. Nothing here touches the filesystem or a UI:
//!
//! - **[`encoding`]** — BOM detection, decoding and encoding (ANSI, UTF-8, UTF-16, UTF-32)
//! - **[`eol`]** — `LineEnding` detection and normalization
//! - **[`document`]** — `Document` metadata: path, encoding, line ending, modified flag
//! - **[`position`]** — caret offset ⇄ (line, col), go-to-line
//! - **[`search`]** — find next/previous with wrap-around and case modes
//! - **[`replace`]** — replace once and replace all
//!
//! All text offsets are char offsets.

pub mod document;
pub mod encoding;
pub mod eol;
pub mod error;
pub mod position;
pub mod replace;
pub mod search;

pub use document::{Document, Loaded, StatusLine};
pub use encoding::{DecodedText, EncodedText, TextEncoding, decode, detect_encoding, encode};
pub use eol::{LineEnding, normalize_for_save};
pub use error::{ParseEncodingError, ParseLineEndingError};
pub use position::Position;
pub use replace::{ReplaceAllOutcome, ReplaceOnceOutcome, ReplaceRequest, replace_all};
pub use search::{
    SearchDescriptor, SearchDirection, SearchHit, SearchRequest, Selection, find_all, find_next,
    selection_matches,
};
