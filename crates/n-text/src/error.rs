//! Parse errors for names typed by the user or read from configuration.
//!
//! Nothing else in this crate can fail: detection, normalization, search and
//! replace are total over in-memory values.

use thiserror::Error;

/// An encoding name that doesn't map to any [`TextEncoding`](crate::encoding::TextEncoding).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown encoding '{0}' (expected ansi, utf-8, utf-8-bom, utf-16le, utf-16be, utf-32le or utf-32be)")]
pub struct ParseEncodingError(pub String);

/// A line ending name that isn't one of the three canonical styles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown line ending '{0}' (expected crlf, lf or cr)")]
pub struct ParseLineEndingError(pub String);
