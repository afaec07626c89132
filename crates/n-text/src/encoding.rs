//! Text encodings — byte-order-mark detection and the bytes ⇄ text seam.
//!
//! The host reads a file fully, hands the bytes to [`decode`], and gets back
//! the text plus the [`TextEncoding`] it was read with. On save the text goes
//! back through [`encode`] with the document's encoding. Neither direction
//! can fail: malformed input decodes to U+FFFD, and characters the target
//! encoding can't represent encode as `?`.
//!
//! # BOM table
//!
//! Checked in this exact order. `FF FE 00 00` must be tested before `FF FE`
//! because the UTF-32 LE mark starts with the UTF-16 LE mark.
//!
//! | Prefix        | Encoding           |
//! |---------------|--------------------|
//! | `00 00 FE FF` | UTF-32 big-endian  |
//! | `FF FE 00 00` | UTF-32 little-endian |
//! | `EF BB BF`    | UTF-8 with BOM     |
//! | `FF FE`       | UTF-16 little-endian |
//! | `FE FF`       | UTF-16 big-endian  |
//!
//! No match means the caller's fallback applies (normally [`TextEncoding::Ansi`]).
//!
//! # Codecs
//!
//! "ANSI" is Windows-1252. ANSI, UTF-8 and UTF-16 decoding go through
//! `encoding_rs`. `encoding_rs` implements the WHATWG Encoding Standard, which
//! has no UTF-16 encoder and no UTF-32 at all, so those directions are done
//! here by hand.

use std::fmt;
use std::str::FromStr;

use encoding_rs::{Encoding, EncoderResult, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use log::{debug, warn};

use crate::error::ParseEncodingError;

const BOM_UTF32_BE: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];
const BOM_UTF32_LE: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF16_BE: &[u8] = &[0xFE, 0xFF];

// ---------------------------------------------------------------------------
// TextEncoding
// ---------------------------------------------------------------------------

/// The encoding a document is read and written with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// The system single-byte code page (Windows-1252).
    #[default]
    Ansi,
    /// UTF-8, optionally written with a byte-order mark.
    Utf8 { bom: bool },
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
    /// Any other encoding, known only by name. Display-only: bytes go
    /// through the ANSI codec.
    Other(String),
}

impl TextEncoding {
    /// Encodings offered when saving, in picker order.
    pub const CHOICES: [Self; 7] = [
        Self::Ansi,
        Self::Utf8 { bom: false },
        Self::Utf8 { bom: true },
        Self::Utf16Le,
        Self::Utf16Be,
        Self::Utf32Le,
        Self::Utf32Be,
    ];

    /// Status-bar label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Ansi => "ANSI",
            Self::Utf8 { bom: false } => "UTF-8",
            Self::Utf8 { bom: true } => "UTF-8 (BOM)",
            Self::Utf16Le => "UTF-16 LE",
            Self::Utf16Be => "UTF-16 BE",
            Self::Utf32Le => "UTF-32 LE",
            Self::Utf32Be => "UTF-32 BE",
            Self::Other(name) => name,
        }
    }

    /// The byte-order mark written in front of the text on save.
    #[must_use]
    pub const fn preamble(&self) -> &'static [u8] {
        match self {
            Self::Utf8 { bom: true } => BOM_UTF8,
            Self::Utf16Le => BOM_UTF16_LE,
            Self::Utf16Be => BOM_UTF16_BE,
            Self::Utf32Le => BOM_UTF32_LE,
            Self::Utf32Be => BOM_UTF32_BE,
            Self::Ansi | Self::Utf8 { bom: false } | Self::Other(_) => &[],
        }
    }

    /// Decode `body` (BOM already stripped) with this encoding.
    fn decode_body(&self, body: &[u8]) -> (String, bool) {
        match self {
            Self::Utf8 { .. } => decode_with(UTF_8, body),
            Self::Utf16Le => decode_with(UTF_16LE, body),
            Self::Utf16Be => decode_with(UTF_16BE, body),
            Self::Utf32Le => decode_utf32(body, u32::from_le_bytes),
            Self::Utf32Be => decode_utf32(body, u32::from_be_bytes),
            Self::Ansi => decode_with(WINDOWS_1252, body),
            Self::Other(name) => {
                warn!("no codec for encoding '{name}', reading as ANSI");
                decode_with(WINDOWS_1252, body)
            }
        }
    }

    /// Encode `text` without preamble. Returns the bytes and the number of
    /// characters that had to be replaced with `?`.
    fn encode_body(&self, text: &str) -> (Vec<u8>, usize) {
        match self {
            Self::Utf8 { .. } => (text.as_bytes().to_vec(), 0),
            Self::Utf16Le => (text.encode_utf16().flat_map(u16::to_le_bytes).collect(), 0),
            Self::Utf16Be => (text.encode_utf16().flat_map(u16::to_be_bytes).collect(), 0),
            Self::Utf32Le => (text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect(), 0),
            Self::Utf32Be => (text.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect(), 0),
            Self::Ansi => encode_single_byte(WINDOWS_1252, text),
            Self::Other(name) => {
                warn!("no codec for encoding '{name}', writing as ANSI");
                encode_single_byte(WINDOWS_1252, text)
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = ParseEncodingError;

    /// Accepts the status-bar labels and the usual spellings, ignoring case,
    /// spaces, dashes, underscores and parentheses (`UTF-8 (BOM)`,
    /// `utf8-bom` and `utf_8_bom` are all the same).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '(' | ')'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "ansi" | "windows1252" | "cp1252" => Ok(Self::Ansi),
            "utf8" => Ok(Self::Utf8 { bom: false }),
            "utf8bom" => Ok(Self::Utf8 { bom: true }),
            "utf16le" | "utf16" | "unicode" => Ok(Self::Utf16Le),
            "utf16be" => Ok(Self::Utf16Be),
            "utf32le" | "utf32" => Ok(Self::Utf32Le),
            "utf32be" => Ok(Self::Utf32Be),
            _ => Err(ParseEncodingError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Classify the leading bytes of a file by its byte-order mark.
///
/// Fewer than four bytes are fine; prefixes that don't fit simply don't match.
/// `None` means no BOM: fall back to the system default.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> Option<TextEncoding> {
    let detected = if bytes.starts_with(BOM_UTF32_BE) {
        TextEncoding::Utf32Be
    } else if bytes.starts_with(BOM_UTF32_LE) {
        TextEncoding::Utf32Le
    } else if bytes.starts_with(BOM_UTF8) {
        TextEncoding::Utf8 { bom: true }
    } else if bytes.starts_with(BOM_UTF16_LE) {
        TextEncoding::Utf16Le
    } else if bytes.starts_with(BOM_UTF16_BE) {
        TextEncoding::Utf16Be
    } else {
        return None;
    };
    Some(detected)
}

// ---------------------------------------------------------------------------
// Decode / encode
// ---------------------------------------------------------------------------

/// Text read from a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// The decoded text, BOM removed.
    pub text: String,
    /// The encoding the bytes were read with: the detected one, or the
    /// fallback when there was no BOM.
    pub encoding: TextEncoding,
    /// True when malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Bytes produced for writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    /// Preamble followed by the encoded text.
    pub bytes: Vec<u8>,
    /// Characters the encoding couldn't represent, written as `?`.
    pub unmappable: usize,
}

impl EncodedText {
    /// True when every character was represented exactly.
    #[inline]
    #[must_use]
    pub const fn is_lossless(&self) -> bool {
        self.unmappable == 0
    }
}

/// Decode a whole file. A BOM, if present, picks the encoding and is stripped;
/// otherwise `fallback` is used.
#[must_use]
pub fn decode(bytes: &[u8], fallback: &TextEncoding) -> DecodedText {
    let (encoding, body) = match detect_encoding(bytes) {
        Some(detected) => {
            let skip = detected.preamble().len();
            (detected, &bytes[skip..])
        }
        None => (fallback.clone(), bytes),
    };
    let (text, had_errors) = encoding.decode_body(body);
    debug!(
        "decoded {} bytes as {encoding} ({} chars)",
        bytes.len(),
        text.chars().count()
    );
    if had_errors {
        warn!("malformed {encoding} input replaced with U+FFFD");
    }
    DecodedText {
        text,
        encoding,
        had_errors,
    }
}

/// Encode `text` for writing: preamble, then the body.
#[must_use]
pub fn encode(text: &str, encoding: &TextEncoding) -> EncodedText {
    let preamble = encoding.preamble();
    let (body, unmappable) = encoding.encode_body(text);
    if unmappable > 0 {
        warn!("{unmappable} characters not representable in {encoding}, written as '?'");
    }
    let mut bytes = Vec::with_capacity(preamble.len() + body.len());
    bytes.extend_from_slice(preamble);
    bytes.extend_from_slice(&body);
    EncodedText { bytes, unmappable }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Decode with an `encoding_rs` codec, never sniffing a BOM of its own.
fn decode_with(codec: &'static Encoding, body: &[u8]) -> (String, bool) {
    let (text, had_errors) = codec.decode_without_bom_handling(body);
    (text.into_owned(), had_errors)
}

/// Decode UTF-32 code units. Invalid scalar values and a trailing partial
/// unit become U+FFFD.
fn decode_utf32(body: &[u8], unit: fn([u8; 4]) -> u32) -> (String, bool) {
    let mut text = String::with_capacity(body.len() / 4);
    let mut had_errors = false;
    let mut units = body.chunks_exact(4);
    for chunk in &mut units {
        let bytes = [chunk[0], chunk[1], chunk[2], chunk[3]];
        if let Some(ch) = char::from_u32(unit(bytes)) {
            text.push(ch);
        } else {
            text.push(char::REPLACEMENT_CHARACTER);
            had_errors = true;
        }
    }
    if !units.remainder().is_empty() {
        text.push(char::REPLACEMENT_CHARACTER);
        had_errors = true;
    }
    (text, had_errors)
}

/// Encode with a single-byte `encoding_rs` codec, substituting `?` for
/// unmappable characters (`encoding_rs`'s own replacement writes HTML
/// numeric character references, which is wrong for a plain text file).
fn encode_single_byte(codec: &'static Encoding, text: &str) -> (Vec<u8>, usize) {
    let mut encoder = codec.new_encoder();
    let mut bytes = Vec::with_capacity(text.len());
    let mut unmappable = 0;
    let mut rest = text;

    loop {
        if let Some(needed) = encoder.max_buffer_length_from_utf8_without_replacement(rest.len()) {
            bytes.reserve(needed);
        }
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut bytes, true);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => bytes.reserve(rest.len().max(16)),
            EncoderResult::Unmappable(_) => {
                bytes.push(b'?');
                unmappable += 1;
            }
        }
    }

    (bytes, unmappable)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
