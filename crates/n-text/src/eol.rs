//! Line endings — detection on load and normalization on save.
//!
//! A document carries exactly one declared [`LineEnding`]. Text coming from
//! the host may contain any mix of `\r\n`, `\n` and lone `\r` (pasted text,
//! hand-edited files); on save every terminator is rewritten to the declared
//! style so a saved file never has mixed endings.
//!
//! # Detection priority
//!
//! `\r\n` wins over `\n`, which wins over `\r`. Every CRLF also contains an LF
//! byte, so checking LF first would misreport Windows files as Unix ones.
//! Text without any terminator (including empty text) reports the default,
//! [`LineEnding::CrLf`].

use std::fmt;
use std::str::FromStr;

use crate::error::ParseLineEndingError;

/// Line ending style of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    /// `\r\n` — Windows, DOS. The default for new documents.
    #[default]
    CrLf,
    /// `\n` — Unix, macOS, Linux.
    Lf,
    /// `\r` — Classic Mac (pre-OS X).
    Cr,
}

impl LineEnding {
    /// All styles, in menu order.
    pub const ALL: [Self; 3] = [Self::CrLf, Self::Lf, Self::Cr];

    /// The string representation of this line ending.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
            Self::Cr => "\r",
        }
    }

    /// Human-friendly name shown in the status bar.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CrLf => "Windows (CRLF)",
            Self::Lf => "Unix (LF)",
            Self::Cr => "Mac (CR)",
        }
    }

    /// Map a raw terminator sequence to its style. Anything other than the
    /// three exact sequences returns `None`.
    #[must_use]
    pub fn from_sequence(seq: &str) -> Option<Self> {
        match seq {
            "\r\n" => Some(Self::CrLf),
            "\n" => Some(Self::Lf),
            "\r" => Some(Self::Cr),
            _ => None,
        }
    }

    /// Detect the dominant line ending of `text`.
    ///
    /// CRLF if `"\r\n"` occurs anywhere, else LF if `'\n'` occurs, else CR if
    /// `'\r'` occurs, else the default (CRLF).
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else if text.contains('\n') {
            Self::Lf
        } else if text.contains('\r') {
            Self::Cr
        } else {
            Self::default()
        }
    }

    /// Rewrite every line terminator in `text` as this style.
    ///
    /// First collapses `\r\n` to `\n`, then lone `\r` to `\n`, then expands
    /// each `\n` to [`as_str`](Self::as_str). Collapsing CRLF first keeps it
    /// from being counted as two terminators. Idempotent for a fixed style.
    #[must_use]
    pub fn normalize(self, text: &str) -> String {
        let lf_only = text.replace("\r\n", "\n").replace('\r', "\n");
        match self {
            Self::Lf => lf_only,
            Self::CrLf | Self::Cr => lf_only.replace('\n', self.as_str()),
        }
    }
}

/// Normalize `text` to `style` for writing. See [`LineEnding::normalize`].
#[must_use]
pub fn normalize_for_save(text: &str, style: LineEnding) -> String {
    style.normalize(text)
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CrLf => f.write_str("CRLF"),
            Self::Lf => f.write_str("LF"),
            Self::Cr => f.write_str("CR"),
        }
    }
}

impl FromStr for LineEnding {
    type Err = ParseLineEndingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crlf" | "windows" | "dos" => Ok(Self::CrLf),
            "lf" | "unix" => Ok(Self::Lf),
            "cr" | "mac" => Ok(Self::Cr),
            _ => Err(ParseLineEndingError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -- detect -------------------------------------------------------------

    #[test]
    fn detect_lf() {
        assert_eq!(LineEnding::detect("hello\nworld\n"), LineEnding::Lf);
    }

    #[test]
    fn detect_crlf() {
        assert_eq!(LineEnding::detect("hello\r\nworld\r\n"), LineEnding::CrLf);
    }

    #[test]
    fn detect_cr() {
        assert_eq!(LineEnding::detect("hello\rworld\r"), LineEnding::Cr);
    }

    #[test]
    fn detect_no_endings_defaults_to_crlf() {
        assert_eq!(LineEnding::detect("no newlines"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect(""), LineEnding::CrLf);
    }

    #[test]
    fn detect_crlf_anywhere_wins() {
        // Not first-occurrence: a single CRLF anywhere outranks earlier LFs.
        assert_eq!(LineEnding::detect("a\r\nb\nc"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a\nb\nc\r\n"), LineEnding::CrLf);
    }

    #[test]
    fn detect_lf_beats_lone_cr() {
        assert_eq!(LineEnding::detect("a\rb\nc"), LineEnding::Lf);
    }

    // -- normalize ----------------------------------------------------------

    #[test]
    fn normalize_mixed_to_lf() {
        assert_eq!(normalize_for_save("a\r\nb\rc\nd", LineEnding::Lf), "a\nb\nc\nd");
    }

    #[test]
    fn normalize_mixed_to_crlf() {
        assert_eq!(
            normalize_for_save("a\r\nb\rc\nd", LineEnding::CrLf),
            "a\r\nb\r\nc\r\nd"
        );
    }

    #[test]
    fn normalize_mixed_to_cr() {
        assert_eq!(normalize_for_save("a\r\nb\rc\nd", LineEnding::Cr), "a\rb\rc\rd");
    }

    #[test]
    fn normalize_crlf_counts_once() {
        assert_eq!(normalize_for_save("\r\n\r\n", LineEnding::Lf), "\n\n");
        // `\n\r` is two terminators: LF, then a lone CR.
        assert_eq!(normalize_for_save("\n\r", LineEnding::Lf), "\n\n");
    }

    #[test]
    fn normalize_empty() {
        for style in LineEnding::ALL {
            assert_eq!(normalize_for_save("", style), "");
        }
    }

    #[test]
    fn normalize_unicode_untouched() {
        assert_eq!(
            normalize_for_save("café\r日本\n", LineEnding::CrLf),
            "café\r\n日本\r\n"
        );
    }

    quickcheck::quickcheck! {
        fn normalize_is_idempotent(text: String, pick: u8) -> bool {
            let style = LineEnding::ALL[usize::from(pick) % 3];
            let once = normalize_for_save(&text, style);
            normalize_for_save(&once, style) == once
        }

        fn normalized_text_detects_as_its_style(text: String, pick: u8) -> bool {
            let style = LineEnding::ALL[usize::from(pick) % 3];
            let once = normalize_for_save(&text, style);
            // Only meaningful when at least one terminator survived.
            !once.contains(['\r', '\n']) || LineEnding::detect(&once) == style
        }
    }

    // -- names --------------------------------------------------------------

    #[test]
    fn as_str_sequences() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
        assert_eq!(LineEnding::Cr.as_str(), "\r");
    }

    #[test]
    fn display_and_name() {
        assert_eq!(LineEnding::CrLf.to_string(), "CRLF");
        assert_eq!(LineEnding::Lf.name(), "Unix (LF)");
        assert_eq!(LineEnding::Cr.name(), "Mac (CR)");
        assert_eq!(LineEnding::CrLf.name(), "Windows (CRLF)");
    }

    #[test]
    fn from_sequence_is_exact() {
        assert_eq!(LineEnding::from_sequence("\r\n"), Some(LineEnding::CrLf));
        assert_eq!(LineEnding::from_sequence("\n"), Some(LineEnding::Lf));
        assert_eq!(LineEnding::from_sequence("\r"), Some(LineEnding::Cr));
        assert_eq!(LineEnding::from_sequence("\n\r"), None);
        assert_eq!(LineEnding::from_sequence(""), None);
    }

    #[test]
    fn parse_names() {
        assert_eq!("crlf".parse::<LineEnding>(), Ok(LineEnding::CrLf));
        assert_eq!(" LF ".parse::<LineEnding>(), Ok(LineEnding::Lf));
        assert_eq!("Mac".parse::<LineEnding>(), Ok(LineEnding::Cr));
        assert!("nel".parse::<LineEnding>().is_err());
    }
}
