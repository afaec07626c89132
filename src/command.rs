//! Commands — one per input line.
//!
//! # Supported commands
//!
//! | Command               | Action                                        |
//! |-----------------------|-----------------------------------------------|
//! | `e <path>`            | Open a file (`e!` discards unsaved changes)   |
//! | `new`                 | Start an untitled document (`new!` forces)    |
//! | `w`                   | Save to the current path                      |
//! | `w <path>`            | Save as                                       |
//! | `enc <name>`          | Encoding for the next save                    |
//! | `eol crlf\|lf\|cr`    | Line ending for the next save                 |
//! | `a <text>`            | Append a line                                 |
//! | `p`                   | Print the text                                |
//! | `/needle`, `?needle`  | Find down / up (empty needle repeats)         |
//! | `n`, `N`              | Find next / previous                          |
//! | `case on\|off`        | Match-case toggle                             |
//! | `r <replacement>`     | Replace the selected match, select the next   |
//! | `s/pat/rep/flags`     | Replace all                                   |
//! | `s`                   | Repeat the last replace-all                   |
//! | `goto <line>`         | Caret to the start of a line                  |
//! | `status`              | Title, caret position, line ending, encoding  |
//! | `q`                   | Quit (fails if modified)                      |
//! | `q!`                  | Quit, discarding changes                      |
//!
//! # Replace-all flags
//!
//! | Flag | Effect               |
//! |------|----------------------|
//! | `i`  | Ignore case          |
//! | `I`  | Match case           |
//!
//! Without a flag the current match-case toggle applies. The last flag wins.

use std::path::PathBuf;

use n_text::{LineEnding, SearchDirection, TextEncoding};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `e <path>` / `e! <path>`.
    Edit { path: PathBuf, force: bool },

    /// `new` / `new!`.
    New { force: bool },

    /// `w` — save to the current path.
    Write,

    /// `w <path>` — save as.
    WriteAs(PathBuf),

    /// `enc <name>`.
    Encoding(TextEncoding),

    /// `eol crlf|lf|cr`.
    LineEnding(LineEnding),

    /// `a <text>` — the text is kept verbatim.
    Append(String),

    /// `p`.
    Print,

    /// `/needle` or `?needle`. The direction becomes the remembered one.
    Find {
        needle: String,
        direction: SearchDirection,
    },

    /// `n`.
    FindNext,

    /// `N`.
    FindPrev,

    /// `case on|off`.
    MatchCase(bool),

    /// `r <replacement>` — the replacement is kept verbatim.
    Replace(String),

    /// `s/pattern/replacement/[flags]`.
    Substitute {
        pattern: String,
        replacement: String,
        flags: SubFlags,
    },

    /// `s` with no body.
    SubRepeat,

    /// `goto <line>` (1-indexed).
    Goto(usize),

    /// `status`.
    Status,

    /// `q` — quit (refuses if modified).
    Quit,

    /// `q!` — quit, discarding changes.
    ForceQuit,

    /// A known command with a bad argument. Holds the message to show.
    Invalid(String),

    /// Unknown command — contains the full input for error reporting.
    Unknown(String),
}

/// Flags for replace-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubFlags {
    /// `Some(true)` for `I`, `Some(false)` for `i`, `None` to use the
    /// match-case toggle.
    pub match_case: Option<bool>,
}

/// The result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command succeeded. Optional message to print.
    Ok(Option<String>),

    /// Command failed. Error message to print.
    Err(String),

    /// The session should end.
    Quit,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse one input line into a [`Command`].
#[must_use]
pub fn parse(input: &str) -> Command {
    let line = input.trim_end_matches(['\n', '\r']).trim_start();
    let trimmed = line.trim_end();

    if trimmed.is_empty() {
        return Command::Unknown(String::new());
    }

    if let Some(needle) = line.strip_prefix('/') {
        return Command::Find {
            needle: needle.to_string(),
            direction: SearchDirection::Forward,
        };
    }
    if let Some(needle) = line.strip_prefix('?') {
        return Command::Find {
            needle: needle.to_string(),
            direction: SearchDirection::Backward,
        };
    }

    // `s` followed by a delimiter. Words like `status` fall through.
    if let Some(body) = trimmed.strip_prefix('s') {
        match body.chars().next() {
            None => return Command::SubRepeat,
            Some(delim) if !delim.is_alphanumeric() && !delim.is_whitespace() => {
                return parse_substitute(&line[1..]);
            }
            Some(_) => {}
        }
    }

    // Split into command and arguments. `raw` keeps the argument's spacing
    // for commands that take literal text.
    let (cmd, raw) = line
        .find(char::is_whitespace)
        .map_or((trimmed, ""), |pos| {
            let sep = line[pos..].chars().next().map_or(1, char::len_utf8);
            (&line[..pos], &line[pos + sep..])
        });
    let arg = raw.trim();

    match cmd {
        "e" | "e!" => {
            if arg.is_empty() {
                Command::Invalid("E32: No file name".to_string())
            } else {
                Command::Edit {
                    path: PathBuf::from(arg),
                    force: cmd == "e!",
                }
            }
        }
        "new" => Command::New { force: false },
        "new!" => Command::New { force: true },
        "w" => {
            if arg.is_empty() {
                Command::Write
            } else {
                Command::WriteAs(PathBuf::from(arg))
            }
        }
        "enc" => arg
            .parse()
            .map_or_else(|e| Command::Invalid(format!("{e}")), Command::Encoding),
        "eol" => arg
            .parse()
            .map_or_else(|e| Command::Invalid(format!("{e}")), Command::LineEnding),
        "a" => Command::Append(raw.trim_end_matches(['\n', '\r']).to_string()),
        "p" => Command::Print,
        "n" => Command::FindNext,
        "N" => Command::FindPrev,
        "case" => match arg {
            "on" => Command::MatchCase(true),
            "off" => Command::MatchCase(false),
            _ => Command::Invalid(format!("expected 'case on' or 'case off', got '{arg}'")),
        },
        "r" => Command::Replace(raw.trim_end_matches(['\n', '\r']).to_string()),
        "goto" => arg.parse().map_or_else(
            |_| Command::Invalid(format!("expected a line number, got '{arg}'")),
            Command::Goto,
        ),
        "status" => Command::Status,
        "q" => Command::Quit,
        "q!" => Command::ForceQuit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Parse the body of an `s` command (everything after the `s`).
///
/// Handles `s/pattern/replacement/flags` with arbitrary delimiters and
/// escaped delimiters (e.g., `s#foo#bar#i` or `s/a\/b/c/`).
fn parse_substitute(body: &str) -> Command {
    let Some(delim) = body.chars().next() else {
        return Command::SubRepeat;
    };
    let after_delim = &body[delim.len_utf8()..];

    let Some((pattern, rest)) = split_at_unescaped(after_delim, delim) else {
        // `s/pat`
        return Command::Substitute {
            pattern: unescape_delim(after_delim.trim_end(), delim),
            replacement: String::new(),
            flags: SubFlags::default(),
        };
    };

    let Some((replacement, rest)) = split_at_unescaped(rest, delim) else {
        // `s/pat/rep`
        return Command::Substitute {
            pattern: unescape_delim(pattern, delim),
            replacement: unescape_delim(rest.trim_end_matches(['\n', '\r']), delim),
            flags: SubFlags::default(),
        };
    };

    Command::Substitute {
        pattern: unescape_delim(pattern, delim),
        replacement: unescape_delim(replacement, delim),
        flags: parse_sub_flags(rest.trim()),
    }
}

/// Split at the first `delim` not preceded by a backslash.
fn split_at_unescaped(s: &str, delim: char) -> Option<(&str, &str)> {
    let mut chars = s.char_indices();
    while let Some((idx, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
        } else if ch == delim {
            return Some((&s[..idx], &s[idx + ch.len_utf8()..]));
        }
    }
    None
}

/// `\<delim>` → `<delim>`; every other backslash is literal text.
fn unescape_delim(s: &str, delim: char) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.next_if_eq(&delim).is_some() {
            result.push(delim);
            continue;
        }
        result.push(ch);
    }
    result
}

fn parse_sub_flags(s: &str) -> SubFlags {
    let mut flags = SubFlags::default();
    for ch in s.chars() {
        match ch {
            'i' => flags.match_case = Some(false),
            'I' => flags.match_case = Some(true),
            _ => {} // Unknown flags silently ignored.
        }
    }
    flags
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
