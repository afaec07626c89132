//! Session — one open document, its text and the caret.
//!
//! The session plays the part of a text widget. It owns the text and the
//! current selection, hands both to the document model for every decision,
//! and talks to the disk only through [`crate::file`].
//!
//! Prompts are never interactive. A command that would discard unsaved
//! changes or open a very large file refuses unless it's forced with `!` or
//! the session was started with `--yes`.

use std::path::Path;

use log::{debug, warn};
use n_text::{position, search};
use n_text::{
    Document, ReplaceRequest, SearchDescriptor, SearchDirection, Selection, TextEncoding,
};

use crate::command::{self, Command, CommandResult, SubFlags};
use crate::config::Settings;
use crate::file::{self, FileError};

const NO_WRITE: &str = "E37: No write since last change (add ! to override)";
const NO_PATTERN: &str = "E35: No previous search pattern";

/// Editor state driven by [`Command`]s.
#[derive(Debug)]
pub struct Session {
    document: Document,
    text: String,
    selection: Selection,
    search: SearchDescriptor,
    last_substitute: Option<(String, String, SubFlags)>,
    large_file_warn_bytes: u64,
    fallback_encoding: TextEncoding,
    assume_yes: bool,
}

impl Session {
    /// An untitled, empty session.
    #[must_use]
    pub fn new(settings: &Settings, assume_yes: bool) -> Self {
        Self {
            document: Document::new(),
            text: String::new(),
            selection: Selection::default(),
            search: SearchDescriptor::new(String::new(), settings.match_case, settings.search_down),
            last_substitute: None,
            large_file_warn_bytes: settings.large_file_warn_bytes,
            fallback_encoding: settings.fallback_encoding.clone(),
            assume_yes,
        }
    }

    #[inline]
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    #[inline]
    #[must_use]
    pub const fn search(&self) -> &SearchDescriptor {
        &self.search
    }

    /// Parse and execute one input line.
    pub fn run_line(&mut self, line: &str) -> CommandResult {
        self.execute(command::parse(line))
    }

    /// Execute a command.
    pub fn execute(&mut self, cmd: Command) -> CommandResult {
        match cmd {
            Command::Edit { path, force } => self.open(&path, force),
            Command::New { force } => self.cmd_new(force),
            Command::Write => self.cmd_write(),
            Command::WriteAs(path) => self.cmd_write_as(&path),
            Command::Encoding(encoding) => {
                let msg = format!("encoding: {}", encoding.label());
                self.document.set_encoding(encoding);
                CommandResult::Ok(Some(msg))
            }
            Command::LineEnding(eol) => {
                self.document.set_eol(eol);
                CommandResult::Ok(Some(format!("line ending: {}", eol.name())))
            }
            Command::Append(line) => self.cmd_append(&line),
            Command::Print => CommandResult::Ok(Some(self.text.clone())),
            Command::Find { needle, direction } => {
                if !needle.is_empty() {
                    self.search.set_needle(needle);
                }
                self.search.set_search_down(direction == SearchDirection::Forward);
                self.cmd_find(false)
            }
            Command::FindNext => self.cmd_find(false),
            Command::FindPrev => self.cmd_find(true),
            Command::MatchCase(on) => {
                self.search.set_match_case(on);
                let state = if on { "on" } else { "off" };
                CommandResult::Ok(Some(format!("match case {state}")))
            }
            Command::Replace(replacement) => self.cmd_replace(replacement),
            Command::Substitute {
                pattern,
                replacement,
                flags,
            } => self.cmd_substitute(pattern, replacement, flags),
            Command::SubRepeat => match self.last_substitute.clone() {
                Some((pattern, replacement, flags)) => {
                    self.cmd_substitute(pattern, replacement, flags)
                }
                None => CommandResult::Err("E35: No previous substitute".to_string()),
            },
            Command::Goto(line) => {
                let caret = position::goto_line(&self.text, line);
                self.selection = Selection::caret(caret);
                CommandResult::Ok(Some(self.caret_position()))
            }
            Command::Status => {
                let status = self.document.status(&self.text, self.selection.start);
                CommandResult::Ok(Some(format!("{} | {status}", self.document.title())))
            }
            Command::Quit => {
                if self.document.is_modified() {
                    CommandResult::Err(NO_WRITE.to_string())
                } else {
                    CommandResult::Quit
                }
            }
            Command::ForceQuit => CommandResult::Quit,
            Command::Invalid(msg) => CommandResult::Err(msg),
            Command::Unknown(input) => {
                if input.is_empty() {
                    CommandResult::Ok(None)
                } else {
                    CommandResult::Err(format!("E492: Not an editor command: {input}"))
                }
            }
        }
    }

    // -- Files --------------------------------------------------------------

    /// Open `path`, replacing the current document.
    pub fn open(&mut self, path: &Path, force: bool) -> CommandResult {
        let allowed = force || self.assume_yes;
        if self.document.is_modified() && !allowed {
            return CommandResult::Err(NO_WRITE.to_string());
        }

        let threshold = self.large_file_warn_bytes;
        let bytes = match file::load(path, threshold, |len| {
            debug!("{} is {len} bytes, limit {threshold}", path.display());
            allowed
        }) {
            Ok(bytes) => bytes,
            Err(e @ FileError::Cancelled(_)) => {
                return CommandResult::Err(format!(
                    "{e}: larger than {threshold} bytes (use e! to open anyway)"
                ));
            }
            Err(e) => return CommandResult::Err(e.to_string()),
        };

        let loaded = Document::load(path, &bytes, &self.fallback_encoding);
        self.document = loaded.document;
        self.text = loaded.text;
        self.selection = Selection::default();

        let mut msg = format!(
            "\"{}\" {}L, {}B [{}, {}]",
            self.document.display_name(),
            position::line_count(&self.text),
            bytes.len(),
            self.document.encoding(),
            self.document.eol_name(),
        );
        if loaded.had_errors {
            warn!("{}: malformed input replaced with U+FFFD", path.display());
            msg.push_str(" [malformed input replaced]");
        }
        CommandResult::Ok(Some(msg))
    }

    fn cmd_new(&mut self, force: bool) -> CommandResult {
        if self.document.is_modified() && !force && !self.assume_yes {
            return CommandResult::Err(NO_WRITE.to_string());
        }
        self.document.reset_to_untitled();
        self.text.clear();
        self.selection = Selection::default();
        CommandResult::Ok(None)
    }

    /// `w` — save to the current path.
    fn cmd_write(&mut self) -> CommandResult {
        let Some(path) = self.document.path().map(Path::to_path_buf) else {
            return CommandResult::Err("E32: No file name".to_string());
        };
        match self.write_to(&path) {
            Ok(msg) => {
                self.document.mark_saved();
                CommandResult::Ok(Some(msg))
            }
            Err(msg) => CommandResult::Err(msg),
        }
    }

    /// `w <path>` — save as, keeping the current encoding.
    fn cmd_write_as(&mut self, path: &Path) -> CommandResult {
        match self.write_to(path) {
            Ok(msg) => {
                let encoding = self.document.encoding().clone();
                self.document.mark_saved_as(path, encoding);
                CommandResult::Ok(Some(msg))
            }
            Err(msg) => CommandResult::Err(msg),
        }
    }

    fn write_to(&self, path: &Path) -> Result<String, String> {
        let encoded = self.document.to_bytes(&self.text);
        file::save(path, &encoded.bytes)
            .map_err(|e| format!("E212: Can't save file: {e}"))?;

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let mut msg = format!("\"{name}\" written, {}B", encoded.bytes.len());
        if !encoded.is_lossless() {
            warn!(
                "{}: {} characters not representable in {}",
                path.display(),
                encoded.unmappable,
                self.document.encoding()
            );
            msg.push_str(&format!(
                " ({} characters written as '?')",
                encoded.unmappable
            ));
        }
        Ok(msg)
    }

    // -- Editing ------------------------------------------------------------

    /// Append `line` as a new last line, using the document's line ending.
    fn cmd_append(&mut self, line: &str) -> CommandResult {
        if !self.text.is_empty() && !self.text.ends_with(['\n', '\r']) {
            self.text.push_str(self.document.eol().as_str());
        }
        self.text.push_str(line);
        self.document.mark_modified();
        self.selection = Selection::caret(self.text.chars().count());
        CommandResult::Ok(None)
    }

    // -- Find / replace -----------------------------------------------------

    fn cmd_find(&mut self, reverse: bool) -> CommandResult {
        if self.search.is_empty() {
            return CommandResult::Err(NO_PATTERN.to_string());
        }

        let request = self.search.request(self.selection, reverse);
        let Some(hit) = request.locate(&self.text) else {
            return CommandResult::Err(format!(
                "E486: Pattern not found: {}",
                self.search.needle()
            ));
        };
        self.selection = hit.selection;

        // Overlapping hits count as the nearest non-overlapping one before them.
        let all = search::find_all(&self.text, &request.needle, request.match_case);
        let index = all.partition_point(|&at| at <= hit.selection.start);
        let msg = format!("{} [{index}/{}]", self.caret_position(), all.len());
        let msg = match SearchDirection::resolve(request.search_down, reverse) {
            _ if !hit.wrapped => msg,
            SearchDirection::Forward => format!("search hit BOTTOM, continuing at TOP: {msg}"),
            SearchDirection::Backward => format!("search hit TOP, continuing at BOTTOM: {msg}"),
        };
        CommandResult::Ok(Some(msg))
    }

    fn cmd_replace(&mut self, replacement: String) -> CommandResult {
        if self.search.is_empty() {
            return CommandResult::Err(NO_PATTERN.to_string());
        }

        let inserted = replacement.chars().count();
        let request = ReplaceRequest::from_descriptor(&self.search, replacement, self.selection);
        let outcome = request.replace_once(&self.text);

        match (outcome.text, outcome.selection) {
            (Some(text), next) => {
                let caret = self.selection.start + inserted;
                self.text = text;
                self.document.mark_modified();
                self.selection = next.unwrap_or(Selection::caret(caret));
                let msg = if next.is_some() {
                    format!("replaced, next match at {}", self.caret_position())
                } else {
                    "replaced, no more matches".to_string()
                };
                CommandResult::Ok(Some(msg))
            }
            (None, Some(found)) => {
                self.selection = found;
                CommandResult::Ok(Some(self.caret_position()))
            }
            (None, None) => CommandResult::Err(format!(
                "E486: Pattern not found: {}",
                self.search.needle()
            )),
        }
    }

    fn cmd_substitute(
        &mut self,
        pattern: String,
        replacement: String,
        flags: SubFlags,
    ) -> CommandResult {
        // An empty pattern reuses the last search.
        let pattern = if pattern.is_empty() {
            if self.search.is_empty() {
                return CommandResult::Err(NO_PATTERN.to_string());
            }
            self.search.needle().to_string()
        } else {
            pattern
        };
        self.last_substitute = Some((pattern.clone(), replacement.clone(), flags));
        self.search.set_needle(pattern.clone());

        let request = ReplaceRequest {
            pattern,
            replacement,
            match_case: flags.match_case.unwrap_or_else(|| self.search.match_case()),
            search_down: self.search.search_down(),
            selection: self.selection,
        };
        let outcome = request.replace_all(&self.text);
        if outcome.replaced == 0 {
            return CommandResult::Err(format!("E486: Pattern not found: {}", request.pattern));
        }

        self.text = outcome.text;
        self.document = self.document.with_modified();
        self.selection = Selection::caret(outcome.caret);
        let plural = if outcome.replaced == 1 { "" } else { "s" };
        CommandResult::Ok(Some(format!("{} substitution{plural}", outcome.replaced)))
    }

    fn caret_position(&self) -> String {
        position::position_of(&self.text, self.selection.start).to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use n_text::LineEnding;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn session() -> Session {
        Session::new(&Settings::default(), false)
    }

    fn session_with(text: &str) -> Session {
        let mut s = session();
        s.text = text.to_string();
        s
    }

    fn ok(result: CommandResult) -> Option<String> {
        match result {
            CommandResult::Ok(msg) => msg,
            other => panic!("expected Ok, got {other:?}"),
        }
    }

    fn err(result: CommandResult) -> String {
        match result {
            CommandResult::Err(msg) => msg,
            other => panic!("expected Err, got {other:?}"),
        }
    }

    // -- Files --------------------------------------------------------------

    #[test]
    fn open_reports_encoding_and_eol() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"\xEF\xBB\xBFone\ntwo").unwrap();

        let mut s = session();
        let msg = ok(s.run_line(&format!("e {}", path.display()))).unwrap();
        assert_eq!(msg, "\"notes.txt\" 2L, 10B [UTF-8 (BOM), Unix (LF)]");
        assert_eq!(s.text(), "one\ntwo");
        assert_eq!(s.document().eol(), LineEnding::Lf);
        assert!(!s.document().is_modified());
    }

    #[test]
    fn open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        let msg = err(s.open(&dir.path().join("gone.txt"), false));
        assert!(msg.starts_with("file not found"));
    }

    #[test]
    fn open_refuses_to_discard_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.txt");
        fs::write(&path, b"x").unwrap();

        let mut s = session();
        ok(s.run_line("a edited"));
        assert_eq!(err(s.open(&path, false)), NO_WRITE);
        assert!(ok(s.open(&path, true)).is_some());
        assert_eq!(s.text(), "x");
    }

    #[test]
    fn open_large_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, b"0123456789").unwrap();

        let settings = Settings {
            large_file_warn_bytes: 10,
            ..Settings::default()
        };
        let mut s = Session::new(&settings, false);
        assert!(err(s.open(&path, false)).contains("use e! to open anyway"));
        assert!(ok(s.open(&path, true)).is_some());

        let mut yes = Session::new(&settings, true);
        assert!(ok(yes.open(&path, false)).is_some());
    }

    #[test]
    fn open_uses_fallback_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin.txt");
        fs::write(&path, b"caf\xE9").unwrap();

        let mut s = session();
        ok(s.open(&path, false));
        assert_eq!(s.text(), "café");
        assert_eq!(s.document().encoding(), &TextEncoding::Ansi);
    }

    #[test]
    fn write_without_path() {
        let mut s = session_with("text");
        assert_eq!(err(s.run_line("w")), "E32: No file name");
    }

    #[test]
    fn write_as_normalizes_and_encodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("out.txt");

        let mut s = session_with("a\nb\rc");
        s.document.mark_modified();
        ok(s.run_line("enc utf-16le"));
        let msg = ok(s.run_line(&format!("w {}", path.display()))).unwrap();
        assert_eq!(msg, "\"out.txt\" written, 16B");

        let mut expected = vec![0xFF, 0xFE];
        for unit in "a\r\nb\r\nc".encode_utf16() {
            expected.extend(unit.to_le_bytes());
        }
        assert_eq!(fs::read(&path).unwrap(), expected);
        assert!(!s.document().is_modified());
        assert_eq!(s.document().display_name(), "out.txt");
        assert_eq!(s.document().encoding(), &TextEncoding::Utf16Le);
    }

    #[test]
    fn write_reports_unmappable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ansi.txt");

        let mut s = session_with("日本 ok");
        let msg = ok(s.cmd_write_as(&path)).unwrap();
        assert!(msg.ends_with("(2 characters written as '?')"));
        assert_eq!(fs::read(&path).unwrap(), b"?? ok");
    }

    #[test]
    fn new_resets() {
        let mut s = session_with("x");
        ok(s.run_line("eol lf"));
        ok(s.run_line("a more"));
        assert_eq!(err(s.run_line("new")), NO_WRITE);
        ok(s.run_line("new!"));
        assert_eq!(s.text(), "");
        assert_eq!(s.document(), &Document::new());
    }

    // -- Editing ------------------------------------------------------------

    #[test]
    fn append_uses_document_eol() {
        let mut s = session();
        ok(s.run_line("a first"));
        ok(s.run_line("a second"));
        assert_eq!(s.text(), "first\r\nsecond");
        ok(s.run_line("eol lf"));
        ok(s.run_line("a third"));
        assert_eq!(s.text(), "first\r\nsecond\nthird");
        assert!(s.document().is_modified());
        assert_eq!(s.document().title(), "*Untitled - n-pad");
    }

    #[test]
    fn append_after_trailing_break() {
        let mut s = session_with("one\n");
        ok(s.run_line("a two"));
        assert_eq!(s.text(), "one\ntwo");
    }

    // -- Find ---------------------------------------------------------------

    #[test]
    fn find_forward_and_wrap() {
        let mut s = session_with("cat hat cat");
        assert_eq!(ok(s.run_line("/cat")).unwrap(), "Ln 1, Col 1 [1/2]");
        assert_eq!(s.selection(), Selection::new(0, 3));
        assert_eq!(ok(s.run_line("n")).unwrap(), "Ln 1, Col 9 [2/2]");
        assert_eq!(
            ok(s.run_line("n")).unwrap(),
            "search hit BOTTOM, continuing at TOP: Ln 1, Col 1 [1/2]"
        );
    }

    #[test]
    fn find_backward_wrap_message() {
        let mut s = session_with("ab");
        // The match sits at the caret, so reaching it is not a wrap.
        assert_eq!(ok(s.run_line("?a")).unwrap(), "Ln 1, Col 1 [1/1]");
        assert_eq!(s.selection(), Selection::new(0, 1));

        let mut s = session_with("xa");
        assert_eq!(
            ok(s.run_line("?a")).unwrap(),
            "search hit TOP, continuing at BOTTOM: Ln 1, Col 2 [1/1]"
        );
    }

    #[test]
    fn find_counts_overlapping_hit_as_nearest() {
        let mut s = session_with("aaaa");
        s.selection = Selection::caret(1);
        assert_eq!(ok(s.run_line("/aa")).unwrap(), "Ln 1, Col 2 [1/2]");
    }

    #[test]
    fn find_backward_and_previous() {
        let mut s = session_with("ab ab ab");
        s.selection = Selection::caret(8);
        ok(s.run_line("?ab"));
        assert_eq!(s.selection(), Selection::new(6, 2));
        assert!(!s.search().search_down());
        ok(s.run_line("n"));
        assert_eq!(s.selection(), Selection::new(3, 2));
        // `N` reverses the remembered direction.
        ok(s.run_line("N"));
        assert_eq!(s.selection(), Selection::new(6, 2));
    }

    #[test]
    fn find_respects_case_toggle() {
        let mut s = session_with("Word word");
        ok(s.run_line("case on"));
        ok(s.run_line("/word"));
        assert_eq!(s.selection(), Selection::new(5, 4));
        ok(s.run_line("case off"));
        ok(s.run_line("n"));
        assert_eq!(s.selection(), Selection::new(0, 4));
    }

    #[test]
    fn find_errors() {
        let mut s = session_with("abc");
        assert_eq!(err(s.run_line("n")), NO_PATTERN);
        assert_eq!(err(s.run_line("/zzz")), "E486: Pattern not found: zzz");
        // An empty needle repeats the remembered one.
        assert_eq!(err(s.run_line("/")), "E486: Pattern not found: zzz");
    }

    #[test]
    fn settings_seed_search_state() {
        let settings = Settings {
            match_case: true,
            search_down: false,
            ..Settings::default()
        };
        let s = Session::new(&settings, false);
        assert!(s.search().match_case());
        assert!(!s.search().search_down());
    }

    // -- Replace ------------------------------------------------------------

    #[test]
    fn replace_once_walks_matches() {
        let mut s = session_with("cat cat");
        ok(s.run_line("/cat"));
        assert_eq!(
            ok(s.run_line("r dog")).unwrap(),
            "replaced, next match at Ln 1, Col 5"
        );
        assert_eq!(s.text(), "dog cat");
        assert_eq!(ok(s.run_line("r dog")).unwrap(), "replaced, no more matches");
        assert_eq!(s.text(), "dog dog");
        assert_eq!(s.selection(), Selection::caret(7));
        assert!(s.document().is_modified());
    }

    #[test]
    fn replace_once_without_selection_only_finds() {
        let mut s = session_with("a cat");
        ok(s.run_line("/cat"));
        s.selection = Selection::caret(0);
        assert_eq!(ok(s.run_line("r dog")).unwrap(), "Ln 1, Col 3");
        assert_eq!(s.text(), "a cat");
        assert!(!s.document().is_modified());
    }

    #[test]
    fn replace_once_needs_a_needle() {
        let mut s = session_with("x");
        assert_eq!(err(s.run_line("r y")), NO_PATTERN);
    }

    #[test]
    fn substitute_all() {
        let mut s = session_with("Foo foo FOO");
        s.selection = Selection::new(8, 3);
        assert_eq!(ok(s.run_line("s/foo/x/")).unwrap(), "3 substitutions");
        assert_eq!(s.text(), "x x x");
        assert_eq!(s.selection(), Selection::caret(5));
        assert!(s.document().is_modified());
        assert_eq!(s.search().needle(), "foo");
    }

    #[test]
    fn substitute_flags_override_toggle() {
        let mut s = session_with("Foo foo");
        assert_eq!(ok(s.run_line("s/foo/x/I")).unwrap(), "1 substitution");
        assert_eq!(s.text(), "Foo x");

        let mut s = session_with("Foo foo");
        ok(s.run_line("case on"));
        ok(s.run_line("s/foo/x/i"));
        assert_eq!(s.text(), "x x");
    }

    #[test]
    fn substitute_not_found_leaves_document_clean() {
        let mut s = session_with("abc");
        assert_eq!(err(s.run_line("s/z/y/")), "E486: Pattern not found: z");
        assert!(!s.document().is_modified());
    }

    #[test]
    fn substitute_repeat_and_empty_pattern() {
        let mut s = session_with("a-b-c");
        assert_eq!(err(s.run_line("s")), "E35: No previous substitute");
        ok(s.run_line("s/-/+/"));
        assert_eq!(s.text(), "a+b+c");
        s.text.push_str("-d");
        ok(s.run_line("s"));
        assert_eq!(s.text(), "a+b+c+d");

        ok(s.run_line("/+"));
        ok(s.run_line("s//,/"));
        assert_eq!(s.text(), "a,b,c,d");
    }

    // -- Position / status --------------------------------------------------

    #[test]
    fn goto_and_status() {
        let mut s = session_with("one\r\ntwo\r\nthree");
        assert_eq!(ok(s.run_line("goto 3")).unwrap(), "Ln 3, Col 1");
        assert_eq!(s.selection(), Selection::caret(10));
        assert_eq!(
            ok(s.run_line("status")).unwrap(),
            "Untitled - n-pad | Ln 3, Col 1 | Windows (CRLF) | ANSI"
        );
        ok(s.run_line("goto 99"));
        assert_eq!(s.selection(), Selection::caret(10));
    }

    #[test]
    fn encoding_and_eol_commands() {
        let mut s = session();
        assert_eq!(ok(s.run_line("enc utf-8-bom")).unwrap(), "encoding: UTF-8 (BOM)");
        assert_eq!(ok(s.run_line("eol cr")).unwrap(), "line ending: Mac (CR)");
        assert_eq!(s.document().eol(), LineEnding::Cr);
        assert!(!s.document().is_modified());
        assert!(err(s.run_line("enc morse")).contains("morse"));
    }

    // -- Quit / misc --------------------------------------------------------

    #[test]
    fn quit_guards_unsaved_changes() {
        let mut s = session();
        assert_eq!(s.run_line("q"), CommandResult::Quit);
        ok(s.run_line("a x"));
        assert_eq!(err(s.run_line("q")), NO_WRITE);
        assert_eq!(s.run_line("q!"), CommandResult::Quit);
    }

    #[test]
    fn unknown_and_blank_lines() {
        let mut s = session();
        assert_eq!(s.run_line(""), CommandResult::Ok(None));
        assert_eq!(err(s.run_line("frobnicate")), "E492: Not an editor command: frobnicate");
    }

    #[test]
    fn print_returns_text() {
        let mut s = session_with("line 1\nline 2");
        assert_eq!(ok(s.run_line("p")).as_deref(), Some("line 1\nline 2"));
    }
}
