//! Open, edit and save real files through a `Session`.
//!
//! Every test works in its own temporary directory and checks the bytes that
//! land on disk.

use std::fs;
use std::path::Path;

use n_pad::command::CommandResult;
use n_pad::config::Settings;
use n_pad::session::Session;
use n_text::{LineEnding, TextEncoding};
use pretty_assertions::assert_eq;

fn session() -> Session {
    Session::new(&Settings::default(), false)
}

fn run(session: &mut Session, line: &str) {
    match session.run_line(line) {
        CommandResult::Err(msg) => panic!("{line:?} failed: {msg}"),
        CommandResult::Ok(_) | CommandResult::Quit => {}
    }
}

fn open(session: &mut Session, path: &Path) {
    run(session, &format!("e {}", path.display()));
}

fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend(unit.to_le_bytes());
    }
    bytes
}

#[test]
fn unchanged_file_saves_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let cases: [(&str, Vec<u8>); 4] = [
        ("bom.txt", b"\xEF\xBB\xBFhello\r\nworld\r\n".to_vec()),
        ("lf.txt", b"one\ntwo\n".to_vec()),
        ("ansi.txt", b"na\xEFve caf\xE9\r\n".to_vec()),
        ("wide.txt", utf16le("a\r\nb")),
    ];

    for (name, bytes) in cases {
        let path = dir.path().join(name);
        fs::write(&path, &bytes).unwrap();

        let mut s = session();
        open(&mut s, &path);
        run(&mut s, "w");
        assert_eq!(fs::read(&path).unwrap(), bytes, "{name}");
    }
}

#[test]
fn mixed_line_endings_collapse_to_detected_style() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.txt");
    fs::write(&path, b"a\r\nb\nc\rd").unwrap();

    let mut s = session();
    open(&mut s, &path);
    assert_eq!(s.document().eol(), LineEnding::CrLf);
    run(&mut s, "w");
    assert_eq!(fs::read(&path).unwrap(), b"a\r\nb\r\nc\r\nd");
}

#[test]
fn convert_encoding_and_line_ending() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("dos.txt");
    let dst = dir.path().join("out").join("unix.txt");
    fs::write(&src, b"x\r\ny\r\n").unwrap();

    let mut s = session();
    open(&mut s, &src);
    run(&mut s, "eol lf");
    run(&mut s, "enc utf-8-bom");
    run(&mut s, &format!("w {}", dst.display()));

    assert_eq!(fs::read(&dst).unwrap(), b"\xEF\xBB\xBFx\ny\n");
    assert_eq!(fs::read(&src).unwrap(), b"x\r\ny\r\n");
    assert_eq!(s.document().path(), Some(dst.as_path()));

    // Reopening sees what was written.
    let mut again = session();
    open(&mut again, &dst);
    assert_eq!(again.document().encoding(), &TextEncoding::Utf8 { bom: true });
    assert_eq!(again.document().eol(), LineEnding::Lf);
    assert_eq!(again.text(), "x\ny\n");
}

#[test]
fn replace_all_then_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pets.txt");
    fs::write(&path, b"Cat\ncat\nCAT").unwrap();

    let mut s = session();
    open(&mut s, &path);
    run(&mut s, "s/cat/dog/");
    assert!(s.document().is_modified());
    assert_eq!(s.document().title(), "*pets.txt - n-pad");
    run(&mut s, "w");
    assert!(!s.document().is_modified());
    assert_eq!(fs::read(&path).unwrap(), b"dog\ndog\ndog");
}

#[test]
fn utf32_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("u32.txt");

    let mut s = session();
    run(&mut s, "a 𝄞 clef");
    run(&mut s, "enc utf-32be");
    run(&mut s, &format!("w {}", path.display()));

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], &[0x00, 0x00, 0xFE, 0xFF]);
    assert_eq!(&bytes[4..8], &[0x00, 0x01, 0xD1, 0x1E]);

    let mut again = session();
    open(&mut again, &path);
    assert_eq!(again.text(), "𝄞 clef");
    assert_eq!(again.document().encoding(), &TextEncoding::Utf32Be);
}

#[test]
fn fallback_encoding_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.txt");
    fs::write(&path, "żółw".as_bytes()).unwrap();

    let settings = Settings {
        fallback_encoding: TextEncoding::Utf8 { bom: false },
        ..Settings::default()
    };
    let mut s = Session::new(&settings, false);
    open(&mut s, &path);
    assert_eq!(s.text(), "żółw");
    run(&mut s, "w");
    assert_eq!(fs::read(&path).unwrap(), "żółw".as_bytes());
}
