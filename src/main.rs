// SPDX-License-Identifier: MIT
//
// n-pad — a plain-text editor that keeps encodings and line endings intact.
//
// This is the main binary that wires together:
//
//   n-text  → encoding detection, line endings, document metadata, find/replace
//   file    → reading and writing bytes
//   config  → n-pad.toml settings
//   session → the open document, its text and caret, driven by commands
//
// Each input line flows through:
//
//   stdin / --script → command::parse → Session::execute → message on stdout
//
// Errors from a single command are printed to stderr and the loop continues.
// Only startup failures (bad settings, unreadable script) end the process.

use std::fs;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use n_text::TextEncoding;

use n_pad::command::CommandResult;
use n_pad::config::Settings;
use n_pad::session::Session;

#[derive(Debug, Parser)]
#[command(name = "n-pad", version)]
#[command(about = "A plain-text editor that keeps encodings and line endings intact")]
struct Cli {
    /// File to open. A path that doesn't exist starts an untitled document.
    file: Option<PathBuf>,

    /// Line to put the caret on after opening FILE (1-indexed)
    #[arg(short, long, value_name = "N")]
    line: Option<usize>,

    /// Settings file (defaults to $N_PAD_CONFIG)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Encoding for files without a byte-order mark
    #[arg(long, value_name = "NAME")]
    fallback_encoding: Option<TextEncoding>,

    /// Answer yes to discard and large-file prompts
    #[arg(short, long)]
    yes: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("n-pad: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(encoding) = cli.fallback_encoding {
        settings.fallback_encoding = encoding;
    }

    let mut session = Session::new(&settings, cli.yes);

    if let Some(path) = &cli.file {
        if path.exists() {
            report(session.open(path, false));
            if let Some(line) = cli.line {
                report(session.run_line(&format!("goto {line}")));
            }
        } else {
            warn!("{} does not exist, starting untitled", path.display());
        }
    }

    match &cli.script {
        Some(script) => {
            let file = fs::File::open(script)
                .with_context(|| format!("failed to open script {}", script.display()))?;
            repl(&mut session, BufReader::new(file), false)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            repl(&mut session, stdin.lock(), interactive)
        }
    }
}

/// Feed lines to the session until `q` or end of input.
fn repl(session: &mut Session, input: impl BufRead, interactive: bool) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if interactive {
            print!(":");
            io::stdout().flush().context("failed to write prompt")?;
        }
        let Some(line) = lines.next() else {
            if session.document().is_modified() {
                warn!("end of input with unsaved changes in {}", session.document().display_name());
            }
            return Ok(());
        };
        let line = line.context("failed to read command")?;
        if report(session.run_line(&line)) {
            info!("quit");
            return Ok(());
        }
    }
}

/// Print a command's outcome. Returns true when the session should end.
fn report(result: CommandResult) -> bool {
    match result {
        CommandResult::Ok(Some(msg)) => {
            println!("{msg}");
            false
        }
        CommandResult::Ok(None) => false,
        CommandResult::Err(msg) => {
            eprintln!("{msg}");
            false
        }
        CommandResult::Quit => true,
    }
}
