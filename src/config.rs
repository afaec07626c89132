//! Settings — the optional `n-pad.toml` file.
//!
//! ```toml
//! large_file_warn_bytes = 10485760
//! fallback_encoding = "utf-8"
//! match_case = false
//! search_down = true
//! ```
//!
//! The file is found through `--config`, then `$N_PAD_CONFIG`. A missing
//! file means defaults; a malformed one is an error. Every key is optional
//! and unknown keys are rejected.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use n_text::TextEncoding;
use serde::{Deserialize, Deserializer};

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "N_PAD_CONFIG";

/// Files at or above this size ask before opening.
pub const DEFAULT_LARGE_FILE_WARN_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Size at which opening a file asks for confirmation. `0` never asks.
    pub large_file_warn_bytes: u64,

    /// Encoding for files without a BOM.
    #[serde(deserialize_with = "encoding_by_name")]
    pub fallback_encoding: TextEncoding,

    /// Initial state of the match-case toggle.
    pub match_case: bool,

    /// Initial search direction.
    pub search_down: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            large_file_warn_bytes: DEFAULT_LARGE_FILE_WARN_BYTES,
            fallback_encoding: TextEncoding::Ansi,
            match_case: false,
            search_down: true,
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, else from `$N_PAD_CONFIG`, else
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Read and parse a settings file. A file that doesn't exist yields
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        Self::parse(&source).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse settings from TOML source.
    pub fn parse(source: &str) -> Result<Self> {
        let settings: Self = toml::from_str(source)?;
        debug!("settings: {settings:?}");
        Ok(settings)
    }
}

fn encoding_by_name<'de, D>(deserializer: D) -> Result<TextEncoding, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
