//! # n-pad — the editor host
//!
//! The pieces the `n-pad` binary drives, exposed so they can be tested
//! against real files:
//!
//! - **[`command`]** — parsing one input line into a `Command`
//! - **[`session`]** — `Session`, the open document plus its text and caret
//! - **[`file`]** — reading and writing bytes, large-file confirmation
//! - **[`config`]** — `Settings` from `n-pad.toml`
//!
//! The document model itself lives in the `n-text` crate.

pub mod command;
pub mod config;
pub mod file;
pub mod session;
