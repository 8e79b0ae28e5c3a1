//! codecopier - browse directories, tick files, copy their code
//!
//! The selection is kept per absolute path, so files ticked in one directory
//! stay ticked while the user browses elsewhere. Copying concatenates every
//! ticked file behind a `# --- File: <path> ---` header.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod file_scanner;
pub mod logging;
pub mod selection;
pub mod session;
pub mod tui;
pub mod utils;
pub mod workflow;
