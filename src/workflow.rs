use crate::clipboard::SystemClipboard;
use crate::config::ConfigFile;
use crate::session::Session;
use crate::{cli, logging, tui};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;

/// Settings after merging the config file with command-line flags.
#[derive(Debug)]
struct StartupOptions {
    start_dir: PathBuf,
    hide_ignored: bool,
    ignore_patterns: HashSet<String>,
    log_file: Option<PathBuf>,
    log_level: String,
}

fn load_config(cli_args: &cli::Cli) -> Result<ConfigFile> {
    match &cli_args.config {
        // An explicitly requested file must be valid.
        Some(path) => ConfigFile::load_from(path),
        None => Ok(ConfigFile::load()),
    }
}

fn determine_startup_options(cli_args: &cli::Cli, config: ConfigFile) -> Result<StartupOptions> {
    let start_dir = cli_args
        .root
        .canonicalize()
        .with_context(|| format!("cannot open start directory {}", cli_args.root.display()))?;

    Ok(StartupOptions {
        start_dir,
        hide_ignored: config.browser.hide_ignored && !cli_args.show_ignored,
        ignore_patterns: config.browser.ignore_set(),
        log_file: cli_args.log_file.clone().or(config.logging.file),
        log_level: config.logging.level,
    })
}

// Prints export text that never reached the clipboard, for manual copying.
fn print_pending_output(text: &str) {
    println!("\n--- Content to copy (manual copy if clipboard failed) ---\n");
    println!("{}", text);
    println!("\n--------------------------------------------------------\n");
}

// Main orchestrator for the codecopier application logic.
pub fn run_codecopier(cli_args: cli::Cli) -> Result<()> {
    let config = load_config(&cli_args)?;
    let options = determine_startup_options(&cli_args, config)?;
    logging::init_logging(options.log_file.as_deref(), &options.log_level)?;

    tracing::info!(
        "Starting in {} (hide ignored: {})",
        options.start_dir.display(),
        options.hide_ignored
    );

    let session = Session::new(
        options.start_dir,
        options.ignore_patterns,
        options.hide_ignored,
        Box::new(SystemClipboard),
    );

    let mut session = tui::run_tui(session)?;

    if let Some(text) = session.take_pending_output() {
        print_pending_output(&text);
    }

    tracing::info!(
        "Exiting with {} file(s) selected",
        session.selection().count()
    );
    Ok(())
}
