use clap::Parser;
use std::path::PathBuf;

/// codecopier – tick files across directories and copy their code to the clipboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to start browsing in (defaults to CWD)
    #[arg(value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Start with ignored names (.git, node_modules, ...) visible
    #[arg(long)]
    pub show_ignored: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostics to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_browse_the_working_directory() {
        let cli = Cli::try_parse_from(["codecopier"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.show_ignored);
        assert!(cli.config.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "codecopier",
            "/srv/app",
            "--show-ignored",
            "--log-file",
            "/tmp/cc.log",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("/srv/app"));
        assert!(cli.show_ignored);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/cc.log")));
    }
}
