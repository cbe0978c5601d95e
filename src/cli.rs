use std::path::PathBuf;

use clap::Parser;

/// Searchable clipboard history view, driven over JSON lines on stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "clipview", version)]
pub struct Cli {
    /// Config file (default: <config_dir>/clipview/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// History file to load, overrides `[history] path`
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Log to stderr only, skip the log file
    #[arg(long)]
    pub no_log_file: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["clipview"]);
        assert!(cli.config.is_none());
        assert!(cli.history.is_none());
        assert!(!cli.no_log_file);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from([
            "clipview",
            "--config",
            "/etc/clipview.toml",
            "--history",
            "clips.json",
            "--no-log-file",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/clipview.toml")));
        assert_eq!(cli.history, Some(PathBuf::from("clips.json")));
        assert!(cli.no_log_file);
    }
}
