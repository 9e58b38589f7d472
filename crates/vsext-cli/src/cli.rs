//! CLI argument parsing using clap derive

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// VS Code Extension Manager - export, import and list installed extensions
#[derive(Parser, Debug)]
#[command(name = "vscode-ext")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Reduce output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show what would be done without making changes
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ~/.vscode-ext-config.json)
    #[arg(long, global = true, env = "VSEXT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Editor executable to drive
    #[arg(long, global = true, env = "VSEXT_EDITOR", value_name = "PROGRAM")]
    pub editor: Option<String>,

    /// Directory that holds exported manifests
    #[arg(long, global = true, env = "VSEXT_OUTPUT_DIR", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Export installed extensions to a JSON file
    ///
    /// Examples:
    ///   vscode-ext export                 # vscode-extensions-<timestamp>.json
    ///   vscode-ext export work.json       # Named manifest
    ///   vscode-ext export --exact         # Include disabled state
    Export {
        /// Manifest filename inside the output directory
        filename: Option<String>,

        /// Write {id, version, disabled} records instead of id@version strings
        #[arg(long)]
        exact: bool,

        /// Overwrite an existing file without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Install extensions from a JSON file
    ///
    /// Examples:
    ///   vscode-ext import work.json
    ///   vscode-ext import work.json --dry-run
    Import {
        /// Manifest filename inside the output directory
        filename: String,

        /// Number of installs to run at the same time
        #[arg(short, long, value_name = "N")]
        concurrency: Option<NonZeroUsize>,
    },

    /// List currently installed extensions with versions
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_with_flags() {
        let cli = Cli::try_parse_from(["vscode-ext", "export", "mine.json", "--exact", "--dry-run"])
            .unwrap();
        assert!(cli.dry_run);
        assert_eq!(
            cli.command,
            Some(Commands::Export {
                filename: Some("mine.json".into()),
                exact: true,
                yes: false,
            })
        );
    }

    #[test]
    fn test_parse_import_concurrency() {
        let cli =
            Cli::try_parse_from(["vscode-ext", "--quiet", "import", "a.json", "-c", "5"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(
            cli.command,
            Some(Commands::Import {
                filename: "a.json".into(),
                concurrency: NonZeroUsize::new(5),
            })
        );
    }

    #[test]
    fn test_import_requires_filename() {
        assert!(Cli::try_parse_from(["vscode-ext", "import"]).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(Cli::try_parse_from(["vscode-ext", "import", "a.json", "-c", "0"]).is_err());
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["vscode-ext", "frobnicate"]).is_err());
    }

    #[test]
    fn test_no_command_parses_to_none() {
        let cli = Cli::try_parse_from(["vscode-ext"]).unwrap();
        assert_eq!(cli.command, None);
    }
}
