//! VS Code Extension Manager CLI
//!
//! Exports the installed extension set to a JSON manifest, replays a manifest
//! on another machine, and lists what is installed, all by driving the
//! editor's own command line.
//!
//! Only this module decides the process exit code: 0 on success, 1 for every
//! failure, a declined overwrite, or a missing/unknown command.

mod cli;
mod commands;
mod context;
mod error;
mod logging;
mod output;
mod prompt;
mod settings;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use vsext_core::{CodeCli, ManifestFormat, ManifestStore, default_export_filename};

use cli::{Cli, Commands};
use context::CommandContext;
use error::{CliError, Result};
use output::Reporter;
use prompt::{ConfirmGate, FixedAnswer, TerminalGate};
use settings::{Settings, load_config};

fn main() {
    let code = match run() {
        Ok(()) => 0,
        Err(CliError::Usage(e)) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            }
        }
        Err(CliError::MissingCommand) => {
            let _ = Cli::command().print_long_help();
            1
        }
        Err(CliError::Cancelled { message }) => {
            println!("{} {}", "✗".yellow().bold(), message);
            1
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            1
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::try_parse()?;

    if cli.verbose || std::env::var_os("RUST_LOG").is_some() {
        if let Err(e) = logging::init(cli.verbose) {
            eprintln!("{} failed to initialise logging: {e}", "warning:".yellow().bold());
        }
        tracing::debug!("Verbose mode enabled");
    }

    let Some(command) = cli.command.clone() else {
        return Err(CliError::MissingCommand);
    };

    let config = load_config(cli.config.as_deref(), &Reporter::stdout(cli.quiet));
    let settings = Settings::resolve(&cli, &config);
    tracing::debug!(?settings, "resolved settings");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute_command(command, &settings))
}

async fn execute_command(command: Commands, settings: &Settings) -> Result<()> {
    let editor = CodeCli::new(settings.editor.clone());
    let store = ManifestStore::new(settings.output_dir.clone());
    let reporter = Reporter::stdout(settings.quiet);
    let ctx = CommandContext::new(&editor, &store, &reporter).with_dry_run(settings.dry_run);

    match command {
        Commands::Export {
            filename,
            exact,
            yes,
        } => {
            let filename = filename.unwrap_or_else(default_export_filename);
            let format = ManifestFormat::from_exact(exact || settings.exact);
            let auto_yes = FixedAnswer(true);
            let gate: &dyn ConfirmGate = if yes { &auto_yes } else { &TerminalGate };
            commands::run_export(&ctx, gate, &filename, format).await
        }
        Commands::Import {
            filename,
            concurrency,
        } => {
            let concurrency = concurrency.unwrap_or(settings.concurrency);
            commands::run_import(&ctx, &filename, concurrency).await
        }
        Commands::List => commands::run_list(&ctx).await,
    }
}
