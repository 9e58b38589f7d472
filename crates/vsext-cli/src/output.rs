//! User-facing output
//!
//! Every line a command prints goes through [`Reporter`], which applies
//! `--quiet` and colors. Warnings are never silenced. A capturing reporter
//! records plain (uncolored) lines instead of printing, for tests.

use std::sync::Mutex;

use colored::Colorize;
use vsext_core::{InstallAction, InstallEvent, InstallObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Heading,
    Info,
    Success,
    Warning,
}

#[derive(Debug)]
pub struct Reporter {
    quiet: bool,
    captured: Option<Mutex<Vec<String>>>,
}

impl Reporter {
    /// Reporter that prints to stdout (warnings to stderr).
    pub fn stdout(quiet: bool) -> Self {
        Self {
            quiet,
            captured: None,
        }
    }

    /// Reporter that records lines in memory.
    pub fn capturing(quiet: bool) -> Self {
        Self {
            quiet,
            captured: Some(Mutex::new(Vec::new())),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn heading(&self, message: impl AsRef<str>) {
        self.emit(Level::Heading, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(Level::Info, message.as_ref());
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.emit(Level::Success, message.as_ref());
    }

    /// Printed even in quiet mode.
    pub fn warning(&self, message: impl AsRef<str>) {
        self.emit(Level::Warning, message.as_ref());
    }

    /// `[DRY RUN] <message>`
    pub fn dry_run(&self, message: impl AsRef<str>) {
        self.info(format!("[DRY RUN] {}", message.as_ref()));
    }

    /// Captured lines (empty for a printing reporter).
    pub fn lines(&self) -> Vec<String> {
        match &self.captured {
            Some(lines) => lines.lock().map(|lines| lines.clone()).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    fn emit(&self, level: Level, message: &str) {
        if self.quiet && level != Level::Warning {
            return;
        }

        if let Some(captured) = &self.captured {
            if let Ok(mut lines) = captured.lock() {
                lines.push(message.to_string());
            }
            return;
        }

        match level {
            Level::Heading => println!("{}", message.bold()),
            Level::Info => println!("{message}"),
            Level::Success => println!("{} {}", "✓".green().bold(), message),
            Level::Warning => eprintln!("{} {}", "warning:".yellow().bold(), message),
        }
    }
}

impl InstallObserver for Reporter {
    fn on_event(&self, event: &InstallEvent) {
        match event {
            InstallEvent::BatchStarted { total, chunks } => {
                tracing::debug!(total, chunks, "batch started");
            }
            InstallEvent::Dispatched {
                position,
                total,
                spec,
            } => self.info(format!("[{position}/{total}] Starting {spec}")),
            InstallEvent::WouldInstall { spec } => self.dry_run(format!("Would install {spec}")),
            InstallEvent::WouldDisable { id } => self.dry_run(format!("Would disable {id}")),
            InstallEvent::Installing { spec } => self.info(format!("Installing {spec}...")),
            InstallEvent::Disabling { id } => self.info(format!("Disabling {id}...")),
            InstallEvent::Failed {
                action,
                spec,
                reason,
            } => {
                let verb = match action {
                    InstallAction::Install => "install",
                    InstallAction::Disable => "disable",
                };
                self.warning(format!("Failed to {verb} {spec}: {reason}"));
            }
        }
    }
}
