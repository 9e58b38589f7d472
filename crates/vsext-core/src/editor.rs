//! Editor CLI adapter
//!
//! The tool never talks to the editor directly; every operation shells out to
//! the editor's command line (`code --list-extensions`, `code --install-extension`,
//! ...). [`EditorCli`] is the seam, [`CodeCli`] the process-spawning
//! implementation.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::record::{ExtensionRecord, mark_disabled};

/// Default editor executable.
pub const DEFAULT_EDITOR: &str = "code";

/// Flags for `--list-extensions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListQuery {
    /// Append `--show-versions` (`id@version` lines).
    pub show_versions: bool,
    /// Append `--disabled` (only disabled extensions).
    pub disabled: bool,
}

impl ListQuery {
    pub fn with_versions() -> Self {
        Self {
            show_versions: true,
            disabled: false,
        }
    }

    pub fn disabled_only() -> Self {
        Self {
            show_versions: false,
            disabled: true,
        }
    }

    fn args(&self) -> Vec<&'static str> {
        let mut args = vec!["--list-extensions"];
        if self.show_versions {
            args.push("--show-versions");
        }
        if self.disabled {
            args.push("--disabled");
        }
        args
    }
}

/// Operations the tool needs from the editor's command line.
#[async_trait]
pub trait EditorCli: Send + Sync {
    /// Raw listing lines, blank lines removed.
    async fn list_extensions(&self, query: ListQuery) -> Result<Vec<String>>;

    /// Install `id`, pinned to `version` when given.
    async fn install(&self, id: &str, version: Option<&str>) -> Result<()>;

    async fn disable(&self, id: &str) -> Result<()>;
}

/// Installed extensions with versions, in editor listing order.
///
/// With `include_disabled_state`, a second listing (`--disabled`) is used to
/// mark disabled records.
pub async fn installed_extensions(
    editor: &dyn EditorCli,
    include_disabled_state: bool,
) -> Result<Vec<ExtensionRecord>> {
    let lines = editor.list_extensions(ListQuery::with_versions()).await?;
    let mut records: Vec<ExtensionRecord> = lines
        .iter()
        .map(|line| ExtensionRecord::parse_spec(line))
        .collect();

    if include_disabled_state {
        let disabled = editor.list_extensions(ListQuery::disabled_only()).await?;
        mark_disabled(&mut records, &disabled);
    }

    Ok(records)
}

/// [`EditorCli`] backed by the editor executable on `PATH`.
#[derive(Debug, Clone)]
pub struct CodeCli {
    program: String,
}

impl CodeCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the executable (handles `code.cmd` on Windows).
    fn resolve(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| Error::EditorNotFound {
            program: self.program.clone(),
        })
    }

    fn display_command(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend_from_slice(args);
        parts.join(" ")
    }

    /// Run with inherited stdout/stderr so editor progress is visible.
    async fn run_streaming(&self, args: &[&str]) -> Result<()> {
        let binary = self.resolve()?;
        let command = self.display_command(args);
        tracing::debug!(%command, "spawning editor CLI");

        let status = Command::new(&binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::io(&binary, e))?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command,
                exit_code: status.code(),
            });
        }
        Ok(())
    }
}

impl Default for CodeCli {
    fn default() -> Self {
        Self::new(DEFAULT_EDITOR)
    }
}

#[async_trait]
impl EditorCli for CodeCli {
    async fn list_extensions(&self, query: ListQuery) -> Result<Vec<String>> {
        let binary = self.resolve()?;
        let args = query.args();
        let command = self.display_command(&args);
        tracing::debug!(%command, "listing extensions");

        let output = Command::new(&binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::io(&binary, e))?;

        if !output.status.success() {
            return Err(Error::ListFailed {
                command,
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(listing_lines(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn install(&self, id: &str, version: Option<&str>) -> Result<()> {
        let spec = match version {
            Some(version) => format!("{id}@{version}"),
            None => id.to_string(),
        };
        self.run_streaming(&["--install-extension", spec.as_str()]).await
    }

    async fn disable(&self, id: &str) -> Result<()> {
        self.run_streaming(&["--disable-extension", id]).await
    }
}

/// Non-empty, trimmed lines of a listing (tolerates `\r\n`).
fn listing_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
