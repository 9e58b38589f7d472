//! Shared test utilities for the vscode-ext workspace.
//!
//! This crate provides fixtures so crate test suites do not each grow their
//! own editor doubles. It is a dev-dependency only, never published.
//!
//! - [`FakeEditor`]: scripted [`EditorCli`] that records every call
//! - [`RecordingObserver`]: collects [`InstallEvent`]s in emission order

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use vsext_core::{EditorCli, Error, InstallEvent, InstallObserver, ListQuery, Result};

/// One observed interaction with a [`FakeEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCall {
    List(ListQuery),
    /// Install began for the given `id[@version]` spec.
    InstallStarted(String),
    /// Install settled (successfully or not) for the given spec.
    InstallFinished(String),
    Disable(String),
}

/// In-memory stand-in for the editor CLI.
///
/// Installs yield to the scheduler a few times between their `Started` and
/// `Finished` markers so that concurrently polled installs interleave the way
/// real child processes would.
#[derive(Debug, Default)]
pub struct FakeEditor {
    installed: Vec<String>,
    disabled: Vec<String>,
    failing_installs: HashSet<String>,
    failing_disables: HashSet<String>,
    list_fails: bool,
    calls: Mutex<Vec<EditorCall>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines returned by `--list-extensions --show-versions`.
    pub fn with_installed(mut self, lines: &[&str]) -> Self {
        self.installed = lines.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Ids returned by `--list-extensions --disabled`.
    pub fn with_disabled(mut self, ids: &[&str]) -> Self {
        self.disabled = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Make installing `spec` (`id` or `id@version`) fail.
    pub fn failing_install(mut self, spec: &str) -> Self {
        self.failing_installs.insert(spec.to_string());
        self
    }

    pub fn failing_disable(mut self, id: &str) -> Self {
        self.failing_disables.insert(id.to_string());
        self
    }

    /// Make every listing fail.
    pub fn failing_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<EditorCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Specs in the order their installs started.
    pub fn install_starts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EditorCall::InstallStarted(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    pub fn disables(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EditorCall::Disable(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Highest number of installs that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: EditorCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl EditorCli for FakeEditor {
    async fn list_extensions(&self, query: ListQuery) -> Result<Vec<String>> {
        self.record(EditorCall::List(query));
        if self.list_fails {
            return Err(Error::ListFailed {
                command: "code --list-extensions".to_string(),
                exit_code: Some(1),
                stderr: "fake listing failure".to_string(),
            });
        }
        if query.disabled {
            Ok(self.disabled.clone())
        } else if query.show_versions {
            Ok(self.installed.clone())
        } else {
            Ok(self
                .installed
                .iter()
                .map(|line| line.split('@').next().unwrap_or(line).to_string())
                .collect())
        }
    }

    async fn install(&self, id: &str, version: Option<&str>) -> Result<()> {
        let spec = match version {
            Some(version) => format!("{id}@{version}"),
            None => id.to_string(),
        };

        self.record(EditorCall::InstallStarted(spec.clone()));
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        for _ in 0..3 {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.record(EditorCall::InstallFinished(spec.clone()));

        if self.failing_installs.contains(&spec) {
            return Err(Error::CommandFailed {
                command: format!("code --install-extension {spec}"),
                exit_code: Some(1),
            });
        }
        Ok(())
    }

    async fn disable(&self, id: &str) -> Result<()> {
        self.record(EditorCall::Disable(id.to_string()));
        if self.failing_disables.contains(id) {
            return Err(Error::CommandFailed {
                command: format!("code --disable-extension {id}"),
                exit_code: Some(1),
            });
        }
        Ok(())
    }
}

/// Collects installer events.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<InstallEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<InstallEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl InstallObserver for RecordingObserver {
    fn on_event(&self, event: &InstallEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
