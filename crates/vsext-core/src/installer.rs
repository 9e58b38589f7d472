//! Chunked, concurrency-limited batch installation.
//!
//! Records are split into consecutive chunks of `concurrency` entries. Chunks
//! run strictly one after another; the entries of a chunk are installed
//! concurrently and the next chunk starts only once every entry of the current
//! one has settled. Peak concurrency therefore never exceeds the limit.
//!
//! A failing entry is reported through [`InstallEvent::Failed`] and a
//! `tracing` warning; it never aborts the batch and is not returned to the
//! caller.

use std::num::NonZeroUsize;

use futures_util::future::join_all;

use crate::editor::EditorCli;
use crate::record::ExtensionRecord;

/// Concurrency used when nothing else is configured.
pub const DEFAULT_CONCURRENCY: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(n) => n,
    None => unreachable!(),
};

/// The editor operation an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    Install,
    Disable,
}

/// Progress and outcome notifications emitted by [`BatchInstaller::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    BatchStarted { total: usize, chunks: usize },

    /// An entry is about to start. `position` counts dispatched entries
    /// (1-based), not finished ones.
    Dispatched {
        position: usize,
        total: usize,
        spec: String,
    },

    WouldInstall { spec: String },
    WouldDisable { id: String },
    Installing { spec: String },
    Disabling { id: String },

    Failed {
        action: InstallAction,
        spec: String,
        reason: String,
    },
}

impl InstallEvent {
    /// Failures are reported even in quiet mode.
    pub fn is_failure(&self) -> bool {
        matches!(self, InstallEvent::Failed { .. })
    }
}

/// Receives [`InstallEvent`]s. Must tolerate calls from interleaved entries of
/// the same chunk.
pub trait InstallObserver: Sync {
    fn on_event(&self, event: &InstallEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl InstallObserver for NoopObserver {
    fn on_event(&self, _event: &InstallEvent) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOptions {
    pub concurrency: NonZeroUsize,
    /// Replace every editor invocation with a `Would*` event.
    pub dry_run: bool,
    /// Suppress everything except failures.
    pub quiet: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            dry_run: false,
            quiet: false,
        }
    }
}

pub struct BatchInstaller<'a> {
    editor: &'a dyn EditorCli,
    options: InstallOptions,
}

impl<'a> BatchInstaller<'a> {
    pub fn new(editor: &'a dyn EditorCli, options: InstallOptions) -> Self {
        Self { editor, options }
    }

    /// Number of sequential chunks needed for `total` records.
    pub fn chunk_count(&self, total: usize) -> usize {
        total.div_ceil(self.options.concurrency.get())
    }

    /// Install every record. Resolves once the last chunk has settled.
    pub async fn run(&self, records: &[ExtensionRecord], observer: &dyn InstallObserver) {
        let total = records.len();
        self.emit(
            observer,
            InstallEvent::BatchStarted {
                total,
                chunks: self.chunk_count(total),
            },
        );

        let mut dispatched = 0;
        for (index, chunk) in records.chunks(self.options.concurrency.get()).enumerate() {
            tracing::debug!(chunk = index, size = chunk.len(), "starting chunk");

            let operations: Vec<_> = chunk
                .iter()
                .map(|record| {
                    dispatched += 1;
                    self.emit(
                        observer,
                        InstallEvent::Dispatched {
                            position: dispatched,
                            total,
                            spec: record.install_spec(),
                        },
                    );
                    self.install_one(record, observer)
                })
                .collect();

            join_all(operations).await;
        }
    }

    async fn install_one(&self, record: &ExtensionRecord, observer: &dyn InstallObserver) {
        let spec = record.install_spec();

        if self.options.dry_run {
            self.emit(observer, InstallEvent::WouldInstall { spec });
            if record.disabled {
                self.emit(
                    observer,
                    InstallEvent::WouldDisable {
                        id: record.id.clone(),
                    },
                );
            }
            return;
        }

        self.emit(observer, InstallEvent::Installing { spec: spec.clone() });
        if let Err(e) = self
            .editor
            .install(&record.id, record.version.as_deref())
            .await
        {
            tracing::warn!(extension = %spec, error = %e, "install failed");
            self.emit(
                observer,
                InstallEvent::Failed {
                    action: InstallAction::Install,
                    spec,
                    reason: e.to_string(),
                },
            );
            return;
        }

        if record.disabled {
            self.emit(
                observer,
                InstallEvent::Disabling {
                    id: record.id.clone(),
                },
            );
            if let Err(e) = self.editor.disable(&record.id).await {
                tracing::warn!(extension = %record.id, error = %e, "disable failed");
                self.emit(
                    observer,
                    InstallEvent::Failed {
                        action: InstallAction::Disable,
                        spec: record.id.clone(),
                        reason: e.to_string(),
                    },
                );
            }
        }
    }

    fn emit(&self, observer: &dyn InstallObserver, event: InstallEvent) {
        if self.options.quiet && !event.is_failure() {
            return;
        }
        observer.on_event(&event);
    }
}
