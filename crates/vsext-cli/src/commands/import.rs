//! `vscode-ext import <filename> [--concurrency N]`

use std::num::NonZeroUsize;

use vsext_core::{BatchInstaller, InstallOptions, read_manifest, validate_import_path};

use crate::context::CommandContext;
use crate::error::Result;

/// Install every extension listed in the manifest at `filename`.
///
/// `filename` is a path relative to the working directory, so a manifest can
/// be replayed from wherever it was copied to. Missing or malformed manifests fail before any install starts. Once the
/// batch runs, individual install failures are only reported; the import
/// itself still succeeds.
pub async fn run_import(
    ctx: &CommandContext<'_>,
    filename: &str,
    concurrency: NonZeroUsize,
) -> Result<()> {
    let path = ctx.working_dir.join(validate_import_path(filename)?);
    let manifest = read_manifest(&path)?;

    ctx.reporter
        .info(format!("Importing {} extensions...", manifest.len()));

    let installer = BatchInstaller::new(
        ctx.editor,
        InstallOptions {
            concurrency,
            dry_run: ctx.dry_run,
            quiet: ctx.reporter.is_quiet(),
        },
    );
    installer.run(manifest.records(), ctx.reporter).await;

    ctx.reporter.success("Import complete");
    Ok(())
}
