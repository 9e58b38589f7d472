//! `vscode-ext export [filename] [--exact]`

use vsext_core::{Manifest, ManifestFormat, installed_extensions};

use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::prompt::ConfirmGate;

/// Export the installed extensions to `filename` inside the output directory.
///
/// The filename is validated before anything else happens. An existing file
/// is only replaced after `gate` confirms; in dry-run mode nothing on disk is
/// created or modified and the gate is never consulted.
pub async fn run_export(
    ctx: &CommandContext<'_>,
    gate: &dyn ConfirmGate,
    filename: &str,
    format: ManifestFormat,
) -> Result<()> {
    let path = ctx.store.resolve(filename)?;
    let output_dir = ctx.store.output_dir();

    if !ctx.store.output_dir_exists() {
        if ctx.dry_run {
            ctx.reporter
                .dry_run(format!("Would create directory: {}", output_dir.display()));
        } else {
            ctx.store.ensure_output_dir()?;
        }
    }

    if path.exists() && !ctx.dry_run {
        let question = format!("{filename} already exists. Overwrite?");
        if !gate.confirm(&question)? {
            return Err(CliError::cancelled("Export canceled."));
        }
    }

    let records = installed_extensions(ctx.editor, format == ManifestFormat::Exact).await?;
    let manifest = Manifest::new(records);

    if ctx.dry_run {
        ctx.reporter.dry_run(format!(
            "Would export {} extensions to {}",
            manifest.len(),
            path.display()
        ));
        return Ok(());
    }

    let written = ctx.store.write(filename, &manifest, format)?;
    ctx.reporter.success(format!(
        "Exported {} extensions to {}",
        manifest.len(),
        written.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Reporter;
    use crate::prompt::FixedAnswer;
    use std::fs;
    use tempfile::TempDir;
    use vsext_core::{Error, ManifestStore, read_manifest};
    use vsext_test_utils::FakeEditor;

    fn editor() -> FakeEditor {
        FakeEditor::new()
            .with_installed(&["foo.bar@1.0.0", "baz.qux@2.1.0"])
            .with_disabled(&["baz.qux"])
    }

    /// Panics if consulted.
    struct NoPrompt;

    impl ConfirmGate for NoPrompt {
        fn confirm(&self, question: &str) -> Result<bool> {
            panic!("unexpected prompt: {question}");
        }
    }

    #[tokio::test]
    async fn test_export_writes_identifiers() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path().join("output"));
        let reporter = Reporter::capturing(false);
        let editor = editor();
        let ctx = CommandContext::new(&editor, &store, &reporter);

        run_export(&ctx, &NoPrompt, "mine.json", ManifestFormat::Identifiers)
            .await
            .unwrap();

        let content = fs::read_to_string(temp.path().join("output/mine.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!(["foo.bar@1.0.0", "baz.qux@2.1.0"]));
        assert!(reporter.lines()[0].starts_with("Exported 2 extensions to "));
    }

    #[tokio::test]
    async fn test_export_exact_marks_disabled() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path());
        let reporter = Reporter::capturing(true);
        let editor = editor();
        let ctx = CommandContext::new(&editor, &store, &reporter);

        run_export(&ctx, &NoPrompt, "exact.json", ManifestFormat::Exact)
            .await
            .unwrap();

        let manifest = read_manifest(&temp.path().join("exact.json")).unwrap();
        assert!(!manifest.records()[0].disabled);
        assert!(manifest.records()[1].disabled);
    }

    #[tokio::test]
    async fn test_dry_run_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("output");
        let store = ManifestStore::new(&output_dir);
        let reporter = Reporter::capturing(false);
        let editor = editor();
        let ctx = CommandContext::new(&editor, &store, &reporter).with_dry_run(true);

        run_export(&ctx, &NoPrompt, "dry.json", ManifestFormat::Identifiers)
            .await
            .unwrap();

        assert!(!output_dir.exists());
        let lines = reporter.lines();
        assert_eq!(
            lines[0],
            format!("[DRY RUN] Would create directory: {}", output_dir.display())
        );
        assert!(lines[1].starts_with("[DRY RUN] Would export 2 extensions to "));
    }

    #[tokio::test]
    async fn test_dry_run_leaves_existing_file_alone() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path());
        let existing = temp.path().join("keep.json");
        fs::write(&existing, "[\"old.one\"]").unwrap();
        let reporter = Reporter::capturing(false);
        let editor = editor();
        let ctx = CommandContext::new(&editor, &store, &reporter).with_dry_run(true);

        run_export(&ctx, &NoPrompt, "keep.json", ManifestFormat::Identifiers)
            .await
            .unwrap();

        assert_eq!(fs::read_to_string(&existing).unwrap(), "[\"old.one\"]");
    }

    #[tokio::test]
    async fn test_declined_overwrite_is_cancelled() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path());
        let existing = temp.path().join("keep.json");
        fs::write(&existing, "[]").unwrap();
        let reporter = Reporter::capturing(false);
        let editor = editor();
        let ctx = CommandContext::new(&editor, &store, &reporter);

        let err = run_export(&ctx, &FixedAnswer(false), "keep.json", ManifestFormat::Identifiers)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Cancelled { .. }));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "[]");
        assert!(editor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_overwrite_replaces_file() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path());
        fs::write(temp.path().join("list.json"), "[]").unwrap();
        let reporter = Reporter::capturing(false);
        let editor = editor();
        let ctx = CommandContext::new(&editor, &store, &reporter);

        run_export(&ctx, &FixedAnswer(true), "list.json", ManifestFormat::Identifiers)
            .await
            .unwrap();

        assert_eq!(read_manifest(&temp.path().join("list.json")).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_filename_fails_before_touching_disk() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("output");
        let store = ManifestStore::new(&output_dir);
        let reporter = Reporter::capturing(false);
        let editor = editor();
        let ctx = CommandContext::new(&editor, &store, &reporter);

        let err = run_export(&ctx, &NoPrompt, "../escape.json", ManifestFormat::Identifiers)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Core(Error::InvalidFilename { .. })));
        assert!(!output_dir.exists());
        assert!(editor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dot_filename_rejected() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path());
        let reporter = Reporter::capturing(false);
        let editor = editor();
        let ctx = CommandContext::new(&editor, &store, &reporter);

        let err = run_export(&ctx, &FixedAnswer(true), ".", ManifestFormat::Identifiers)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Core(Error::InvalidFilename { .. })));
        assert!(editor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path());
        let reporter = Reporter::capturing(false);
        let editor = FakeEditor::new().failing_list();
        let ctx = CommandContext::new(&editor, &store, &reporter);

        let err = run_export(&ctx, &NoPrompt, "x.json", ManifestFormat::Identifiers)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Core(Error::ListFailed { .. })));
        assert!(!temp.path().join("x.json").exists());
    }
}
