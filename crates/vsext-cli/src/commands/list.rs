//! `vscode-ext list`

use vsext_core::installed_extensions;

use crate::context::CommandContext;
use crate::error::Result;

/// Print installed extensions with versions, marking disabled ones.
pub async fn run_list(ctx: &CommandContext<'_>) -> Result<()> {
    let records = installed_extensions(ctx.editor, true).await?;

    ctx.reporter.heading("Installed extensions:");
    for record in &records {
        if record.disabled {
            ctx.reporter.info(format!("- {record} (disabled)"));
        } else {
            ctx.reporter.info(format!("- {record}"));
        }
    }
    ctx.reporter
        .info(format!("Total: {} extensions", records.len()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::output::Reporter;
    use vsext_core::{Error, ListQuery, ManifestStore};
    use vsext_test_utils::{EditorCall, FakeEditor};

    #[tokio::test]
    async fn test_list_prints_every_extension() {
        let store = ManifestStore::new("unused");
        let reporter = Reporter::capturing(false);
        let editor = FakeEditor::new()
            .with_installed(&["foo.bar@1.0.0", "baz.qux@2.1.0"])
            .with_disabled(&["baz.qux"]);
        let ctx = CommandContext::new(&editor, &store, &reporter);

        run_list(&ctx).await.unwrap();

        assert_eq!(
            reporter.lines(),
            vec![
                "Installed extensions:",
                "- foo.bar@1.0.0",
                "- baz.qux@2.1.0 (disabled)",
                "Total: 2 extensions",
            ]
        );
        assert_eq!(
            editor.calls(),
            vec![
                EditorCall::List(ListQuery::with_versions()),
                EditorCall::List(ListQuery::disabled_only()),
            ]
        );
    }

    #[tokio::test]
    async fn test_quiet_list_prints_nothing() {
        let store = ManifestStore::new("unused");
        let reporter = Reporter::capturing(true);
        let editor = FakeEditor::new().with_installed(&["foo.bar@1.0.0"]);
        let ctx = CommandContext::new(&editor, &store, &reporter);

        run_list(&ctx).await.unwrap();

        assert!(reporter.lines().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_propagates() {
        let store = ManifestStore::new("unused");
        let reporter = Reporter::capturing(false);
        let editor = FakeEditor::new().failing_list();
        let ctx = CommandContext::new(&editor, &store, &reporter);

        let err = run_list(&ctx).await.unwrap_err();

        assert!(matches!(err, CliError::Core(Error::ListFailed { .. })));
    }
}
