//! Manifest store and filename validation

use std::fs;
use std::path::Path;

use rstest::rstest;
use tempfile::TempDir;
use vsext_core::{
    Error, ExtensionRecord, Manifest, ManifestFormat, ManifestStore, read_manifest,
    validate_filename, validate_import_path,
};

mod filename_validation {
    use super::*;

    #[rstest]
    #[case("../x.json")]
    #[case("a\\b.json")]
    #[case("a/b.json")]
    #[case("/etc/passwd")]
    #[case("..")]
    #[case(".")]
    #[case("nested/../../x.json")]
    #[case("")]
    #[case("   ")]
    fn test_rejects_escaping_names(#[case] name: &str) {
        let err = validate_filename(name).unwrap_err();
        assert!(matches!(err, Error::InvalidFilename { .. }), "{name:?}: {err}");
    }

    #[rstest]
    #[case("plain.json")]
    #[case("vscode-extensions-1700000000000.json")]
    #[case("my extensions.json")]
    #[case(".hidden.json")]
    fn test_accepts_plain_names_unchanged(#[case] name: &str) {
        assert_eq!(validate_filename(name).unwrap(), name);
    }

    #[rstest]
    #[case("list.json")]
    #[case("exports/list.json")]
    #[case("/home/me/backup/list.json")]
    fn test_import_accepts_paths(#[case] path: &str) {
        assert_eq!(validate_import_path(path).unwrap(), Path::new(path));
    }

    #[rstest]
    #[case("../list.json")]
    #[case("exports/../../list.json")]
    #[case("exports\\list.json")]
    #[case(".")]
    #[case("")]
    fn test_import_rejects_escaping_paths(#[case] path: &str) {
        let err = validate_import_path(path).unwrap_err();
        assert!(matches!(err, Error::InvalidFilename { .. }), "{path:?}: {err}");
    }
}

mod reading {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.json");

        let err = read_manifest(&path).unwrap_err();
        match err {
            Error::FileNotFound(path) => assert_eq!(path, temp.path().join("nonexistent.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = read_manifest(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidManifest { .. }));
    }

    #[test]
    fn test_read_manifest_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/list.json"), r#"["a.b@1.0.0"]"#).unwrap();

        let path = temp.path().join(validate_import_path("sub/list.json").unwrap());
        let manifest = read_manifest(&path).unwrap();

        assert_eq!(manifest.ids(), vec!["a.b"]);
    }

    #[test]
    fn test_directory_is_not_a_manifest() {
        let temp = TempDir::new().unwrap();
        let err = read_manifest(temp.path()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path().join("output"));
        let manifest = Manifest::new(vec![
            ExtensionRecord::new("foo.bar").with_version("1.0.0"),
            ExtensionRecord::new("baz.qux").with_version("2.1.0").disabled(true),
        ]);

        let path = store.write("exact.json", &manifest, ManifestFormat::Exact).unwrap();

        assert_eq!(read_manifest(&path).unwrap(), manifest);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::new(temp.path());
        fs::write(temp.path().join("list.json"), "old content").unwrap();

        let manifest = Manifest::new(vec![ExtensionRecord::new("a.b")]);
        let path = store
            .write("list.json", &manifest, ManifestFormat::Identifiers)
            .unwrap();

        assert_eq!(read_manifest(&path).unwrap().ids(), vec!["a.b"]);
    }
}
