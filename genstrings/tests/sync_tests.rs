use genstrings::traits::Parser;
use genstrings::{Catalog, Config, Error, RunMode, StringEntry, run};
use indoc::indoc;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MASTER: &str = "Resources/Localizations/en.lproj/Localizable.strings";
const SPANISH: &str = "Resources/Localizations/es.lproj/Localizable.strings";
const KOREAN: &str = "Resources/Localizations/ko.lproj/Localizable.strings";
const NEW_SPANISH: &str = "Resources/Localizations/New-es.lproj.strings";
const NEW_KOREAN: &str = "Resources/Localizations/New-ko.lproj.strings";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

/// Project with `Hello` used twice and `Bye` once; the master catalog still
/// has a translated `Hello` and a stale `Old`.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "ASAPP/Views/GreetingView.swift",
        indoc! {r#"
            let hello = ASAPPLocalizedString("Hello")
            let again = ASAPPLocalizedString("Hello")
        "#},
    );
    write(
        root,
        "ASAPP/Farewell.swift",
        "button.title = ASAPPLocalizedString(\"Bye\")\n",
    );
    write(
        root,
        MASTER,
        indoc! {r#"
            /*Greeting*/
            "Hello" = "Hola";
            /**/
            "Old" = "Viejo";
        "#},
    );
    write(root, SPANISH, "/**/\n\"Hello\" = \"Hola\";\n");
    write(root, KOREAN, "");
    dir
}

#[test]
fn test_run_merges_master_and_writes_new_strings() {
    let dir = fixture();
    let config = Config::discover(dir.path()).unwrap();

    let report = run(&config, RunMode::Write).unwrap();

    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.occurrences, 3);
    assert_eq!(report.extracted, 2);
    assert!(report.master_changed);
    assert_eq!(report.diff.added.iter().collect::<Vec<_>>(), vec!["Bye"]);
    assert_eq!(report.diff.removed.iter().collect::<Vec<_>>(), vec!["Old"]);
    assert_eq!(report.written.len(), 3);

    assert_eq!(
        read(dir.path(), MASTER),
        indoc! {r#"
            /**/
            "Bye" = "Bye";
            /*Greeting*/
            "Hello" = "Hola";
        "#}
    );
    assert_eq!(read(dir.path(), NEW_SPANISH), "/**/\n\"Bye\" = \"Bye\";\n");
    assert_eq!(
        read(dir.path(), NEW_KOREAN),
        indoc! {r#"
            /**/
            "Bye" = "Bye";
            /*Greeting*/
            "Hello" = "Hola";
        "#}
    );

    let spanish = &report.locales[0];
    assert_eq!(spanish.locale, "es.lproj");
    assert_eq!(spanish.missing, vec!["Bye"]);
    assert_eq!(report.locales[1].missing, vec!["Bye", "Hello"]);
}

#[test]
fn test_secondary_catalogs_are_never_modified() {
    let dir = fixture();
    let config = Config::discover(dir.path()).unwrap();
    run(&config, RunMode::Write).unwrap();
    assert_eq!(read(dir.path(), SPANISH), "/**/\n\"Hello\" = \"Hola\";\n");
    assert_eq!(read(dir.path(), KOREAN), "");
}

#[test]
fn test_second_run_is_byte_identical() {
    let dir = fixture();
    let config = Config::discover(dir.path()).unwrap();

    run(&config, RunMode::Write).unwrap();
    let first = read(dir.path(), MASTER);

    let report = run(&config, RunMode::Write).unwrap();
    assert!(report.diff.is_empty());
    assert!(!report.master_changed);
    assert_eq!(read(dir.path(), MASTER), first);
}

#[test]
fn test_translations_survive_reruns() {
    let dir = fixture();
    let config = Config::discover(dir.path()).unwrap();
    run(&config, RunMode::Write).unwrap();

    // A translator fills in the placeholder between runs.
    let master_path = dir.path().join(MASTER);
    let mut master = Catalog::read_from(&master_path).unwrap();
    master.insert(StringEntry::new("Bye", "Adiós \\\"amigo\\\"", "Farewell"));
    master.write_to(&master_path).unwrap();

    run(&config, RunMode::Write).unwrap();
    let master = Catalog::read_from(&master_path).unwrap();
    let bye = master.get("Bye").unwrap();
    assert_eq!(bye.value, "Adiós \\\"amigo\\\"");
    assert_eq!(bye.comment, "Farewell");
}

#[test]
fn test_quoted_source_key_keeps_translation_across_runs() {
    let dir = fixture();
    write(
        dir.path(),
        "ASAPP/Labeled.swift",
        "let s = ASAPPLocalizedString(\"Hello\", comment: \"Greeting\")\n",
    );
    let config = Config::discover(dir.path()).unwrap();
    run(&config, RunMode::Write).unwrap();

    let key = r#"Hello\", comment: \"Greeting"#;
    let master_path = dir.path().join(MASTER);
    let mut master = Catalog::read_from(&master_path).unwrap();
    assert_eq!(master.get(key).map(|e| e.value.as_str()), Some(key));
    master.insert(StringEntry::new(key, "Hola", ""));
    master.write_to(&master_path).unwrap();

    let report = run(&config, RunMode::Write).unwrap();
    assert!(report.diff.is_empty());
    let master = Catalog::read_from(&master_path).unwrap();
    assert_eq!(master.get(key).map(|e| e.value.as_str()), Some("Hola"));
}

#[test]
fn test_check_compares_master_bytes_on_disk() {
    let dir = fixture();
    let current = "/**/\n\"Bye\" = \"Bye\";\n/*Greeting*/\n\"Hello\" = \"Hola\";\n";
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(current.as_bytes());
    fs::write(dir.path().join(MASTER), &bytes).unwrap();
    let config = Config::discover(dir.path()).unwrap();

    let err = run(&config, RunMode::Check).unwrap_err();
    assert!(matches!(err, Error::OutOfDate { .. }));

    let report = run(&config, RunMode::Write).unwrap();
    assert!(report.master_changed);
    assert!(report.diff.is_empty());
    assert_eq!(read(dir.path(), MASTER), current);
    assert!(run(&config, RunMode::Check).is_ok());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = fixture();
    let config = Config::discover(dir.path()).unwrap();
    let before = read(dir.path(), MASTER);

    let report = run(&config, RunMode::DryRun).unwrap();

    assert!(report.master_changed);
    assert!(report.written.is_empty());
    assert_eq!(read(dir.path(), MASTER), before);
    assert!(!dir.path().join(NEW_SPANISH).exists());
}

#[test]
fn test_check_fails_on_stale_master_and_passes_after_write() {
    let dir = fixture();
    let config = Config::discover(dir.path()).unwrap();

    let err = run(&config, RunMode::Check).unwrap_err();
    assert!(matches!(err, Error::OutOfDate { .. }));

    run(&config, RunMode::Write).unwrap();
    let report = run(&config, RunMode::Check).unwrap();
    assert!(!report.master_changed);
    assert!(report.written.is_empty());
}

#[test]
fn test_bad_locale_catalog_aborts_before_any_write() {
    let dir = fixture();
    write(dir.path(), KOREAN, "\"Hello\" = \"안녕\"\n");
    let config = Config::discover(dir.path()).unwrap();
    let before = read(dir.path(), MASTER);

    let err = run(&config, RunMode::Write).unwrap_err();
    match err {
        Error::Parse { path, line, .. } => {
            assert!(path.ends_with("ko.lproj/Localizable.strings"));
            assert_eq!(line, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(read(dir.path(), MASTER), before);
    assert!(!dir.path().join(NEW_SPANISH).exists());
}

#[test]
fn test_missing_master_catalog_is_reported() {
    let dir = fixture();
    fs::remove_file(dir.path().join(MASTER)).unwrap();
    let config = Config::discover(dir.path()).unwrap();

    let err = run(&config, RunMode::Write).unwrap_err();
    match err {
        Error::FileNotFound { path } => assert!(path.ends_with("en.lproj/Localizable.strings")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_secondary_catalog_is_reported() {
    let dir = fixture();
    fs::remove_file(dir.path().join(SPANISH)).unwrap();
    let config = Config::discover(dir.path()).unwrap();

    let err = run(&config, RunMode::Write).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
    assert!(err.to_string().contains("es.lproj"));
}

#[test]
fn test_config_file_overrides_layout() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "genstrings.toml",
        indoc! {r#"
            [source]
            root = "App"
            extensions = ["m", "swift"]
            marker_start = 'NSLocalizedString(@"'
            marker_end = '",'

            [catalogs]
            root = "L10n"
            master = "Base.lproj"
            secondary = ["fr.lproj"]
            new_strings_file = "{locale}/ToTranslate.strings"
        "#},
    );
    write(
        root,
        "App/Legacy.m",
        "label.text = NSLocalizedString(@\"Welcome\", nil);\n",
    );
    write(root, "L10n/Base.lproj/Localizable.strings", "");
    write(root, "L10n/fr.lproj/Localizable.strings", "");

    let config = Config::discover(root).unwrap();
    run(&config, RunMode::Write).unwrap();

    assert_eq!(
        read(root, "L10n/Base.lproj/Localizable.strings"),
        "/**/\n\"Welcome\" = \"Welcome\";\n"
    );
    assert_eq!(
        read(root, "L10n/fr.lproj/ToTranslate.strings"),
        "/**/\n\"Welcome\" = \"Welcome\";\n"
    );
}
