mod common;

use common::write_lockfile;
use shai_hulud_audit::error::AuditError;
use shai_hulud_audit::registry;
use shai_hulud_audit::scanners::lockfile::find_malicious_packages;

#[test]
fn compromised_tinycolor_is_malicious() {
    let dir = tempfile::tempdir().unwrap();
    write_lockfile(dir.path(), &[("node_modules/@ctrl/tinycolor", "4.1.1")]);

    let matches = find_malicious_packages(&dir.path().join("package-lock.json")).unwrap();
    assert_eq!(matches.malicious.len(), 1);
    assert_eq!(matches.malicious[0].name, "@ctrl/tinycolor");
    assert_eq!(matches.malicious[0].version, "4.1.1");
    assert!(matches.present_unaffected.is_empty());
    assert!(matches.parsed);
}

#[test]
fn safe_tinycolor_is_present_but_unaffected() {
    let dir = tempfile::tempdir().unwrap();
    write_lockfile(dir.path(), &[("node_modules/@ctrl/tinycolor", "4.1.3")]);

    let matches = find_malicious_packages(&dir.path().join("package-lock.json")).unwrap();
    assert!(matches.malicious.is_empty());
    assert_eq!(matches.present_unaffected.len(), 1);
    assert_eq!(matches.present_unaffected[0].version, "4.1.3");
}

#[test]
fn untracked_packages_produce_no_findings() {
    let dir = tempfile::tempdir().unwrap();
    write_lockfile(
        dir.path(),
        &[
            ("node_modules/left-pad", "1.3.0"),
            ("node_modules/express", "4.1.1"),
            ("node_modules/@ctrl/not-a-real-package", "4.1.1"),
        ],
    );

    let matches = find_malicious_packages(&dir.path().join("package-lock.json")).unwrap();
    assert!(matches.malicious.is_empty());
    assert!(matches.present_unaffected.is_empty());
    assert_eq!(matches.entries_checked, 3);
}

#[test]
fn every_compromised_pair_yields_exactly_one_finding() {
    let dir = tempfile::tempdir().unwrap();
    let lock = dir.path().join("package-lock.json");

    for entry in registry::entries() {
        for version in entry.versions {
            let key = format!("node_modules/{}", entry.package);
            write_lockfile(dir.path(), &[(key.as_str(), *version)]);

            let matches = find_malicious_packages(&lock).unwrap();
            assert_eq!(
                matches.malicious.len(),
                1,
                "{}@{} should be reported once",
                entry.package,
                version
            );
            assert_eq!(matches.malicious[0].name, entry.package);
            assert_eq!(matches.malicious[0].version, *version);
            assert!(matches.present_unaffected.is_empty());
        }
    }
}

#[test]
fn nested_entries_use_last_segment_and_keep_document_order() {
    let dir = tempfile::tempdir().unwrap();
    write_lockfile(
        dir.path(),
        &[
            ("node_modules/debug", "4.4.2"),
            ("node_modules/wrapper", "1.0.0"),
            ("node_modules/wrapper/node_modules/chalk", "5.6.1"),
            (
                "node_modules/a/node_modules/b/node_modules/@ctrl/tinycolor",
                "4.1.2",
            ),
            ("node_modules/chalk", "5.3.0"),
        ],
    );

    let matches = find_malicious_packages(&dir.path().join("package-lock.json")).unwrap();
    let malicious: Vec<String> = matches.malicious.iter().map(|p| p.to_string()).collect();
    assert_eq!(
        malicious,
        ["debug@4.4.2", "chalk@5.6.1", "@ctrl/tinycolor@4.1.2"]
    );
    assert_eq!(
        matches.malicious[2].source_path,
        "node_modules/a/node_modules/b/node_modules/@ctrl/tinycolor"
    );
    assert_eq!(matches.present_unaffected.len(), 1);
    assert_eq!(matches.present_unaffected[0].to_string(), "chalk@5.3.0");
}

#[test]
fn repeated_occurrences_are_not_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    write_lockfile(
        dir.path(),
        &[
            ("node_modules/debug", "4.4.2"),
            ("node_modules/x/node_modules/debug", "4.4.2"),
        ],
    );

    let matches = find_malicious_packages(&dir.path().join("package-lock.json")).unwrap();
    assert_eq!(matches.malicious.len(), 2);
    assert_ne!(
        matches.malicious[0].source_path,
        matches.malicious[1].source_path
    );
}

#[test]
fn root_entry_is_not_a_package() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("package-lock.json"),
        r#"{ "packages": { "": { "name": "chalk", "version": "5.6.1" } } }"#,
    )
    .unwrap();

    let matches = find_malicious_packages(&dir.path().join("package-lock.json")).unwrap();
    assert!(matches.malicious.is_empty());
    assert_eq!(matches.entries_checked, 0);
}

#[test]
fn missing_lockfile_is_an_error_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let lock = dir.path().join("package-lock.json");

    let err = find_malicious_packages(&lock).unwrap_err();
    assert!(matches!(err, AuditError::LockfileNotFound { .. }));
    assert_eq!(err.path(), lock.as_path());
    assert!(err.to_string().contains("package-lock.json"));
}

#[test]
fn corrupt_lockfile_is_recovered_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package-lock.json"), "{ not json").unwrap();

    let matches = find_malicious_packages(&dir.path().join("package-lock.json")).unwrap();
    assert!(matches.malicious.is_empty());
    assert!(matches.present_unaffected.is_empty());
    assert!(!matches.parsed);
}

#[test]
fn lockfile_without_packages_map_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("package-lock.json"),
        r#"{ "lockfileVersion": 1, "dependencies": { "chalk": { "version": "5.6.1" } } }"#,
    )
    .unwrap();

    let matches = find_malicious_packages(&dir.path().join("package-lock.json")).unwrap();
    assert!(matches.malicious.is_empty());
    assert!(matches.parsed);
}
