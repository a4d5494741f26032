//! Scanner tests: partial-failure tolerance and filter integration

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use listprov::filter::ProfilePredicate;
use listprov::models::{FilterCriteria, ProfileError};
use listprov::scan;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn match_all() -> ProfilePredicate {
    ProfilePredicate::compile(&FilterCriteria::default()).unwrap()
}

#[test]
fn corrupt_file_does_not_abort_the_scan() {
    let dir = TempDir::new().unwrap();
    let source = fixture("development.mobileprovision");
    for name in ["a.mobileprovision", "b.mobileprovision", "c.mobileprovision"] {
        fs::copy(&source, dir.path().join(name)).unwrap();
    }
    fs::write(dir.path().join("zz.mobileprovision"), b"corrupt data").unwrap();

    let predicate = match_all();
    let dirs = vec![dir.path().to_path_buf()];
    let (profiles, errors): (Vec<_>, Vec<_>) =
        scan::scan_profiles(&dirs, &predicate).partition(Result::is_ok);

    assert_eq!(profiles.len(), 3);
    assert_eq!(errors.len(), 1);

    // Enumeration order within the directory
    let names: Vec<String> = profiles
        .into_iter()
        .map(|p| {
            p.unwrap()
                .path()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .to_string()
        })
        .collect();
    assert_eq!(
        names,
        vec!["a.mobileprovision", "b.mobileprovision", "c.mobileprovision"]
    );

    let (path, error) = errors.into_iter().next().unwrap().unwrap_err();
    assert_eq!(path.file_name().unwrap(), "zz.mobileprovision");
    assert!(matches!(error, ProfileError::DecodeFailure { .. }));
}

#[test]
fn directories_are_scanned_in_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::copy(
        fixture("enterprise.mobileprovision"),
        first.path().join("ent.mobileprovision"),
    )
    .unwrap();
    fs::copy(
        fixture("development.mobileprovision"),
        second.path().join("dev.mobileprovision"),
    )
    .unwrap();

    let predicate = match_all();
    let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
    let uuids: Vec<String> = scan::scan_profiles(&dirs, &predicate)
        .map(|outcome| outcome.unwrap().uuid().to_string())
        .collect();

    assert_eq!(
        uuids,
        vec![
            "DEADBEEF-0000-1111-2222-333344445555",
            "12345678-ABCD-EF90-1234-567890ABCDEF"
        ]
    );
}

#[test]
fn predicate_filters_profiles_during_the_scan() {
    let dir = TempDir::new().unwrap();
    fs::copy(
        fixture("development.mobileprovision"),
        dir.path().join("dev.mobileprovision"),
    )
    .unwrap();
    fs::copy(
        fixture("enterprise.mobileprovision"),
        dir.path().join("ent.mobileprovision"),
    )
    .unwrap();

    let predicate = ProfilePredicate::compile(&FilterCriteria {
        expired: Some(false),
        ..Default::default()
    })
    .unwrap();
    let dirs = vec![dir.path().to_path_buf()];
    let survivors: Vec<String> = scan::scan_profiles(&dirs, &predicate)
        .map(|outcome| outcome.unwrap().uuid().to_string())
        .collect();

    assert_eq!(survivors, vec!["12345678-ABCD-EF90-1234-567890ABCDEF"]);
}

#[test]
fn missing_directory_yields_nothing() {
    let predicate = match_all();
    let dirs = vec![PathBuf::from("/definitely/not/a/real/directory")];
    assert_eq!(scan::scan_profiles(&dirs, &predicate).count(), 0);
}
