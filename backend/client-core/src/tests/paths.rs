use crate::storage::{DATA_DIR_ENV_VAR, PathSource, StoragePaths, detect_storage_paths};

use std::path::PathBuf;

use serial_test::serial;

/// **VALUE**: The env override decides where session files live.
///
/// **WHY THIS MATTERS**: Tests and multi-profile setups rely on pointing the
/// console at a private directory.
///
/// **BUG THIS CATCHES**: Would catch if the override were ignored in favor of
/// the platform directory.
#[test]
#[serial]
fn given_env_override_when_detecting_then_uses_override() {
    // GIVEN: The override points at a custom dir
    // SAFETY: serialized with every other test touching this variable.
    unsafe { std::env::set_var(DATA_DIR_ENV_VAR, "/tmp/newsdesk-test") };

    // WHEN
    let paths = detect_storage_paths().unwrap();

    // THEN
    unsafe { std::env::remove_var(DATA_DIR_ENV_VAR) };
    assert_eq!(paths.source, PathSource::EnvVar);
    assert_eq!(paths.data_dir, PathBuf::from("/tmp/newsdesk-test"));
    assert_eq!(
        paths.local_storage_file,
        PathBuf::from("/tmp/newsdesk-test/local_storage.json")
    );
    assert_eq!(
        paths.cookie_file,
        PathBuf::from("/tmp/newsdesk-test/cookies.json")
    );
}

#[test]
#[serial]
fn given_blank_env_override_when_detecting_then_ignores_it() {
    unsafe { std::env::set_var(DATA_DIR_ENV_VAR, "  ") };

    let result = detect_storage_paths();

    unsafe { std::env::remove_var(DATA_DIR_ENV_VAR) };
    if let Ok(paths) = result {
        assert_ne!(paths.source, PathSource::EnvVar);
        assert!(paths.data_dir.ends_with("newsdesk"));
    }
}

#[test]
fn given_explicit_dir_when_building_paths_then_files_are_inside_it() {
    let paths = StoragePaths::in_dir("/data/console");

    assert_eq!(paths.source, PathSource::Explicit);
    assert!(paths.local_storage_file.starts_with("/data/console"));
    assert!(paths.cookie_file.starts_with("/data/console"));
    assert_ne!(paths.local_storage_file, paths.cookie_file);
}
