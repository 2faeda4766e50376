use std::path::PathBuf;

use skiff_core::{Entry, FsError, SessionConfig, SortMode, format_size};

#[test]
fn test_entry_roundtrips_through_serde() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("data.bin");
    std::fs::write(&file, [0u8; 128]).unwrap();

    let entry = Entry::from_path(&file);
    let json = serde_json::to_string(&entry).unwrap();
    let back: Entry = serde_json::from_str(&json).unwrap();

    assert_eq!(back.path, entry.path);
    assert_eq!(back.name, entry.name);
    assert_eq!(back.size, 128);
}

#[test]
fn test_sort_mode_full_cycle_returns_to_start() {
    let mut mode = SortMode::Name;
    for _ in 0..4 {
        mode = mode.next();
    }
    assert_eq!(mode, SortMode::Name);
}

#[test]
fn test_format_size_binary_units() {
    assert_eq!(format_size(0), "0 B");
    assert!(format_size(2048).contains("KiB"));
}

#[test]
fn test_config_defaults() {
    let cfg = SessionConfig::new("/somewhere");
    assert_eq!(cfg.start_dir, PathBuf::from("/somewhere"));
    assert!(cfg.trash_root.is_none());
    assert_eq!(cfg.probe_timeout().as_secs(), 2);
}

#[test]
fn test_fs_error_display_includes_path() {
    let err = FsError::NotFound {
        path: PathBuf::from("/gone/file"),
    };
    assert!(err.to_string().contains("/gone/file"));
}
