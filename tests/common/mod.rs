#![allow(dead_code)]

use backup_keeper_lib::config::AppConfig;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Sets up a temp workspace with a populated `source` tree (4 files across
/// nested directories plus one empty directory) and returns the source and
/// destination paths. The destination is not created.
pub fn setup_backup_env() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let source = root.join("source");
    let dest = root.join("dest");

    fs::create_dir_all(source.join("docs/notes")).unwrap();
    fs::create_dir_all(source.join("empty")).unwrap();
    fs::write(source.join("a.txt"), "alpha").unwrap();
    fs::write(source.join("b.txt"), "beta").unwrap();
    fs::write(source.join("docs/readme.md"), "readme").unwrap();
    fs::write(source.join("docs/notes/todo.md"), "todo").unwrap();

    (tmp, source, dest)
}

/// A configuration pointing at the given paths, in plain-copy mode.
pub fn test_config(source: &Utf8Path, dest: &Utf8Path) -> AppConfig {
    AppConfig {
        source: source.to_string(),
        destination: dest.to_string(),
        zip: false,
        ..AppConfig::default()
    }
}
