use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary documents directory
pub fn create_test_documents_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Write an analysis report file into the directory
pub fn create_test_report(dir: &TempDir, filename: &str, json: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, json).unwrap();
    file_path
}
