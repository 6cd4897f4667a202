use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_vault() -> TempDir {
    TempDir::new().expect("Failed to create temp vault")
}

pub fn create_test_file(vault: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = vault.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
