use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid vault directory: {0}")]
    InvalidVaultDir(String),
    #[error("{file} is not inside vault {vault}")]
    OutsideVault { file: PathBuf, vault: PathBuf },
}

/// Read a markdown file from the vault
pub fn read_file(relative_path: &RelativePath, vault_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(vault_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file in the vault
pub fn write_file(
    relative_path: &RelativePath,
    vault_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(vault_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

pub fn validate_vault_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidVaultDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// The vault's name as the notes app shows it: its directory name
pub fn vault_name(vault_root: &Path) -> Result<String, IoError> {
    let canonical = vault_root.canonicalize().map_err(IoError::Io)?;
    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| IoError::InvalidVaultDir("vault has no directory name".to_string()))
}

/// Express `file` relative to the vault root, using `/` separators
pub fn relative_to_vault(file: &Path, vault_root: &Path) -> Result<RelativePathBuf, IoError> {
    let outside = || IoError::OutsideVault {
        file: file.to_path_buf(),
        vault: vault_root.to_path_buf(),
    };
    let file = file.canonicalize().map_err(|_| IoError::NotFound(file.to_path_buf()))?;
    let vault = vault_root.canonicalize().map_err(IoError::Io)?;
    let relative = file.strip_prefix(&vault).map_err(|_| outside())?;
    RelativePathBuf::from_path(relative).map_err(|_| outside())
}
