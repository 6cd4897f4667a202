use relative_path::RelativePathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("No active document")]
    NoDocument,
    #[error("Failed to open {url}: {reason}")]
    OpenFailed { url: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// What the extraction commands need from the note-taking app.
///
/// The engine only talks to the app through this trait, so the same commands
/// run inside an editor plugin, from the CLI, or against an in-memory host in
/// tests.
pub trait Host {
    fn document_text(&self) -> Result<String, HostError>;

    /// Selected text, empty when nothing is selected
    fn selected_text(&self) -> Result<String, HostError>;

    fn replace_document_text(&mut self, text: &str) -> Result<(), HostError>;

    fn replace_selected_text(&mut self, text: &str) -> Result<(), HostError>;

    /// Path of the open document, relative to the vault root
    fn current_file_path(&self) -> Result<RelativePathBuf, HostError>;

    /// Name of the vault the document lives in
    fn collection_name(&self) -> Result<String, HostError>;

    fn notify_user(&mut self, message: &str);

    /// Hand a command URL to the app registered for its scheme
    fn open_external_command(&mut self, url: &str) -> Result<(), HostError>;
}
