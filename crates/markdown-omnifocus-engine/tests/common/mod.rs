use markdown_omnifocus_engine::{Host, HostError};
use relative_path::RelativePathBuf;

/// In-memory host that records every effect the commands have
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub document: String,
    pub selection: String,
    pub file: String,
    pub vault: String,
    pub notifications: Vec<String>,
    pub opened: Vec<String>,
    pub document_writes: usize,
    pub selection_writes: usize,
    /// Opening the URL at this position (0-based) fails
    pub fail_open_at: Option<usize>,
    pub fail_read: bool,
}

impl MemoryHost {
    pub fn with_document(document: &str) -> Self {
        Self {
            document: document.to_string(),
            file: "inbox.md".to_string(),
            vault: "Notes".to_string(),
            ..Self::default()
        }
    }

    pub fn with_selection(document: &str, selection: &str) -> Self {
        Self {
            selection: selection.to_string(),
            ..Self::with_document(document)
        }
    }
}

impl Host for MemoryHost {
    fn document_text(&self) -> Result<String, HostError> {
        if self.fail_read {
            return Err(HostError::NoDocument);
        }
        Ok(self.document.clone())
    }

    fn selected_text(&self) -> Result<String, HostError> {
        if self.fail_read {
            return Err(HostError::NoDocument);
        }
        Ok(self.selection.clone())
    }

    fn replace_document_text(&mut self, text: &str) -> Result<(), HostError> {
        self.document = text.to_string();
        self.document_writes += 1;
        Ok(())
    }

    fn replace_selected_text(&mut self, text: &str) -> Result<(), HostError> {
        self.document = self.document.replacen(&self.selection, text, 1);
        self.selection = text.to_string();
        self.selection_writes += 1;
        Ok(())
    }

    fn current_file_path(&self) -> Result<RelativePathBuf, HostError> {
        Ok(RelativePathBuf::from(self.file.as_str()))
    }

    fn collection_name(&self) -> Result<String, HostError> {
        Ok(self.vault.clone())
    }

    fn notify_user(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn open_external_command(&mut self, url: &str) -> Result<(), HostError> {
        if self.fail_open_at == Some(self.opened.len()) {
            return Err(HostError::OpenFailed {
                url: url.to_string(),
                reason: "no handler".to_string(),
            });
        }
        self.opened.push(url.to_string());
        Ok(())
    }
}
