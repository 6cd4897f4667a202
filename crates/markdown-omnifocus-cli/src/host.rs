use markdown_omnifocus_engine::{Host, HostError, io};
use relative_path::RelativePathBuf;
use std::ops::Range;
use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;

/// 1-based, inclusive range of lines standing in for an editor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<Self, String> {
        if start == 0 || end < start {
            return Err(format!("invalid line range {start}:{end}"));
        }
        Ok(Self { start, end })
    }

    /// Byte range of these lines in `text`, line endings included.
    ///
    /// Lines past the end of the text are ignored.
    pub fn byte_range(&self, text: &str) -> Range<usize> {
        let mut offset = 0;
        let mut range_start = None;
        for (i, line) in text.split_inclusive('\n').enumerate() {
            let number = i + 1;
            if number == self.start {
                range_start = Some(offset);
            }
            offset += line.len();
            if number == self.end {
                break;
            }
        }
        match range_start {
            Some(start) => start..offset,
            None => text.len()..text.len(),
        }
    }
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |n: &str| {
            n.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid line number `{n}`: {e}"))
        };
        match s.split_once(':') {
            Some((start, end)) => Self::new(parse(start)?, parse(end)?),
            None => {
                let line = parse(s)?;
                Self::new(line, line)
            }
        }
    }
}

/// How command URLs leave the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opener {
    /// Print each URL on stdout
    Print,
    /// Hand each URL to the desktop's URL opener
    System,
}

impl Opener {
    fn program() -> &'static str {
        if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        }
    }

    fn open(&self, url: &str) -> Result<(), HostError> {
        match self {
            Opener::Print => {
                println!("{url}");
                Ok(())
            }
            Opener::System => {
                let status = Command::new(Self::program()).arg(url).status()?;
                if status.success() {
                    Ok(())
                } else {
                    Err(HostError::OpenFailed {
                        url: url.to_string(),
                        reason: format!("{} exited with {status}", Self::program()),
                    })
                }
            }
        }
    }
}

/// A markdown file inside a vault directory, edited on disk
#[derive(Debug)]
pub struct FileHost {
    vault_root: PathBuf,
    vault_name: String,
    file: RelativePathBuf,
    selection: Option<LineRange>,
    opener: Opener,
}

impl FileHost {
    pub fn new(
        vault_root: PathBuf,
        file: RelativePathBuf,
        selection: Option<LineRange>,
        opener: Opener,
    ) -> Result<Self, io::IoError> {
        io::validate_vault_dir(&vault_root)?;
        let vault_name = io::vault_name(&vault_root)?;
        Ok(Self {
            vault_root,
            vault_name,
            file,
            selection,
            opener,
        })
    }

    fn read(&self) -> Result<String, HostError> {
        io::read_file(&self.file, &self.vault_root).map_err(into_host_error)
    }

    fn write(&self, text: &str) -> Result<(), HostError> {
        io::write_file(&self.file, &self.vault_root, text).map_err(into_host_error)
    }
}

fn into_host_error(err: io::IoError) -> HostError {
    match err {
        io::IoError::Io(e) => HostError::Io(e),
        io::IoError::NotFound(_) => HostError::NoDocument,
        other => HostError::Other(other.to_string()),
    }
}

impl Host for FileHost {
    fn document_text(&self) -> Result<String, HostError> {
        self.read()
    }

    fn selected_text(&self) -> Result<String, HostError> {
        let Some(selection) = self.selection else {
            return Ok(String::new());
        };
        let text = self.read()?;
        Ok(text[selection.byte_range(&text)].to_string())
    }

    fn replace_document_text(&mut self, text: &str) -> Result<(), HostError> {
        self.write(text)
    }

    fn replace_selected_text(&mut self, text: &str) -> Result<(), HostError> {
        let Some(selection) = self.selection else {
            return Err(HostError::Other("no lines selected".to_string()));
        };
        let mut document = self.read()?;
        document.replace_range(selection.byte_range(&document), text);
        self.write(&document)
    }

    fn current_file_path(&self) -> Result<RelativePathBuf, HostError> {
        Ok(self.file.clone())
    }

    fn collection_name(&self) -> Result<String, HostError> {
        Ok(self.vault_name.clone())
    }

    fn notify_user(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn open_external_command(&mut self, url: &str) -> Result<(), HostError> {
        self.opener.open(url)
    }
}
