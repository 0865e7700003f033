//! Append-only log of the requests received and replies sent

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PupstubError, Result};

/// Transcript file, in the same `recv:` / `send:` layout the add-on uses for
/// its own control log so the two can be read side by side
pub struct Transcript {
    path: PathBuf,
    file: File,
}

impl Transcript {
    /// Open (or create) the transcript for appending
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| PupstubError::Transcript {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Session header with the bound port
    pub fn opened(&mut self, port: u16) -> Result<()> {
        let line = format!("--opened {} port {}--\n", chrono::Utc::now().to_rfc3339(), port);
        self.write(&line)
    }

    pub fn recv<T: Serialize>(&mut self, message: &T) -> Result<()> {
        self.entry("recv", message)
    }

    pub fn send<T: Serialize>(&mut self, message: &T) -> Result<()> {
        self.entry("send", message)
    }

    fn entry<T: Serialize>(&mut self, direction: &str, message: &T) -> Result<()> {
        let body = serde_json::to_string_pretty(message)?;
        self.write(&format!("{}: {}\n", direction, body))
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.file
            .write_all(text.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|source| PupstubError::Transcript {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_entries_are_appended() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("transcript.txt");

        let mut transcript = Transcript::open(&path).unwrap();
        assert_eq!(transcript.path(), path.as_path());
        transcript.opened(4242).unwrap();
        transcript.recv(&json!({"client_id": "abc", "sequence": 0})).unwrap();
        transcript.send(&json!({"client_id": "abc", "sequence": 0, "status": "ok"})).unwrap();
        drop(transcript);

        // Reopening keeps what was already there
        let mut transcript = Transcript::open(&path).unwrap();
        transcript.opened(4343).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("--opened "));
        assert!(content.contains("port 4242--\n"));
        assert!(content.contains("recv: {\n  \"client_id\": \"abc\""));
        assert!(content.contains("\"status\": \"ok\"\n}\n"));
        assert!(content.contains("port 4343--\n"));
        assert_eq!(content.matches("send: ").count(), 1);
    }

    #[test]
    fn test_open_in_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing").join("transcript.txt");

        let err = Transcript::open(&path).err().unwrap();
        assert!(matches!(err, PupstubError::Transcript { .. }));
    }
}
