//! Test utilities for creating temporary log directories and handles.

#[cfg(test)]
use crate::config::LogConfig;
#[cfg(test)]
use crate::handle::LogHandle;
#[cfg(test)]
use std::fs::{File, OpenOptions};
#[cfg(test)]
use std::io::Write;
#[cfg(test)]
use std::path::{Path, PathBuf};

#[cfg(test)]
pub struct TempLogDir {
    _temp_dir: tempfile::TempDir,
    path: PathBuf,
}

#[cfg(test)]
impl TempLogDir {
    /// Create a new empty temporary directory for log files
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().to_path_buf();

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Config that creates its log files inside this directory
    pub fn config(&self, verbosity: i32) -> LogConfig {
        LogConfig::new(verbosity).with_dir(&self.path)
    }

    /// Open an enabled log handle inside this directory
    pub fn open_handle(&self) -> LogHandle {
        self.config(LogConfig::DEFAULT_THRESHOLD)
            .open()
            .expect("log file should be created")
            .expect("logging should be enabled")
    }

    /// Write a plain file with the given content
    pub fn write_file(&self, name: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.path.join(name);
        let mut file = File::create(&path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(path)
    }

    /// Append raw content to a file, bypassing any handle
    pub fn append_to(&self, path: &Path, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Names of all `.log` files currently in the directory
    pub fn log_files(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "log") {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_log_dir_creation() {
        let dir = TempLogDir::new().unwrap();
        assert!(dir.path().is_dir());
        assert!(dir.log_files().unwrap().is_empty());
    }

    #[test]
    fn test_write_and_append_file() {
        let dir = TempLogDir::new().unwrap();
        let path = dir.write_file("plain.log", "line 1\n").unwrap();
        dir.append_to(&path, "line 2\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "line 1\nline 2\n");
        assert_eq!(dir.log_files().unwrap(), vec![path]);
    }

    #[test]
    fn test_open_handle_creates_file_in_dir() {
        let dir = TempLogDir::new().unwrap();
        let handle = dir.open_handle();

        assert!(handle.path().starts_with(dir.path()));
        assert_eq!(dir.log_files().unwrap().len(), 1);
    }
}
