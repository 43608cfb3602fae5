//! Append-only log file writer.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ConsolError, Result};

/// Appends plain lines to the file named by the resolved path template.
///
/// The handle is kept open while consecutive writes target the same path
/// and reopened when the path changes (for example at a date rollover).
/// Writes go straight to the file with no userspace buffer, so a line is on
/// disk before a fatal exit.
#[derive(Debug, Default)]
pub struct FileSink {
    current: Option<(PathBuf, File)>,
}

impl FileSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the currently open log file, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|(path, _)| path.as_path())
    }

    /// Append `line` plus a newline to `path`, creating parent directories.
    pub fn append(&mut self, path: &Path, line: &str) -> Result<()> {
        let io_error = |source: std::io::Error| ConsolError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = match &mut self.current {
            Some((open_path, file)) if open_path.as_path() == path => file,
            slot => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(io_error)?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(io_error)?;
                log::debug!("Opened log file {:?}", path);
                &mut slot.insert((path.to_path_buf(), file)).1
            }
        };

        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        if let Err(source) = file.write_all(&bytes) {
            self.current = None;
            return Err(io_error(source));
        }
        Ok(())
    }

    /// Drop the open handle.
    pub fn close(&mut self) {
        self.current = None;
    }
}
