//! Streaming reader for toolpath files
//!
//! Files are read line by line through a buffered reader so large prints
//! never have to fit in memory. The handle is closed as soon as the read
//! finishes or the callback asks to stop.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

/// Buffer size for reading large files (256 KB)
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Returned by a line callback to continue or stop reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadControl {
    Continue,
    Stop,
}

/// File read statistics
#[derive(Debug, Clone)]
pub struct FileReadStats {
    /// Total bytes read
    pub bytes_read: u64,
    /// Total lines read
    pub lines_read: u64,
    /// Whether the callback stopped the read before the end of the file
    pub stopped_early: bool,
}

/// Line-streaming file reader for G-code and CLI files
#[derive(Debug, Clone)]
pub struct ToolpathFileReader {
    path: PathBuf,
}

impl ToolpathFileReader {
    /// Create a new reader
    ///
    /// # Errors
    /// Returns error if the file does not exist or cannot be accessed
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(anyhow!("File does not exist: {}", path.display()));
        }

        if !path.is_file() {
            return Err(anyhow!("Path is not a file: {}", path.display()));
        }

        Ok(Self { path })
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count the lines in the file without keeping them
    pub fn count_lines(&self) -> Result<usize> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        let mut count = 0;
        for line in reader.lines() {
            line?;
            count += 1;
        }
        Ok(count)
    }

    /// Stream the file line by line
    ///
    /// The callback receives the 1-based line number and the line without its
    /// terminator.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the callback returns error
    pub fn read_lines<F>(&self, mut callback: F) -> Result<FileReadStats>
    where
        F: FnMut(usize, &str) -> Result<ReadControl>,
    {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let mut lines_read = 0u64;
        let mut bytes_read = 0u64;
        let mut stopped_early = false;

        for (idx, line_result) in reader.lines().enumerate() {
            let line = line_result
                .with_context(|| format!("Failed to read line {} of {}", idx + 1, self.path.display()))?;

            bytes_read += line.len() as u64 + 1; // +1 for newline
            lines_read += 1;

            if callback(idx + 1, &line)? == ReadControl::Stop {
                stopped_early = true;
                break;
            }
        }

        Ok(FileReadStats {
            bytes_read,
            lines_read,
            stopped_early,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file() {
        assert!(ToolpathFileReader::new("/definitely/not/here.gcode").is_err());
    }

    #[test]
    fn test_read_lines_numbers_from_one() {
        let file = temp_file("G1 X1\nG1 X2\nG1 X3\n");
        let reader = ToolpathFileReader::new(file.path()).unwrap();
        let mut seen = Vec::new();
        let stats = reader
            .read_lines(|n, line| {
                seen.push((n, line.to_string()));
                Ok(ReadControl::Continue)
            })
            .unwrap();
        assert_eq!(stats.lines_read, 3);
        assert!(!stats.stopped_early);
        assert_eq!(seen[0], (1, "G1 X1".to_string()));
        assert_eq!(seen[2].0, 3);
    }

    #[test]
    fn test_stop_early() {
        let file = temp_file("a\nb\nSTOP\nc\nd\n");
        let reader = ToolpathFileReader::new(file.path()).unwrap();
        let stats = reader
            .read_lines(|_, line| {
                Ok(if line == "STOP" {
                    ReadControl::Stop
                } else {
                    ReadControl::Continue
                })
            })
            .unwrap();
        assert_eq!(stats.lines_read, 3);
        assert!(stats.stopped_early);
        assert_eq!(reader.count_lines().unwrap(), 5);
    }
}
