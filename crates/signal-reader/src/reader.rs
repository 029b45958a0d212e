//! Line-by-line sample parsing

use crate::error::ReadError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Samples read from a file, plus how many lines were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signal {
    /// Parsed samples in file order
    pub samples: Vec<f64>,
    /// Lines that did not parse as a number
    pub skipped_lines: usize,
}

impl Signal {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no samples were read
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Lazy iterator over the numeric lines of a text source.
///
/// Blank lines are ignored. Lines that fail to parse, including lines that
/// are not valid UTF-8, are logged and skipped; iteration stops at end of
/// input or at the first I/O error, which is kept for
/// [`SampleReader::take_error`].
pub struct SampleReader<R> {
    lines: std::io::Split<R>,
    line_no: usize,
    skipped: usize,
    error: Option<std::io::Error>,
}

impl<R: BufRead> SampleReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_no: 0,
            skipped: 0,
            error: None,
        }
    }

    /// Lines skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Take the I/O error that ended iteration, if any
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }
}

impl<R: BufRead> Iterator for SampleReader<R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.error.is_some() {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    warn!("Read failed after line {}: {}", self.line_no, e);
                    self.error = Some(e);
                    return None;
                }
            };
            self.line_no += 1;

            let line = String::from_utf8_lossy(&line);
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            match text.parse::<f64>() {
                Ok(value) => return Some(value),
                Err(_) => {
                    warn!("Skipping invalid data line {}: {:?}", self.line_no, line);
                    self.skipped += 1;
                }
            }
        }
    }
}

/// Read every sample from the file at `path`
pub fn read_signal(path: impl AsRef<Path>) -> Result<Signal, ReadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReadError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut reader = SampleReader::new(BufReader::new(file));
    let samples: Vec<f64> = reader.by_ref().collect();

    if let Some(e) = reader.take_error() {
        return Err(e.into());
    }

    debug!(
        "Read {} samples from {} ({} lines skipped)",
        samples.len(),
        path.display(),
        reader.skipped()
    );

    Ok(Signal {
        samples,
        skipped_lines: reader.skipped(),
    })
}
