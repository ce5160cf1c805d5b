//! Where the input bytes come from.

use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;

/// A readable location dataset.
#[derive(Debug, Clone)]
pub enum InputSource {
    /// A JSON document on disk.
    File(PathBuf),
    /// An in-memory JSON document.
    Bytes(Vec<u8>),
}

impl InputSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        InputSource::File(path.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        InputSource::Bytes(bytes.into())
    }

    /// Open a fresh reader over the dataset.
    pub fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        match self {
            InputSource::File(path) => Ok(Box::new(File::open(path)?)),
            InputSource::Bytes(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Bytes(bytes) => write!(f, "<memory: {} bytes>", bytes.len()),
        }
    }
}
