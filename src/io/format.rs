//! Compression format detection.
use std::path::Path;

/// Compression format of a file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Plain,
    Gzip,
    Bzip2,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Format::Gzip,
            Some("bz2") => Format::Bzip2,
            _ => Format::Plain,
        }
    }
}
