//! Output files, compressed according to their extension.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;

use super::Format;
use crate::error::Error;

/// Buffered output file.
///
/// [Output::finish] has to be called to flush buffers and write compression trailers:
/// errors happening on drop are lost.
pub enum Output {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Bzip2(BzEncoder<BufWriter<File>>),
}

impl Output {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self, Error> {
        let f = BufWriter::new(File::create(path)?);
        let output = match Format::from_path(path) {
            Format::Plain => Output::Plain(f),
            Format::Gzip => Output::Gzip(GzEncoder::new(f, flate2::Compression::default())),
            Format::Bzip2 => Output::Bzip2(BzEncoder::new(f, bzip2::Compression::default())),
        };
        Ok(output)
    }

    /// Flush everything to disk.
    pub fn finish(self) -> Result<(), Error> {
        let mut f = match self {
            Output::Plain(f) => f,
            Output::Gzip(enc) => enc.finish()?,
            Output::Bzip2(enc) => enc.finish()?,
        };
        f.flush()?;
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Output::Plain(f) => f.write(buf),
            Output::Gzip(enc) => enc.write(buf),
            Output::Bzip2(enc) => enc.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Output::Plain(f) => f.flush(),
            Output::Gzip(enc) => enc.flush(),
            Output::Bzip2(enc) => enc.flush(),
        }
    }
}
