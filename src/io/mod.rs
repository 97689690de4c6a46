/*!
# IO utilities

Opening and creating text files that may be compressed.

The compression format is inferred from the file extension:
`.gz` files go through `flate2`, `.bz2` files through `bzip2`, and anything else is read/written as is.
Multi-member gzip and multi-stream bzip2 files are read entirely.
!*/
mod format;
mod output;

pub use format::Format;
pub use output::Output;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use log::debug;

use crate::error::Error;

/// Open `path` for buffered reading, decompressing on the fly if needed.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let f = File::open(path)?;
    let format = Format::from_path(path);
    debug!("opening {:?} ({:?})", path, format);

    let reader: Box<dyn BufRead> = match format {
        Format::Plain => Box::new(BufReader::new(f)),
        Format::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(f)))),
        Format::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(BufReader::new(f)))),
    };

    Ok(reader)
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::{open, Output};

    #[test]
    fn plain_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.vec");

        let mut out = Output::create(&path).unwrap();
        out.write_all(b"1 2\nfoo 0.1 0.2\n").unwrap();
        out.finish().unwrap();

        let mut content = String::new();
        open(&path).unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "1 2\nfoo 0.1 0.2\n");
    }

    #[test]
    fn compressed_files_are_compressed() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["words.vec.gz", "words.txt.bz2"] {
            let path = dir.path().join(name);
            let text = "bar 0.3 0.4\n".repeat(100);

            let mut out = Output::create(&path).unwrap();
            out.write_all(text.as_bytes()).unwrap();
            out.finish().unwrap();

            let on_disk = std::fs::read(&path).unwrap();
            assert!(on_disk.len() < text.len());

            let mut content = String::new();
            open(&path).unwrap().read_to_string(&mut content).unwrap();
            assert_eq!(content, text);
        }
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open(&dir.path().join("nope.txt")).is_err());
    }
}
