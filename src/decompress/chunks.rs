//! Fixed-size chunk reading.
use std::io::{ErrorKind, Read};

/// Iterates over a reader in chunks of `chunk_size` bytes.
///
/// Every chunk is full except the last one, which may be shorter.
/// Iteration stops at the first empty read (end of stream), which is never yielded.
#[derive(Debug)]
pub struct Chunks<R> {
    reader: R,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> Chunks<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size,
            done: false,
        }
    }

    /// fill a buffer up to `chunk_size`, stopping early at end of stream.
    fn fill(&mut self) -> std::io::Result<Vec<u8>> {
        let mut buf = vec![0; self.chunk_size];
        let mut filled = 0;
        while filled < self.chunk_size {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        buf.truncate(filled);
        Ok(buf)
    }
}

impl<R: Read> Iterator for Chunks<R> {
    type Item = std::io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.fill() {
            Ok(chunk) if chunk.is_empty() => {
                self.done = true;
                None
            }
            Ok(chunk) => Some(Ok(chunk)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
