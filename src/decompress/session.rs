//! Single-stream decompression session.
use std::io::Write;

use bzip2::{Decompress, Status};
use log::trace;

use crate::error::Error;

/// Size of the intermediate output buffer.
const OUT_BUF_SIZE: usize = 64 * 1024;

/// Wraps a bzip2 decoder for exactly one compressed stream.
///
/// Once the end of the stream has been reached, the session is finished and refuses more input:
/// create a new one to decode the next stream of a multi-stream archive.
pub struct Session {
    inner: Decompress,
    out: Vec<u8>,
    finished: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            inner: Decompress::new(false),
            out: Vec::with_capacity(OUT_BUF_SIZE),
            finished: false,
        }
    }

    /// Feed `input` to the decoder, writing every decompressed byte to `sink`.
    ///
    /// Returns the number of bytes of `input` that have been consumed.
    /// This is `input.len()` unless the stream ended inside `input`,
    /// in which case the remaining bytes belong to the next stream.
    pub fn feed<W: Write + ?Sized>(&mut self, input: &[u8], sink: &mut W) -> Result<usize, Error> {
        if self.finished {
            return Err(Error::Custom(
                "cannot feed a session whose stream already ended".to_string(),
            ));
        }

        let mut consumed = 0;
        loop {
            let in_before = self.inner.total_in();
            let out_before = self.inner.total_out();

            self.out.clear();
            let status = self.inner.decompress_vec(&input[consumed..], &mut self.out)?;

            let read = (self.inner.total_in() - in_before) as usize;
            consumed += read;
            sink.write_all(&self.out)?;

            if status == Status::StreamEnd {
                trace!("stream end after {} bytes in", self.inner.total_in());
                self.finished = true;
                break;
            }

            // the decoder stops either because it lacks input or because the output buffer is full.
            // in the latter case it may still hold decompressed data.
            let progressed = read > 0 || self.inner.total_out() > out_before;
            let out_full = self.out.len() == self.out.capacity();
            if !progressed || (consumed == input.len() && !out_full) {
                break;
            }
        }

        Ok(consumed)
    }

    /// `true` once the end-of-stream marker has been decoded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total compressed bytes consumed by this session.
    pub fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    /// Total decompressed bytes produced by this session.
    pub fn total_out(&self) -> u64 {
        self.inner.total_out()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
