//! Chunked, multi-stream decompression loop.
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

use log::{debug, info, warn};

use super::{Chunks, Session};
use crate::error::Error;

/// Default number of bytes read at a time.
pub const DEFAULT_CHUNK_SIZE: usize = 16384;

/// How many stream boundaries are handled inside a single chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resync {
    /// At most one new session per chunk.
    /// A second boundary with bytes left after it is an error.
    #[default]
    Once,
    /// Start new sessions until the chunk is consumed.
    Exhaustive,
}

impl Resync {
    fn limit(&self) -> Option<usize> {
        match self {
            Resync::Once => Some(1),
            Resync::Exhaustive => None,
        }
    }
}

impl FromStr for Resync {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(Resync::Once),
            "exhaustive" => Ok(Resync::Exhaustive),
            other => Err(Error::Config(format!(
                "unknown resync policy {:?} (expected once or exhaustive)",
                other
            ))),
        }
    }
}

/// Decompression parameters.
#[derive(Debug, Clone)]
pub struct Config {
    chunk_size: usize,
    max_chunks: Option<usize>,
    resync: Resync,
}

impl Config {
    /// Create a new configuration.
    ///
    /// Chunks `0..=max_chunks` are processed, `None` processes the whole input.
    pub fn new(
        chunk_size: usize,
        max_chunks: Option<usize>,
        resync: Resync,
    ) -> Result<Self, Error> {
        if chunk_size == 0 {
            return Err(Error::Config("chunk size must be positive".to_string()));
        }
        Ok(Self {
            chunk_size,
            max_chunks,
            resync,
        })
    }

    pub fn with_max_chunks(mut self, max_chunks: Option<usize>) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    pub fn with_resync(mut self, resync: Resync) -> Self {
        self.resync = resync;
        self
    }

    /// Get the config's chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the config's max chunks.
    pub fn max_chunks(&self) -> Option<usize> {
        self.max_chunks
    }

    /// Get the config's resync policy.
    pub fn resync(&self) -> Resync {
        self.resync
    }
}

impl Default for Config {
    /// 16KiB chunks, no cap, one resync per chunk.
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_chunks: None,
            resync: Resync::Once,
        }
    }
}

/// What happened during a decompression run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// chunks fed to the decoder
    pub chunks: usize,
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// compressed streams that reached their end marker
    pub streams: usize,
    /// `true` if the chunk cap stopped the run before the end of the source
    pub capped: bool,
}

/// Counts bytes going through to the sink.
struct Counting<'a, W: ?Sized> {
    inner: &'a mut W,
    count: u64,
}

impl<W: Write + ?Sized> Write for Counting<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Decompress `source` into `sink`, chunk by chunk.
///
/// Decompressed bytes are written as soon as the decoder yields them.
/// Reaching the chunk cap is not an error: the output is then a (possibly truncated) prefix
/// of the whole decompressed content.
pub fn decompress<R, W>(source: R, sink: &mut W, config: &Config) -> Result<Summary, Error>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut sink = Counting {
        inner: sink,
        count: 0,
    };
    let mut summary = Summary::default();
    let mut session = Session::new();

    for (index, chunk) in Chunks::new(source, config.chunk_size).enumerate() {
        if config.max_chunks.map_or(false, |max| index > max) {
            info!("reached chunk limit ({} chunks)", index);
            summary.capped = true;
            break;
        }

        let chunk = chunk?;
        summary.chunks += 1;
        summary.bytes_in += chunk.len() as u64;

        let mut rest: &[u8] = &chunk;
        let mut resyncs = 0;
        loop {
            // a session is never reused once its stream has ended
            if session.is_finished() {
                session = Session::new();
            }

            let consumed = session.feed(rest, &mut sink)?;
            rest = &rest[consumed..];

            if session.is_finished() {
                summary.streams += 1;
                debug!(
                    "stream {} ended in chunk {} ({} compressed bytes)",
                    summary.streams,
                    index,
                    session.total_in()
                );
            }

            if !session.is_finished() || rest.is_empty() {
                break;
            }

            // unused data after the end of a stream: start the next one
            if config.resync.limit() == Some(resyncs) {
                return Err(Error::Resync {
                    chunk: index,
                    leftover: rest.len(),
                });
            }
            resyncs += 1;
        }
    }

    if !summary.capped && summary.chunks > 0 && !session.is_finished() {
        warn!("input ended in the middle of a compressed stream");
    }

    sink.flush()?;
    summary.bytes_out = sink.count;
    Ok(summary)
}

/// Decompress the file at `path` into `sink`.
pub fn decompress_file<W>(path: &Path, sink: &mut W, config: &Config) -> Result<Summary, Error>
where
    W: Write + ?Sized,
{
    let f = File::open(path)?;
    debug!("decompressing {:?} with {:?}", path, config);
    decompress(f, sink, config)
}
