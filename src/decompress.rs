/*! Streaming decompression

Incremental decompression of (possibly multi-stream) bzip2 files, chunk by chunk.

A compressed file is read in chunks of [Config::chunk_size] bytes ([Chunks]),
each chunk is fed to a [Session] that writes decompressed bytes to the sink as soon as they are available.

Multi-stream archives (Wikipedia `pages-articles-multistream` dumps for example) are a concatenation of independent bzip2 streams.
When a session reaches the end of its stream, it is discarded and a fresh one is fed the remaining bytes of the chunk.

```no_run
use std::io;
use std::path::Path;
use yawv_prep::decompress::{decompress_file, Config};

let config = Config::default().with_max_chunks(Some(4));
let summary = decompress_file(Path::new("enwiki-pages-articles-multistream.xml.bz2"), &mut io::stdout(), &config)?;
println!("{:?}", summary);
# Ok::<(), yawv_prep::error::Error>(())
```
!*/
mod chunks;
mod session;
mod stream;

pub use chunks::Chunks;
pub use session::Session;
pub use stream::{decompress, decompress_file, Config, Resync, Summary, DEFAULT_CHUNK_SIZE};
