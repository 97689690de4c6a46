/*! Vocabulary filtering

Extracts the vectors of a known set of keys from a word2vec-formatted text file
(fastText `.vec`, Wikipedia2Vec `.txt`...).

The input begins with a `<count> <dims>` header, followed by one `<key> <dims floats>` line per vector.
The output has the same format, with a header announcing exactly the number of requested keys.

Scanning stops as soon as every key has been found, which matters for multi-gigabyte inputs
sorted by frequency.
!*/
use std::{
    collections::HashSet,
    fmt,
    io::{BufRead, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use log::{debug, info, warn};

use super::FilterMut;
use crate::{error::Error, io};

/// Prefix of entity keys in Wikipedia2Vec files.
pub const ENTITY_PREFIX: &str = "ENTITY/";

/// How keys read from the keys file are matched against vector keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// `United States` becomes `ENTITY/United_States`.
    Entity,
    Verbatim,
}

impl KeyFormat {
    pub fn format(&self, key: &str) -> String {
        match self {
            KeyFormat::Entity => format!("{}{}", ENTITY_PREFIX, key.replace(' ', "_")),
            KeyFormat::Verbatim => key.to_string(),
        }
    }
}

impl FromStr for KeyFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entity" => Ok(KeyFormat::Entity),
            "verbatim" => Ok(KeyFormat::Verbatim),
            other => Err(Error::Config(format!(
                "unknown key format {:?} (expected entity or verbatim)",
                other
            ))),
        }
    }
}

/// `<count> <dims>` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub count: usize,
    pub dims: usize,
}

impl Header {
    pub fn parse(line: &str) -> Result<Self, Error> {
        let mut fields = line.split_whitespace();
        let mut next_number = |name: &str| -> Result<usize, Error> {
            let field = fields
                .next()
                .ok_or_else(|| Error::Header(format!("missing {} in {:?}", name, line)))?;
            field
                .parse()
                .map_err(|_| Error::Header(format!("invalid {} {:?}", name, field)))
        };

        let count = next_number("count")?;
        let dims = next_number("dimensions")?;
        if fields.next().is_some() {
            return Err(Error::Header(format!("trailing fields in {:?}", line)));
        }

        Ok(Self { count, dims })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.dims)
    }
}

/// Set of keys still to be found.
///
/// Implements [FilterMut] on vector lines: a line is detected when its first token is a key
/// that has not been seen yet. The key is then forgotten, so that each key is kept at most once.
#[derive(Debug, Default, Clone)]
pub struct Keys {
    remaining: HashSet<String>,
    total: usize,
}

impl Keys {
    pub fn new<I, S>(keys: I, format: KeyFormat) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let remaining: HashSet<String> = keys
            .into_iter()
            .map(|k| format.format(k.as_ref()))
            .collect();
        let total = remaining.len();
        Self { remaining, total }
    }

    /// Read keys, one per line. Trailing whitespace is stripped and blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R, format: KeyFormat) -> Result<Self, Error> {
        let mut keys = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let key = line.trim_end();
            if !key.is_empty() {
                keys.push(key.to_string());
            }
        }
        Ok(Self::new(keys, format))
    }

    pub fn from_path(path: &Path, format: KeyFormat) -> Result<Self, Error> {
        Self::from_reader(io::open(path)?, format)
    }

    /// Number of distinct keys requested.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of keys not found yet.
    pub fn missing(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl FilterMut<&str> for Keys {
    fn detect_mut(&mut self, line: &str) -> bool {
        match line.split_whitespace().next() {
            Some(key) => self.remaining.remove(key),
            None => false,
        }
    }
}

/// How the scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// every key has been found
    Complete { lines_read: usize },
    /// input exhausted before finding every key
    EndOfFile { lines_read: usize, missing: usize },
    /// line budget exhausted before finding every key
    Budget { lines_read: usize, missing: usize },
}

impl Outcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete { .. })
    }

    /// 0 when every key was found, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_complete() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Complete { lines_read } => {
                write!(f, "Wrote vectors for all keys ({} lines read).", lines_read)
            }
            Outcome::EndOfFile { missing, .. } => write!(
                f,
                "Reached end of file, but did not find all keys ({} missing).",
                missing
            ),
            Outcome::Budget {
                lines_read,
                missing,
            } => write!(
                f,
                "Reached max lines to read, {}, but did not find all keys ({} missing).",
                lines_read, missing
            ),
        }
    }
}

/// Read and parse the `<count> <dims>` header line.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<Header, Error> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::Header("empty input".to_string()));
    }
    let header = Header::parse(&line)?;
    debug!("input header: {} vectors of {} dimensions", header.count, header.dims);
    Ok(header)
}

/// Copy the vectors of `keys` from `reader` to `writer`.
///
/// The output header announces [Keys::total] vectors, with the dimensions of the input header.
/// Matching lines are written verbatim, in input order.
/// At most `max_lines` lines (header excluded) are read.
pub fn filter_vectors<R, W>(
    mut reader: R,
    writer: &mut W,
    keys: Keys,
    max_lines: usize,
) -> Result<Outcome, Error>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let header = read_header(&mut reader)?;
    scan_vectors(reader, writer, header, keys, max_lines)
}

/// Same as [filter_vectors], with the input header already consumed from `reader`.
pub fn scan_vectors<R, W>(
    mut reader: R,
    writer: &mut W,
    header: Header,
    mut keys: Keys,
    max_lines: usize,
) -> Result<Outcome, Error>
where
    R: BufRead,
    W: Write + ?Sized,
{
    // written upfront, assuming every key will be found
    let out_header = Header {
        count: keys.total(),
        dims: header.dims,
    };
    writeln!(writer, "{}", out_header)?;

    let mut lines_read = 0;
    if keys.is_complete() {
        return Ok(Outcome::Complete { lines_read });
    }

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(Outcome::EndOfFile {
                lines_read,
                missing: keys.missing(),
            });
        }
        lines_read += 1;

        if keys.detect_mut(line.as_str()) {
            writer.write_all(line.as_bytes())?;
            debug!(
                "found {:?} at line {}",
                line.split_whitespace().next().unwrap_or_default(),
                lines_read
            );
        }

        if keys.is_complete() {
            return Ok(Outcome::Complete { lines_read });
        }
        if lines_read >= max_lines {
            return Ok(Outcome::Budget {
                lines_read,
                missing: keys.missing(),
            });
        }
    }
}

/// Vocabulary filtering parameters.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub keys: PathBuf,
    pub format: KeyFormat,
    pub max_lines: usize,
    pub output: PathBuf,
}

/// Load keys, then filter `config.input` into `config.output`.
pub fn run(config: &Config) -> Result<Outcome, Error> {
    let keys = Keys::from_path(&config.keys, config.format)?;
    info!("Found {} keys.", keys.total());

    // the output is only created once the input looks like a vectors file
    let mut reader = io::open(&config.input)?;
    let header = read_header(&mut reader)?;

    let mut writer = io::Output::create(&config.output)?;
    let outcome = scan_vectors(reader, &mut writer, header, keys, config.max_lines)?;
    writer.finish()?;

    if outcome.is_complete() {
        info!("{}", outcome);
    } else {
        warn!("{}", outcome);
    }
    Ok(outcome)
}
