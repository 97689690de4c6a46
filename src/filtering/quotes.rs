//! Quote character filtering.
//!
//! Word vector files sometimes carry tokens with quotation marks that break downstream
//! (JSON/JS) consumers. This drops every line that contains a `'` or a `"`.
use std::{
    io::{BufRead, Write},
    path::Path,
};

use log::info;

use super::Filter;
use crate::{error::Error, io};

/// Keeps lines without any single or double quote.
#[derive(Debug, Default)]
pub struct Quotes;

impl Filter<&[u8]> for Quotes {
    fn detect(&self, line: &[u8]) -> bool {
        !line.iter().any(|b| *b == b'"' || *b == b'\'')
    }
}

/// Number of kept/dropped lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub kept: usize,
    pub dropped: usize,
}

/// Copy lines from `reader` to `writer`, keeping only the ones that pass `filter`.
///
/// Lines are copied verbatim, line terminators included.
pub fn filter_lines<R, W, F>(mut reader: R, writer: &mut W, filter: &F) -> Result<Counts, Error>
where
    R: BufRead,
    W: Write + ?Sized,
    F: for<'a> Filter<&'a [u8]>,
{
    let mut counts = Counts::default();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        if filter.detect(line.as_slice()) {
            writer.write_all(&line)?;
            counts.kept += 1;
        } else {
            counts.dropped += 1;
        }
    }

    Ok(counts)
}

/// Filter the file at `input` into `output`, removing lines with quotes.
pub fn run(input: &Path, output: &Path) -> Result<Counts, Error> {
    let reader = io::open(input)?;
    let mut writer = io::Output::create(output)?;

    let counts = filter_lines(reader, &mut writer, &Quotes)?;
    writer.finish()?;

    info!(
        "kept {} lines, dropped {} lines from {:?}",
        counts.kept, counts.dropped, input
    );
    Ok(counts)
}
