//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use yawv_prep::{
    decompress::{self, Resync},
    error::Error,
    filtering::vocab::{self, KeyFormat},
};

#[derive(Debug, StructOpt)]
#[structopt(name = "yawv-prep", about = "word vector dataset preparation tools.")]
/// Holds every command that is callable by the `yawv-prep` command.
pub enum YawvPrep {
    #[structopt(about = "Incrementally decompress a .bz2 file to stdout")]
    Decompress(Decompress),
    #[structopt(
        about = "Read a word2vec-formatted file and write the vectors of the provided keys"
    )]
    FilterVocab(FilterVocab),
    #[structopt(about = "Remove lines containing quotation marks")]
    FilterQuotes(FilterQuotes),
}

impl YawvPrep {
    /// Parse process arguments.
    ///
    /// Usage errors are printed on stdout and exit with code 1.
    /// `--help` and `--version` print and exit with code 0.
    pub fn from_args_or_exit() -> Self {
        match Self::from_iter_safe(std::env::args_os()) {
            Ok(opt) => opt,
            Err(e) if e.use_stderr() => {
                println!("{}", e.message);
                std::process::exit(1);
            }
            Err(e) => e.exit(),
        }
    }
}

#[derive(Debug, StructOpt)]
/// Decompress command and parameters.
///
/// ```sh
/// yawv-prep-decompress 0.1.0
/// Incrementally decompress a .bz2 file to stdout
///
/// USAGE:
///     yawv-prep decompress [FLAGS] [OPTIONS]
///
/// FLAGS:
///         --all        Read the whole file, ignoring --num_chunks.
///     -h, --help       Prints help information
///     -V, --version    Prints version information
///
/// OPTIONS:
///         --chunk_size <chunk-size>    Bytes to read from the file at a time. [default: 16384]
///         --input <input>              File to read. [default: data/enwiki-[...].xml.bz2]
///         --num_chunks <num-chunks>    Number of chunks to read. [default: 16]
///     -o, --output <output>            Write to this file instead of stdout.
///         --resync <resync>            ... [default: once]  [possible values: once, exhaustive]
/// ```
pub struct Decompress {
    #[structopt(
        long = "chunk_size",
        default_value = "16384",
        help = "Bytes to read from the file at a time."
    )]
    pub chunk_size: usize,
    #[structopt(
        long = "num_chunks",
        default_value = "16",
        help = "Number of chunks to read."
    )]
    pub num_chunks: usize,
    #[structopt(long = "all", help = "Read the whole file, ignoring --num_chunks.")]
    pub all: bool,
    #[structopt(
        long = "resync",
        default_value = "once",
        possible_values = &["once", "exhaustive"],
        help = "Number of stream boundaries handled in a single chunk (once: at most one)."
    )]
    pub resync: Resync,
    #[structopt(
        parse(from_os_str),
        long = "input",
        default_value = "data/enwiki-20220101-pages-articles-multistream/enwiki-20220101-pages-articles-multistream.xml.bz2",
        help = "File to read."
    )]
    pub input: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output",
        help = "Write to this file instead of stdout."
    )]
    pub output: Option<PathBuf>,
}

impl Decompress {
    pub fn config(&self) -> Result<decompress::Config, Error> {
        let max_chunks = if self.all {
            None
        } else {
            Some(self.num_chunks)
        };
        decompress::Config::new(self.chunk_size, max_chunks, self.resync)
    }
}

#[derive(Debug, StructOpt)]
/// Vocabulary filtering command and parameters.
pub struct FilterVocab {
    #[structopt(
        parse(from_os_str),
        long = "input",
        default_value = "data/wikipedia2vec_enwiki_20180420_300d.txt",
        help = "File to read."
    )]
    pub input: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "keys",
        default_value = "scripts/un_members_2018.txt",
        help = "File with keys to filter to, one per line."
    )]
    pub keys: PathBuf,
    #[structopt(
        long = "type",
        default_value = "entity",
        possible_values = &["entity", "verbatim"],
        help = "If \"entity\", format keys in Wikipedia2Vec entity format before looking up. For example, \"United States\" becomes \"ENTITY/United_States\"."
    )]
    pub key_type: KeyFormat,
    #[structopt(
        long = "max_lines_to_read",
        default_value = "500000",
        help = "Maximum number of lines to read from --input."
    )]
    pub max_lines: usize,
    #[structopt(
        parse(from_os_str),
        long = "output",
        default_value = "data/wikipedia2vec_enwiki_20180420_300d_un_members.txt",
        help = "File to write to."
    )]
    pub output: PathBuf,
}

impl From<FilterVocab> for vocab::Config {
    fn from(f: FilterVocab) -> Self {
        vocab::Config {
            input: f.input,
            keys: f.keys,
            format: f.key_type,
            max_lines: f.max_lines,
            output: f.output,
        }
    }
}

#[derive(Debug, StructOpt)]
/// Quote filtering command and parameters.
///
/// ```sh
/// yawv-prep filter-quotes data/wiki-news-300d-50k.vec data/wiki-news-50k-filtered.vec
/// ```
pub struct FilterQuotes {
    #[structopt(parse(from_os_str), help = "input word vectors")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "filtered output")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use structopt::StructOpt;

    use yawv_prep::{decompress::Resync, filtering::vocab};

    use super::YawvPrep;

    #[test]
    fn help_is_not_a_usage_error() {
        let err = YawvPrep::from_iter_safe(["yawv-prep", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn decompress_defaults() {
        let opt = YawvPrep::from_iter_safe(["yawv-prep", "decompress"]).unwrap();
        let YawvPrep::Decompress(d) = opt else {
            panic!("wrong subcommand");
        };
        let config = d.config().unwrap();
        assert_eq!(config.chunk_size(), 16384);
        assert_eq!(config.max_chunks(), Some(16));
        assert_eq!(config.resync(), Resync::Once);
        assert!(d.output.is_none());
    }

    #[test]
    fn decompress_all() {
        let opt = YawvPrep::from_iter_safe([
            "yawv-prep",
            "decompress",
            "--all",
            "--chunk_size",
            "1024",
            "--resync",
            "exhaustive",
            "--input",
            "dump.xml.bz2",
        ])
        .unwrap();
        let YawvPrep::Decompress(d) = opt else {
            panic!("wrong subcommand");
        };
        let config = d.config().unwrap();
        assert_eq!(config.max_chunks(), None);
        assert_eq!(config.chunk_size(), 1024);
        assert_eq!(config.resync(), Resync::Exhaustive);
    }

    #[test]
    fn zero_chunk_size() {
        let opt =
            YawvPrep::from_iter_safe(["yawv-prep", "decompress", "--chunk_size", "0"]).unwrap();
        let YawvPrep::Decompress(d) = opt else {
            panic!("wrong subcommand");
        };
        assert!(d.config().is_err());
    }

    #[test]
    fn filter_vocab_config() {
        let opt = YawvPrep::from_iter_safe([
            "yawv-prep",
            "filter-vocab",
            "--type",
            "verbatim",
            "--max_lines_to_read",
            "10",
        ])
        .unwrap();
        let YawvPrep::FilterVocab(f) = opt else {
            panic!("wrong subcommand");
        };
        let config = vocab::Config::from(f);
        assert_eq!(config.format, vocab::KeyFormat::Verbatim);
        assert_eq!(config.max_lines, 10);
    }

    #[test]
    fn filter_quotes_needs_two_paths() {
        let err = YawvPrep::from_iter_safe(["yawv-prep", "filter-quotes", "in.vec"]).unwrap_err();
        // reported on stdout by from_args_or_exit
        assert!(err.use_stderr());
        assert!(err.message.contains("<output>"));
        assert!(
            YawvPrep::from_iter_safe(["yawv-prep", "filter-quotes", "in.vec", "out.vec"]).is_ok()
        );
    }
}
