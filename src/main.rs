//! # yawv-prep
//!
//! Dataset preparation for word vector visualisation.
//!
//! ```sh
//! yawv-prep 0.1.0
//! word vector dataset preparation tools.
//!
//! USAGE:
//!     yawv-prep <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     decompress       Incrementally decompress a .bz2 file to stdout
//!     filter-quotes    Remove lines containing quotation marks
//!     filter-vocab     Read a word2vec-formatted file and write the vectors of the provided keys
//!     help             Prints this message or the help of the given subcommand(s)
//! ```
//!
//! Use `RUST_LOG=info` (or `debug`) to get progress information on stderr.

use std::io::{BufWriter, ErrorKind};
use std::process;

use yawv_prep::{
    decompress::decompress_file,
    error::Error,
    filtering::{quotes, vocab},
    io::Output,
};

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::YawvPrep::from_args_or_exit();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::YawvPrep::Decompress(d) => {
            let config = d.config()?;
            let result = match &d.output {
                Some(path) => {
                    let mut out = Output::create(path)?;
                    decompress_file(&d.input, &mut out, &config)
                        .and_then(|summary| out.finish().map(|_| summary))
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut out = BufWriter::new(stdout.lock());
                    decompress_file(&d.input, &mut out, &config)
                }
            };

            match result {
                Ok(summary) => info!("{:?}", summary),
                // reader of stdout went away (`| head` for example)
                Err(Error::Io(e)) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("output closed early");
                }
                Err(e) => return Err(e),
            }
        }

        cli::YawvPrep::FilterVocab(f) => {
            let config = vocab::Config::from(f);
            let outcome = vocab::run(&config)?;
            println!("{}", outcome);
            if !outcome.is_complete() {
                process::exit(outcome.exit_code());
            }
        }

        cli::YawvPrep::FilterQuotes(q) => {
            let counts = quotes::run(&q.input, &q.output)?;
            info!("{:?}", counts);
        }
    };
    Ok(())
}
