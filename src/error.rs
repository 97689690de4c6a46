//! Error enum
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Bzip2(bzip2::Error),
    /// Malformed vectors file header.
    Header(String),
    /// Invalid parameters (zero chunk size, unknown key format...)
    Config(String),
    /// A second stream ended inside chunk `chunk` with `leftover` bytes
    /// still undecoded, and the resync policy only allows one.
    Resync {
        chunk: usize,
        leftover: usize,
    },
    Custom(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<bzip2::Error> for Error {
    fn from(e: bzip2::Error) -> Error {
        Error::Bzip2(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Bzip2(e) => write!(f, "bzip2 stream error: {}", e),
            Error::Header(h) => write!(f, "invalid header: {}", h),
            Error::Config(c) => write!(f, "invalid configuration: {}", c),
            Error::Resync { chunk, leftover } => write!(
                f,
                "chunk {} holds more than one stream boundary ({} bytes left)",
                chunk, leftover
            ),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn from_io() {
        let e: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "nope").into();
        assert!(matches!(e, Error::Io(_)));
    }

    #[test]
    fn display_resync() {
        let e = Error::Resync {
            chunk: 3,
            leftover: 12,
        };
        assert_eq!(
            e.to_string(),
            "chunk 3 holds more than one stream boundary (12 bytes left)"
        );
    }
}
