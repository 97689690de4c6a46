/*! # yawv-prep

Dataset preparation tools for word vector visualisation:

- [decompress]: incremental decompression of (multi-stream) bzip2 dumps, for previewing huge Wikipedia XML dumps.
- [filtering::vocab]: extraction of the vectors of a given vocabulary from a word2vec-formatted text file.
- [filtering::quotes]: removal of vector lines containing quote characters.
!*/
pub mod decompress;
pub mod error;
pub mod filtering;
pub mod io;
