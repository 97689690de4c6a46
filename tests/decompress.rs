use std::io::{Cursor, Read, Write};

use bzip2::{read::MultiBzDecoder, write::BzEncoder, Compression};
use yawv_prep::decompress::{decompress, decompress_file, Config, Resync};

/// Fake wikipedia dump content.
fn pages(from: usize, nb: usize) -> Vec<u8> {
    (from..from + nb)
        .map(|x| {
            format!(
                "<page><title>Article {}</title><id>{}</id><text>{}</text></page>\n",
                x,
                x * 31,
                "lorem ipsum dolor sit amet ".repeat(x % 17 + 1)
            )
        })
        .collect::<String>()
        .into_bytes()
}

fn compress(data: &[u8]) -> Vec<u8> {
    let mut enc = BzEncoder::new(Vec::new(), Compression::best());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn one_shot(compressed: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    MultiBzDecoder::new(compressed).read_to_end(&mut out).unwrap();
    out
}

#[test_log::test]
fn chunked_equals_one_shot() {
    let compressed = compress(&pages(0, 2000));
    let expected = one_shot(&compressed);

    for chunk_size in [1, 13, 512, 16384, 1 << 20] {
        let config = Config::new(chunk_size, None, Resync::Once).unwrap();
        let mut out = Vec::new();
        let summary = decompress(Cursor::new(&compressed), &mut out, &config).unwrap();

        assert_eq!(out, expected, "chunk size {}", chunk_size);
        assert_eq!(summary.streams, 1);
        assert!(!summary.capped);
    }
}

#[test_log::test]
fn multi_stream() {
    let first = pages(0, 300);
    let second = pages(300, 500);
    let mut compressed = compress(&first);
    compressed.extend_from_slice(&compress(&second));

    let mut expected = first.clone();
    expected.extend_from_slice(&second);

    for chunk_size in [100, 4096, 16384] {
        let config = Config::new(chunk_size, None, Resync::Once).unwrap();
        let mut out = Vec::new();
        let summary = decompress(Cursor::new(&compressed), &mut out, &config).unwrap();

        assert_eq!(out, expected, "chunk size {}", chunk_size);
        assert_eq!(summary.streams, 2);
        assert_eq!(summary.bytes_out, expected.len() as u64);
    }
}

#[test_log::test]
fn many_small_streams_exhaustive() {
    // wikipedia multistream dumps hold 100 pages per stream
    let mut compressed = Vec::new();
    let mut expected = Vec::new();
    for i in 0..20 {
        let content = pages(i * 100, 100);
        compressed.extend_from_slice(&compress(&content));
        expected.extend_from_slice(&content);
    }

    let config = Config::new(1 << 20, None, Resync::Exhaustive).unwrap();
    let mut out = Vec::new();
    let summary = decompress(Cursor::new(&compressed), &mut out, &config).unwrap();

    assert_eq!(out, expected);
    assert_eq!(summary.streams, 20);
    assert_eq!(summary.chunks, 1);
}

#[test_log::test]
fn capped_output_is_a_prefix() {
    let compressed = compress(&pages(0, 5000));
    let uncapped = one_shot(&compressed);

    let chunk_size = 1024;
    let total_chunks = (compressed.len() + chunk_size - 1) / chunk_size;
    assert!(total_chunks > 4);

    let config = Config::new(chunk_size, Some(2), Resync::Once).unwrap();
    let mut out = Vec::new();
    let summary = decompress(Cursor::new(&compressed), &mut out, &config).unwrap();

    assert!(summary.capped);
    assert_eq!(summary.chunks, 3);
    assert!(out.len() < uncapped.len());
    assert!(uncapped.starts_with(&out));
}

#[test_log::test]
fn from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.xml.bz2");
    let content = pages(0, 100);
    std::fs::write(&path, compress(&content)).unwrap();

    let mut out = Vec::new();
    decompress_file(&path, &mut out, &Config::default()).unwrap();
    assert_eq!(out, content);
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Vec::new();
    assert!(decompress_file(&dir.path().join("nope.bz2"), &mut out, &Config::default()).is_err());
}

#[test_log::test]
fn truncated_input_is_not_an_error() {
    // two blocks, the second one cut in half
    let mut content = pages(0, 3000);
    content.extend_from_slice(&pages(3000, 3000));
    let mut enc = BzEncoder::new(Vec::new(), Compression::new(1));
    enc.write_all(&content).unwrap();
    let compressed = enc.finish().unwrap();
    let truncated = &compressed[..compressed.len() * 3 / 4];

    let config = Config::new(4096, None, Resync::Once).unwrap();
    let mut out = Vec::new();
    let summary = decompress(Cursor::new(truncated), &mut out, &config).unwrap();

    assert!(!summary.capped);
    assert_eq!(summary.streams, 0);
    assert!(!out.is_empty());
    assert!(out.len() < content.len());
    assert!(content.starts_with(&out));
}
