//! Streaming decompression of dump archives.
//!
//! A [Decompressor] walks an ordered list of archives and emits their decompressed
//! content as byte chunks, archive after archive, with nothing in between.
//!
//! Each archive gets a fresh decoder. Decoders are multi-stream ones
//! ([MultiBzDecoder], [MultiGzDecoder]), so that archives made of several
//! concatenated compressed streams are fully read.
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use log::{debug, info};

use crate::config::Config;
use crate::error::Error;

const BZIP2_MAGIC: &[u8] = b"BZh";
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Compression format of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Bzip2,
    Gzip,
    Plain,
}

impl ArchiveKind {
    /// Guess kind from the file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bz2") => Some(Self::Bzip2),
            Some("gz") => Some(Self::Gzip),
            _ => None,
        }
    }

    /// Guess kind from the first bytes of the archive.
    pub fn from_magic(head: &[u8]) -> Self {
        if head.starts_with(BZIP2_MAGIC) {
            Self::Bzip2
        } else if head.starts_with(GZIP_MAGIC) {
            Self::Gzip
        } else {
            Self::Plain
        }
    }
}

/// Open `path` and wrap it into the right decoder.
///
/// The compressed file is read through a buffer of `buf_size` bytes.
/// An explicit `.bz2`/`.gz` extension wins over magic bytes, so that a damaged
/// archive is reported as such instead of being read as plain text.
pub fn open_archive(
    path: &Path,
    buf_size: usize,
) -> Result<(ArchiveKind, Box<dyn Read + Send>), Error> {
    let source_error = |err| Error::Source {
        path: path.to_path_buf(),
        err,
    };

    let file = File::open(path).map_err(source_error)?;
    // room for the longest magic, whatever the block size
    let mut reader = BufReader::with_capacity(buf_size.max(BZIP2_MAGIC.len()), file);

    let kind = match ArchiveKind::from_extension(path) {
        Some(kind) => kind,
        None => ArchiveKind::from_magic(reader.fill_buf().map_err(source_error)?),
    };

    let reader: Box<dyn Read + Send> = match kind {
        ArchiveKind::Bzip2 => Box::new(MultiBzDecoder::new(reader)),
        ArchiveKind::Gzip => Box::new(MultiGzDecoder::new(reader)),
        ArchiveKind::Plain => Box::new(reader),
    };

    Ok((kind, reader))
}

/// Totals of a decompression run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecompressStats {
    /// archives opened
    pub archives: usize,
    /// decompressed bytes emitted
    pub bytes: u64,
    /// `false` if the consumer asked to stop early
    pub complete: bool,
}

pub struct Decompressor {
    archives: Vec<PathBuf>,
    block_size: usize,
    progress_blocks: usize,
}

impl Decompressor {
    /// Use block size and progress interval from `config`.
    pub fn with_config(archives: Vec<PathBuf>, config: &Config) -> Self {
        Self {
            archives,
            block_size: config.block_size.max(1),
            progress_blocks: config.progress_blocks.max(1),
        }
    }

    /// Decompress every archive in order, feeding each read block to `emit`.
    ///
    /// Compressed input is read `block_size` bytes at a time, and emitted blocks
    /// are `block_size` bytes long except for the last one of each archive.
    /// Blocks are never empty.
    /// `emit` returns [ControlFlow::Break] to stop reading (e.g. when the consumer is gone),
    /// in which case the returned stats are not `complete`.
    ///
    /// The first unreadable or malformed archive stops the run: the following
    /// ones are not opened.
    pub fn run<F>(&self, mut emit: F) -> Result<DecompressStats, Error>
    where
        F: FnMut(Vec<u8>) -> Result<ControlFlow<()>, Error>,
    {
        let mut stats = DecompressStats::default();
        let mut nb_blocks: usize = 0;

        for path in &self.archives {
            let (kind, mut reader) = open_archive(path, self.block_size)?;
            info!("decompressing {:?} ({:?})", path, kind);
            stats.archives += 1;

            loop {
                let block = read_block(&mut reader, self.block_size).map_err(|err| {
                    Error::Decompression {
                        path: path.clone(),
                        err,
                    }
                })?;
                if block.is_empty() {
                    break;
                }
                let n = block.len();

                stats.bytes += n as u64;
                nb_blocks += 1;
                if nb_blocks % self.progress_blocks == 0 {
                    info!(
                        "{} blocks decompressed ({} MiB)",
                        nb_blocks,
                        stats.bytes / (1024 * 1024)
                    );
                }

                if emit(block)?.is_break() {
                    debug!("consumer stopped, leaving {:?}", path);
                    return Ok(stats);
                }
            }
            debug!("done with {:?}", path);
        }

        stats.complete = true;
        Ok(stats)
    }

    /// Decompress every archive in order into `out`.
    pub fn decompress_to<W: Write>(&self, out: &mut W) -> Result<DecompressStats, Error> {
        self.run(|block| {
            out.write_all(&block)?;
            Ok(ControlFlow::Continue(()))
        })
    }
}

/// Read up to `size` bytes, stopping short only at the end of `reader`.
fn read_block(reader: &mut impl Read, size: usize) -> std::io::Result<Vec<u8>> {
    let mut block = Vec::with_capacity(size);
    reader.take(size as u64).read_to_end(&mut block)?;
    block.shrink_to_fit();
    Ok(block)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use bzip2::write::BzEncoder;
    use flate2::write::GzEncoder;

    use super::*;

    fn bz2(data: &[u8]) -> Vec<u8> {
        let mut enc = BzEncoder::new(Vec::new(), bzip2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn gz(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn decompress(paths: Vec<PathBuf>, block_size: usize) -> Result<Vec<u8>, Error> {
        let config = Config::default().with_block_size(block_size);
        let mut out = Vec::new();
        Decompressor::with_config(paths, &config).decompress_to(&mut out)?;
        Ok(out)
    }

    #[test]
    fn kind_detection() {
        assert_eq!(
            ArchiveKind::from_extension(Path::new("enwiki.xml.bz2")),
            Some(ArchiveKind::Bzip2)
        );
        assert_eq!(
            ArchiveKind::from_extension(Path::new("a.txt.gz")),
            Some(ArchiveKind::Gzip)
        );
        assert_eq!(ArchiveKind::from_extension(Path::new("dump.xml")), None);
        assert_eq!(ArchiveKind::from_magic(b"BZh91AY"), ArchiveKind::Bzip2);
        assert_eq!(ArchiveKind::from_magic(&[0x1f, 0x8b, 8]), ArchiveKind::Gzip);
        assert_eq!(ArchiveKind::from_magic(b"<mediawiki"), ArchiveKind::Plain);
        assert_eq!(ArchiveKind::from_magic(b""), ArchiveKind::Plain);
    }

    #[test]
    fn concatenation_is_per_archive() {
        let dir = tempfile::tempdir().unwrap();
        let contents: [&[u8]; 3] = [b"first\narchive", b"second\n", b"\nthird\n"];
        let paths: Vec<PathBuf> = contents
            .iter()
            .enumerate()
            .map(|(i, c)| write_file(dir.path(), &format!("{}.xml.bz2", i), &bz2(c)))
            .collect();

        let whole = decompress(paths.clone(), 4096).unwrap();
        let mut separately = Vec::new();
        for path in paths {
            separately.extend(decompress(vec![path], 4096).unwrap());
        }

        assert_eq!(whole, separately);
        assert_eq!(whole, b"first\narchivesecond\n\nthird\n");
    }

    #[test]
    fn block_size_does_not_matter() {
        let dir = tempfile::tempdir().unwrap();
        let data: Vec<u8> = (0..20_000u32).flat_map(|i| i.to_le_bytes()).collect();
        let path = write_file(dir.path(), "data.bz2", &bz2(&data));

        for block_size in [1, 7, 4096, 1_024_000] {
            assert_eq!(decompress(vec![path.clone()], block_size).unwrap(), data);
        }
    }

    #[test]
    fn multi_stream_archive() {
        let dir = tempfile::tempdir().unwrap();
        let mut content = bz2(b"stream one\n");
        content.extend(bz2(b"stream two\n"));
        let path = write_file(dir.path(), "multi.xml.bz2", &content);

        assert_eq!(
            decompress(vec![path], 16).unwrap(),
            b"stream one\nstream two\n"
        );
    }

    #[test]
    fn mixed_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_file(dir.path(), "a.gz", &gz(b"gzip\n")),
            write_file(dir.path(), "b.xml", b"plain\n"),
            // no extension: sniffed
            write_file(dir.path(), "c", &bz2(b"bzip2\n")),
        ];
        assert_eq!(decompress(paths, 3).unwrap(), b"gzip\nplain\nbzip2\n");
    }

    #[test]
    fn sniffing_with_tiny_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "dump", &bz2(b"sniffed\n"));
        assert_eq!(decompress(vec![path], 1).unwrap(), b"sniffed\n");
    }

    #[test]
    fn missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.bz2");
        match decompress(vec![path.clone()], 16) {
            Err(Error::Source { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected source error, got {:?}", other),
        }
    }

    #[test]
    fn truncated_archive_stops_run() {
        let dir = tempfile::tempdir().unwrap();
        let data: Vec<u8> = (0..50_000u32).flat_map(|i| i.to_le_bytes()).collect();
        let mut compressed = bz2(&data);
        compressed.truncate(compressed.len() / 2);
        let bad = write_file(dir.path(), "bad.bz2", &compressed);
        // never opened
        let missing = dir.path().join("missing.bz2");

        match decompress(vec![bad.clone(), missing], 1024) {
            Err(Error::Decompression { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected decompression error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn garbage_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "garbage.bz2", b"this is not bzip2 at all");
        assert!(matches!(
            decompress(vec![path], 16),
            Err(Error::Decompression { .. })
        ));
    }

    #[test]
    fn blocks_are_full_and_tight() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "x.bz2", &bz2(&[b'x'; 10_000]));
        let d = Decompressor::with_config(vec![path], &Config::default().with_block_size(4096));

        let mut blocks = Vec::new();
        d.run(|block| {
            blocks.push((block.len(), block.capacity()));
            Ok(ControlFlow::Continue(()))
        })
        .unwrap();

        assert_eq!(blocks, vec![(4096, 4096), (4096, 4096), (1808, 1808)]);
    }

    #[test]
    fn consumer_stops() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.xml", &[b'a'; 100]);
        let d = Decompressor::with_config(vec![path], &Config::default().with_block_size(10));

        let mut seen = 0;
        let stats = d
            .run(|_| {
                seen += 1;
                Ok(if seen == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                })
            })
            .unwrap();

        assert_eq!(seen, 3);
        assert_eq!(stats.bytes, 30);
        assert!(!stats.complete);
    }
}
