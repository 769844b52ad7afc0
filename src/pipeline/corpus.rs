//! Dump to corpus pipeline
//!
//! Turns one or more compressed dumps into a line-oriented corpus,
//! in a single streaming pass.
//!
//! # Processing
//! 1. The decompressor thread reads archives in order, sending byte blocks on a bounded channel.
//! 1. The normalizer thread splits that byte stream into lines, normalizes each line
//!    (tags, digits, translation, whitespace), optionally splits it into sentences,
//!    and keeps the records that are long enough.
//!    Records are sent in batches on a second bounded channel.
//! 1. The calling thread writes records to `<dst>.partial`.
//! 1. Once every stage succeeded, `<dst>.partial` is moved to `<dst>` and post-processed.
//!
//! A failing stage closes its channels, which stops its neighbours:
//! downstream stages see the end of their input, upstream stages can't send anymore.
use std::fs::File;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use crossbeam::channel::{bounded, Receiver, Sender};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Pipeline, Stats};
use crate::config::Config;
use crate::decompress::{DecompressStats, Decompressor};
use crate::error::Error;
use crate::filtering::{Filter, Length};
use crate::io::{ChunkReader, CorpusWriter, Lines};
use crate::processing::PostProcessor;
use crate::transformers::{Normalizer, SentenceSplitter};

/// Number of records sent at once to the writer.
const RECORD_BATCH: usize = 512;

pub struct CorpusPipeline {
    src: Vec<PathBuf>,
    dst: PathBuf,
    config: Config,
    post: PostProcessor,
}

#[derive(Debug, Default)]
struct NormalizeStats {
    lines: u64,
    candidates: u64,
    accepted: u64,
}

impl CorpusPipeline {
    /// `src` archives are processed in the given order.
    pub fn new(src: Vec<PathBuf>, dst: PathBuf, config: Config) -> Self {
        Self {
            src,
            dst,
            config,
            post: PostProcessor::None,
        }
    }

    pub fn with_post_processor(mut self, post: PostProcessor) -> Self {
        self.post = post;
        self
    }

    /// Where records are written before the run succeeds.
    pub fn partial_path(&self) -> PathBuf {
        let mut name = self.dst.as_os_str().to_os_string();
        name.push(".partial");
        PathBuf::from(name)
    }

    /// Run the three stages, returning the first error in stream order.
    fn stream(&self, writer: CorpusWriter<File>) -> Result<Stats, Error> {
        let normalizer = Normalizer::new(&self.config)?;
        debug!("normalizer: {:?}", normalizer);
        let decompressor = Decompressor::with_config(self.src.clone(), &self.config);

        let capacity = self.config.queue_capacity.max(1);
        let (chunk_tx, chunk_rx) = bounded::<Vec<u8>>(capacity);
        let (record_tx, record_rx) = bounded::<Vec<String>>(capacity);

        let decompressor = &decompressor;
        let normalizer = &normalizer;
        let config = &self.config;

        let (decompressed, normalized, written) = crossbeam::scope(|s| {
            let decompressing = s.spawn(move |_| decompress_stage(decompressor, chunk_tx));
            let normalizing =
                s.spawn(move |_| normalize_stage(chunk_rx, record_tx, normalizer, config));
            let written = write_stage(writer, record_rx);

            (decompressing.join(), normalizing.join(), written)
        })
        .map_err(|_| panicked("pipeline"))?;

        let decompressed = decompressed.map_err(|_| panicked("decompression"))??;
        let normalized = normalized.map_err(|_| panicked("normalization"))??;
        let written = written?;

        if !decompressed.complete {
            return Err(Error::Custom(
                "decompression stopped before the end of the archives".to_string(),
            ));
        }

        Ok(Stats {
            archives: decompressed.archives,
            bytes: decompressed.bytes,
            lines: normalized.lines,
            candidates: normalized.candidates,
            accepted: written,
            post_processed: None,
        })
    }
}

impl Pipeline<Stats> for CorpusPipeline {
    fn run(&self) -> Result<Stats, Error> {
        if self.src.is_empty() {
            return Err(Error::Custom("no archive to process".to_string()));
        }

        let partial = self.partial_path();
        info!(
            "processing {} archive(s) into {:?}",
            self.src.len(),
            self.dst
        );
        let writer = CorpusWriter::create(&partial)?;

        let mut stats = match self.stream(writer) {
            Ok(stats) => stats,
            Err(e) => {
                discard(&partial);
                return Err(e);
            }
        };

        std::fs::rename(&partial, &self.dst).map_err(|err| Error::Output {
            path: self.dst.clone(),
            err,
        })?;
        info!("{}", stats);

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        stats.post_processed = self.post.run(&self.dst, &mut rng)?;

        Ok(stats)
    }
}

fn decompress_stage(
    decompressor: &Decompressor,
    tx: Sender<Vec<u8>>,
) -> Result<DecompressStats, Error> {
    decompressor.run(|block| {
        Ok(match tx.send(block) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        })
    })
}

fn normalize_stage(
    rx: Receiver<Vec<u8>>,
    tx: Sender<Vec<String>>,
    normalizer: &Normalizer,
    config: &Config,
) -> Result<NormalizeStats, Error> {
    let splitter = SentenceSplitter::new(config.split_sentences);
    let length = Length::with_min_size(config.min_length);
    let progress_lines = config.progress_lines.max(1);

    let mut stats = NormalizeStats::default();
    let mut batch = Vec::with_capacity(RECORD_BATCH);

    for line in Lines::new(ChunkReader::new(rx)) {
        let line = normalizer.normalize(line?);
        stats.lines += 1;
        if stats.lines % progress_lines == 0 {
            info!("{} lines processed", stats.lines);
        }

        for candidate in splitter.candidates(&line) {
            stats.candidates += 1;
            if length.detect(candidate) {
                stats.accepted += 1;
                batch.push(candidate.to_string());
            }
        }

        if batch.len() >= RECORD_BATCH {
            let full = std::mem::replace(&mut batch, Vec::with_capacity(RECORD_BATCH));
            if tx.send(full).is_err() {
                debug!("writer is gone, stopping normalization");
                return Ok(stats);
            }
        }
    }

    if !batch.is_empty() && tx.send(batch).is_err() {
        debug!("writer is gone, last batch dropped");
    }

    Ok(stats)
}

fn write_stage(mut writer: CorpusWriter<File>, rx: Receiver<Vec<String>>) -> Result<u64, Error> {
    for batch in rx.iter() {
        for record in batch {
            writer.write_record(&record)?;
        }
    }
    let nb_records = writer.nb_records();
    writer.finish()?;
    Ok(nb_records)
}

fn panicked(stage: &str) -> Error {
    error!("{} stage panicked", stage);
    Error::Custom(format!("{} stage panicked", stage))
}

/// Remove the partial corpus of a failed run.
fn discard(partial: &Path) {
    if let Err(e) = std::fs::remove_file(partial) {
        warn!("could not remove partial corpus {:?}: {}", partial, e);
    }
}
