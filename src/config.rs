//! Run configuration.
//!
//! A [Config] is built once (usually from the command line) and then only lent to
//! the pipeline stages, which never mutate it.
use crate::transformers::TranslationTable;

/// Default read granularity of archives.
pub const BLOCK_SIZE: usize = 1000 * 1024;

/// Default minimum length (exclusive, in unicode codepoints) of a written record.
pub const MIN_LENGTH: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    /// characters replaced by a space.
    pub table: TranslationTable,
    /// remove standalone digit runs.
    pub strip_digits: bool,
    /// split normalized lines on `.`.
    pub split_sentences: bool,
    pub min_length: usize,
    /// read buffer of compressed archives and size of decompressed blocks, in bytes.
    pub block_size: usize,
    /// log decompression progress every `progress_blocks` blocks.
    pub progress_blocks: usize,
    /// log normalization progress every `progress_lines` lines.
    pub progress_lines: u64,
    /// capacity of the queues linking the pipeline stages.
    pub queue_capacity: usize,
    /// shuffle seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: TranslationTable::default(),
            strip_digits: true,
            split_sentences: false,
            min_length: MIN_LENGTH,
            block_size: BLOCK_SIZE,
            progress_blocks: 100,
            progress_lines: 10_000,
            queue_capacity: 64,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_table(mut self, table: TranslationTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_strip_digits(mut self, strip_digits: bool) -> Self {
        self.strip_digits = strip_digits;
        self
    }

    pub fn with_split_sentences(mut self, split_sentences: bool) -> Self {
        self.split_sentences = split_sentences;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// A zero block size is bumped to 1.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity.max(1);
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
