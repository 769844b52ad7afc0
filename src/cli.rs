//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;
use wiki2text::config::Config;
use wiki2text::processing::PostProcessor;
use wiki2text::transformers::TranslationTable;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "wiki2text",
    about = "Turn Wikipedia dumps into a cleaned, one record per line text corpus."
)]
/// ```sh
/// USAGE:
///     wiki2text [FLAGS] [OPTIONS] [dst]
///
/// FLAGS:
///     -h, --help               Prints help information
///         --keep-digits        keep standalone numbers
///     -m, --mix                shuffle corpus lines once written
///     -s, --split-sentences    split lines on periods
///     -u, --unique             remove duplicate corpus lines once written
///
/// ARGS:
///     <dst>    destination corpus file [default: wiki.txt]
/// ```
pub struct Wiki2Text {
    #[structopt(
        parse(from_os_str),
        help = "destination corpus file",
        default_value = "wiki.txt"
    )]
    pub dst: PathBuf,

    #[structopt(
        short = "l",
        long = "lang",
        number_of_values = 1,
        help = "download and process the dump of this language (repeatable)"
    )]
    pub langs: Vec<String>,

    #[structopt(
        short = "i",
        long = "input",
        parse(from_os_str),
        number_of_values = 1,
        help = "local archive to process, after downloaded ones (repeatable)"
    )]
    pub inputs: Vec<PathBuf>,

    #[structopt(short = "m", long = "mix", help = "shuffle corpus lines once written")]
    pub mix: bool,

    #[structopt(
        short = "u",
        long = "unique",
        help = "remove duplicate corpus lines once written"
    )]
    pub unique: bool,

    #[structopt(long = "keep-digits", help = "keep standalone numbers")]
    pub keep_digits: bool,

    #[structopt(short = "s", long = "split-sentences", help = "split lines on periods")]
    pub split_sentences: bool,

    #[structopt(
        long = "min-length",
        default_value = "100",
        help = "records of this length or less are dropped"
    )]
    pub min_length: usize,

    #[structopt(
        long = "remove-chars",
        help = "characters replaced by spaces (replaces the default set)"
    )]
    pub remove_chars: Option<String>,

    #[structopt(long = "seed", help = "seed of the shuffle")]
    pub seed: Option<u64>,

    #[structopt(
        long = "block-size",
        default_value = "1024000",
        help = "archive read buffer and decompressed block size (bytes)"
    )]
    pub block_size: usize,

    #[structopt(
        long = "download-dir",
        parse(from_os_str),
        default_value = ".",
        help = "where downloaded dumps are stored"
    )]
    pub download_dir: PathBuf,

    #[structopt(
        long = "dump-url",
        help = "dump url template, {lang} being replaced by the language code. Defaults to the latest wikimedia articles dump"
    )]
    pub dump_url: Option<String>,

    #[structopt(long = "retries", default_value = "3", help = "download retries")]
    pub retries: usize,
}

impl Wiki2Text {
    pub fn config(&self) -> Config {
        let table = self
            .remove_chars
            .as_deref()
            .map(TranslationTable::new)
            .unwrap_or_default();

        Config::default()
            .with_table(table)
            .with_strip_digits(!self.keep_digits)
            .with_split_sentences(self.split_sentences)
            .with_min_length(self.min_length)
            .with_block_size(self.block_size)
            .with_seed(self.seed)
    }

    pub fn post_processor(&self) -> PostProcessor {
        PostProcessor::from_flags(self.mix, self.unique)
    }
}
