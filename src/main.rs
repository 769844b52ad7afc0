//! # wiki2text
//!
//! Turns Wikipedia dumps into a corpus suitable for word embedding or language model training:
//! one cleaned-up record per line.
//!
//! ```sh
//! # download and process the english and french dumps, shuffle and deduplicate the result
//! wiki2text -l en -l fr --mix --unique corpus.txt
//!
//! # process local dumps, splitting sentences and keeping numbers
//! wiki2text -i enwiki-latest-pages-articles.xml.bz2 --split-sentences --keep-digits corpus.txt
//! ```
//!
//! Logging goes to stdout, at `info` level unless `RUST_LOG` says otherwise.
use std::time::Duration;

use env_logger::{Env, Target};
use structopt::StructOpt;
use wiki2text::download::{fetch_all, WikipediaDumps};
use wiki2text::error::Error;
use wiki2text::pipeline::{CorpusPipeline, Pipeline};

#[macro_use]
extern crate log;

mod cli;

/// Wait before the first download retry.
const BACKOFF: Duration = Duration::from_secs(5);

fn run(opt: cli::Wiki2Text) -> Result<(), Error> {
    if opt.langs.is_empty() && opt.inputs.is_empty() {
        return Err(Error::Custom(
            "nothing to do: provide at least one --lang or --input".to_string(),
        ));
    }

    // downloaded dumps come first
    let mut sources = Vec::with_capacity(opt.langs.len() + opt.inputs.len());
    if !opt.langs.is_empty() {
        let mut provider = WikipediaDumps::new(&opt.download_dir);
        if let Some(template) = &opt.dump_url {
            provider = provider.with_template(template);
        }
        sources.extend(fetch_all(&provider, &opt.langs, opt.retries, BACKOFF)?);
    }
    sources.extend(opt.inputs.iter().cloned());

    let pipeline = CorpusPipeline::new(sources, opt.dst.clone(), opt.config())
        .with_post_processor(opt.post_processor());
    let stats = pipeline.run()?;

    info!("corpus written to {:?}: {}", opt.dst, stats);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let opt = cli::Wiki2Text::from_args();
    debug!("cli args\n{:#?}", opt);

    if let Err(e) = run(opt) {
        error!("{}", e);
        std::process::exit(1);
    }
}
