/*! # wiki2text

Turns compressed Wikipedia dumps into a cleaned, line-oriented text corpus,
ready to train word embeddings or language models.

Archives are decompressed, split into lines and normalized in a single
streaming pass (see [pipeline::CorpusPipeline]).
Each line loses its `<...>` tags, its standalone numbers and its markup
characters, gets its whitespace collapsed, and is optionally split into
sentences. Only records longer than a minimum length are kept.

```no_run
use std::path::PathBuf;
use wiki2text::config::Config;
use wiki2text::pipeline::{CorpusPipeline, Pipeline};

let pipeline = CorpusPipeline::new(
    vec![PathBuf::from("enwiki-latest-pages-articles.xml.bz2")],
    PathBuf::from("wiki.txt"),
    Config::default().with_split_sentences(true),
);
let stats = pipeline.run()?;
println!("{}", stats);
# Ok::<(), wiki2text::error::Error>(())
```
!*/
pub mod config;
pub mod decompress;
pub mod download;
pub mod error;
pub mod filtering;
pub mod io;
pub mod pipeline;
pub mod processing;
pub mod transformers;
